//! Shared world state for tool lifecycle BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use mcp_portal::tool_registry::{
    adapters::memory::InMemoryToolRepository,
    domain::ToolId,
    services::{
        RegisterToolRequest, ToolRegistryConfig, ToolRegistryService, ToolRegistryServiceError,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestToolService = ToolRegistryService<InMemoryToolRepository, DefaultClock>;

/// Scenario world for tool lifecycle behaviour tests.
pub struct ToolLifecycleWorld {
    pub service: TestToolService,
    pub pending_request: Option<RegisterToolRequest>,
    pub tool_id: Option<ToolId>,
    pub last_error: Option<ToolRegistryServiceError>,
}

impl ToolLifecycleWorld {
    /// Creates a world whose test runs finish quickly.
    #[must_use]
    pub fn new() -> Self {
        let service = ToolRegistryService::with_config(
            Arc::new(InMemoryToolRepository::new()),
            Arc::new(DefaultClock),
            ToolRegistryConfig::default().with_test_delay(Duration::from_millis(20)),
        );

        Self {
            service,
            pending_request: None,
            tool_id: None,
            last_error: None,
        }
    }

    /// Returns the identifier of the tool under test.
    pub fn tool_id(&self) -> Result<ToolId, eyre::Report> {
        self.tool_id
            .ok_or_else(|| eyre::eyre!("missing registered tool in scenario world"))
    }
}

impl Default for ToolLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ToolLifecycleWorld {
    ToolLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
