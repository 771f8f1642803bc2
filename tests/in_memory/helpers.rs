//! Shared fixtures for in-memory tool registry integration tests.

use std::sync::Arc;

use mcp_portal::tool_registry::{
    adapters::memory::InMemoryToolRepository,
    domain::{Tool, ToolId, ToolStatus},
    services::{RegisterToolRequest, ToolRegistryConfig, ToolRegistryService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type exercised by the integration tests.
pub type TestService = ToolRegistryService<InMemoryToolRepository, DefaultClock>;

/// Installs a test-writer tracing subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed for this test binary");
    }
}

/// Provides a service backed by a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    init_tracing();
    ToolRegistryService::with_config(
        Arc::new(InMemoryToolRepository::new()),
        Arc::new(DefaultClock),
        ToolRegistryConfig::default(),
    )
}

/// Registers a tool and returns it.
///
/// # Panics
///
/// Panics when registration fails.
pub async fn register(service: &TestService, name: &str, description: &str) -> Tool {
    service
        .register(RegisterToolRequest::new(name, description))
        .await
        .expect("registration should succeed")
}

/// Reads the stored status of a tool.
///
/// # Panics
///
/// Panics when the tool is missing.
pub async fn stored_status(service: &TestService, tool_id: ToolId) -> ToolStatus {
    service
        .find_by_id(tool_id)
        .await
        .expect("lookup should succeed")
        .expect("tool should exist")
        .status()
}
