//! Configuration for the tool registry service.

use crate::tool_registry::domain::{PlaygroundServer, ToolStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TEST_DELAY_MS: u64 = 1000;

/// Default delay before a scheduled test run completes.
pub const DEFAULT_TEST_DELAY: Duration = Duration::from_millis(DEFAULT_TEST_DELAY_MS);

/// A tool stored when the registry is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTool {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// Status the tool starts in.
    pub status: ToolStatus,
}

impl SeedTool {
    /// Creates a seed entry.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, status: ToolStatus) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status,
        }
    }
}

/// Tunables for [`super::ToolRegistryService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolRegistryConfig {
    /// Milliseconds between scheduling a test and marking the tool tested.
    pub test_delay_ms: u64,
    /// Playground server selected when the service is created.
    pub default_playground: PlaygroundServer,
    /// Tools stored by [`super::ToolRegistryService::seed_initial_tools`].
    pub initial_tools: Vec<SeedTool>,
}

impl Default for ToolRegistryConfig {
    fn default() -> Self {
        Self {
            test_delay_ms: DEFAULT_TEST_DELAY_MS,
            default_playground: PlaygroundServer::default(),
            initial_tools: Vec::new(),
        }
    }
}

impl ToolRegistryConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the input is not valid JSON or a
    /// field has the wrong shape.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Returns the configured test delay.
    #[must_use]
    pub const fn test_delay(&self) -> Duration {
        Duration::from_millis(self.test_delay_ms)
    }

    /// Overrides the test delay.
    #[must_use]
    pub fn with_test_delay(mut self, delay: Duration) -> Self {
        self.test_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Adds the published sample tool the portal starts with.
    #[must_use]
    pub fn with_sample_tool(mut self) -> Self {
        self.initial_tools.push(SeedTool::new(
            "Sample Tool",
            "Example published tool",
            ToolStatus::Published,
        ));
        self
    }
}
