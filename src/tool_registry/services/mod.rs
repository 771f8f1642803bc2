//! Application services for tool registration and lifecycle operations.

mod config;
mod error;
mod lifecycle;
mod pending;

pub use config::{DEFAULT_TEST_DELAY, SeedTool, ToolRegistryConfig};
pub use error::{ToolRegistryServiceError, ToolRegistryServiceResult};
pub use lifecycle::{PendingToolTest, RegisterToolRequest, ToolRegistryService, ToolTestOutcome};
