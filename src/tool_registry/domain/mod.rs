//! Domain model for tool registration and lifecycle.
//!
//! The tool registry domain models tool identity, validated text fields, the
//! linear lifecycle status machine, and the playground server selection.
//! Scheduling and storage concerns remain outside this boundary.

mod error;
mod ids;
mod playground;
mod tool;

pub use error::{ParsePlaygroundServerError, ParseToolStatusError, ToolRegistryDomainError};
pub use ids::{ToolDescription, ToolId, ToolName};
pub use playground::PlaygroundServer;
pub use tool::{PersistedToolData, Tool, ToolStatus};
