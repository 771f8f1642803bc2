//! Error types for tool registry domain validation and parsing.

use super::ToolId;
use thiserror::Error;

/// Errors returned while constructing or transitioning tool registry values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolRegistryDomainError {
    /// The tool name is empty after trimming.
    #[error("tool name must not be empty")]
    EmptyToolName,

    /// The tool description is empty after trimming.
    #[error("tool description must not be empty")]
    EmptyToolDescription,

    /// Moving the tool between two lifecycle states is not allowed.
    #[error("invalid status transition for tool {tool_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Tool identifier.
        tool_id: ToolId,
        /// Current status in canonical string form.
        from: String,
        /// Requested status in canonical string form.
        to: String,
    },
}

/// Error returned while parsing a tool status from its string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tool status: {0}")]
pub struct ParseToolStatusError(pub String);

/// Error returned while parsing a playground server selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown playground server: {0}")]
pub struct ParsePlaygroundServerError(pub String);
