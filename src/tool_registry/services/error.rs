//! Service-level errors for tool registry operations.

use crate::tool_registry::{
    domain::{ToolId, ToolRegistryDomainError},
    ports::ToolRepositoryError,
};
use thiserror::Error;

/// Errors returned by [`super::ToolRegistryService`].
#[derive(Debug, Error)]
pub enum ToolRegistryServiceError {
    /// Input validation or a lifecycle precondition failed.
    #[error(transparent)]
    Domain(#[from] ToolRegistryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ToolRepositoryError),
    /// No tool exists with the given identifier.
    #[error("tool {0} not found")]
    NotFound(ToolId),
    /// Shared registry state was poisoned by a panicking holder.
    #[error("tool registry state lock poisoned: {0}")]
    StatePoisoned(String),
}

/// Result type for tool registry service operations.
pub type ToolRegistryServiceResult<T> = Result<T, ToolRegistryServiceError>;
