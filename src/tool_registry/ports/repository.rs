//! Repository port for the registered tool collection.

use crate::tool_registry::domain::{Tool, ToolId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tool repository operations.
pub type ToolRepositoryResult<T> = Result<T, ToolRepositoryError>;

/// Storage contract for registered tools.
///
/// Implementations preserve insertion order and never delete tools.
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// Appends a new tool to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRepositoryError::DuplicateTool`] when the identifier is
    /// already present.
    async fn store(&self, tool: &Tool) -> ToolRepositoryResult<()>;

    /// Replaces the stored state of an existing tool in place.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRepositoryError::NotFound`] when the tool does not exist.
    async fn update(&self, tool: &Tool) -> ToolRepositoryResult<()>;

    /// Finds a tool by identifier.
    async fn find_by_id(&self, tool_id: ToolId) -> ToolRepositoryResult<Option<Tool>>;

    /// Returns every tool in insertion order.
    async fn list_all(&self) -> ToolRepositoryResult<Vec<Tool>>;
}

/// Errors returned by tool repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ToolRepositoryError {
    /// A tool with the same identifier already exists.
    #[error("duplicate tool identifier: {0}")]
    DuplicateTool(ToolId),

    /// The tool was not found.
    #[error("tool not found: {0}")]
    NotFound(ToolId),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ToolRepositoryError {
    /// Wraps a storage-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
