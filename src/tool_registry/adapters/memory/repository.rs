//! In-memory repository for registered tools.

use crate::tool_registry::{
    domain::{Tool, ToolId},
    ports::{ToolRepository, ToolRepositoryError, ToolRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory tool repository.
///
/// Tools are returned in the order they were stored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToolRepository {
    state: Arc<RwLock<InMemoryToolState>>,
}

#[derive(Debug, Default)]
struct InMemoryToolState {
    tools: HashMap<ToolId, Tool>,
    insertion_order: Vec<ToolId>,
}

impl InMemoryToolRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ToolRepositoryError {
    ToolRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ToolRepository for InMemoryToolRepository {
    async fn store(&self, tool: &Tool) -> ToolRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;

        if state.tools.contains_key(&tool.id()) {
            return Err(ToolRepositoryError::DuplicateTool(tool.id()));
        }

        state.insertion_order.push(tool.id());
        state.tools.insert(tool.id(), tool.clone());
        Ok(())
    }

    async fn update(&self, tool: &Tool) -> ToolRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;

        let stored = state
            .tools
            .get_mut(&tool.id())
            .ok_or(ToolRepositoryError::NotFound(tool.id()))?;
        *stored = tool.clone();
        Ok(())
    }

    async fn find_by_id(&self, tool_id: ToolId) -> ToolRepositoryResult<Option<Tool>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tools.get(&tool_id).cloned())
    }

    async fn list_all(&self) -> ToolRepositoryResult<Vec<Tool>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.tools.get(id))
            .cloned()
            .collect())
    }
}
