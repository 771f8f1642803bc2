//! Port contracts for tool registry storage.

mod repository;

pub use repository::{ToolRepository, ToolRepositoryError, ToolRepositoryResult};
