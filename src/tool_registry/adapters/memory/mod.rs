//! In-memory adapters for tool registry ports.

mod repository;

pub use repository::InMemoryToolRepository;
