//! Tool registration and lifecycle management for the MCP portal.
//!
//! Tools move through a linear lifecycle: they are registered as drafts,
//! exercised against a playground server, published, and finally put forward
//! for promotion. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
