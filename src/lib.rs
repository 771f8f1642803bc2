//! MCP portal: tool registration and lifecycle management.
//!
//! This crate provides the in-process registry behind the MCP portal page:
//! tools are registered, tested against a playground server, published, and
//! put forward for promotion.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Tool identity, validated fields, and the lifecycle state machine
//! - **Ports**: Abstract trait interfaces for tool storage
//! - **Adapters**: Concrete implementations of ports (in-memory storage)
//! - **Services**: Registration, deferred test runs, publishing, and promotion
//!
//! # Modules
//!
//! - [`tool_registry`]: Tool registration and lifecycle orchestration

pub mod tool_registry;
