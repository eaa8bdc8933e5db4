//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - GitHub REST API (repository listing, contributor statistics)
//! - Caching (Redis, in-memory fallback)

pub mod adapter;

pub use adapter::*;
