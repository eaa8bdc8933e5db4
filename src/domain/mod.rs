//! # Domain Layer
//!
//! Core data model and errors for organization-wide contributor statistics.
//! This layer is independent of the hosting API and the cache backend.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
