//! # Application Layer
//!
//! Interfaces to the external collaborators and the use cases that make up
//! the read-through cache and aggregation pipeline.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
