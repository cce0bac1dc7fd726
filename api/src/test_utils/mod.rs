//! Shared test utilities
//!
//! In-memory port implementations and entity factories used across service
//! and integration tests.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
