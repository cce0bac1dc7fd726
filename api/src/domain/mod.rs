//! Domain layer
//!
//! Entities and ports (interfaces). Free of framework dependencies.

pub mod entities;
pub mod ports;
