//! Verification bureau adapters
//!
//! Live HTTP client plus the deterministic simulated bureau used as the
//! due-diligence fallback.

pub mod client;
pub mod simulated;

pub use client::BureauClient;
pub use simulated::SimulatedBureau;
