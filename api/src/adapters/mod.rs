//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod verifier;

pub use postgres::{
    PostgresClientProfileRepository, PostgresContractRepository, PostgresDueDiligenceRepository,
    PostgresProjectRepository, PostgresProviderProfileRepository, PostgresQuotationRepository,
    PostgresReviewRepository, PostgresSessionRepository, PostgresUserRepository,
};
pub use verifier::{BureauClient, SimulatedBureau};
