//! Ports (interfaces) for the domain layer
//!
//! Repositories abstract persistence; the verification bureau port
//! abstracts the external scoring API.

pub mod repositories;
pub mod verifier;

pub use repositories::{
    ClientProfileRepository, ContractRepository, DueDiligenceRepository, ProjectRepository,
    ProviderProfileRepository, QuotationRepository, ReviewRepository, SessionRepository,
    UserRepository,
};
pub use verifier::{BureauScore, VerificationBureau};
