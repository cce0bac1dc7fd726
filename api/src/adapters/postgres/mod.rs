//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod client_profile_repo;
pub mod contract_repo;
pub mod due_diligence_repo;
pub mod project_repo;
pub mod provider_profile_repo;
pub mod quotation_repo;
pub mod review_repo;
pub mod session_repo;
pub mod user_repo;

pub use client_profile_repo::PostgresClientProfileRepository;
pub use contract_repo::PostgresContractRepository;
pub use due_diligence_repo::PostgresDueDiligenceRepository;
pub use project_repo::PostgresProjectRepository;
pub use provider_profile_repo::PostgresProviderProfileRepository;
pub use quotation_repo::PostgresQuotationRepository;
pub use review_repo::PostgresReviewRepository;
pub use session_repo::PostgresSessionRepository;
pub use user_repo::PostgresUserRepository;
