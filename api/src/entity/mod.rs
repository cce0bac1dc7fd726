//! SeaORM entity models
//!
//! One module per table, in SeaORM's generated style. Domain conversions
//! live next to the repository adapters.

pub mod client_profiles;
pub mod contract_milestones;
pub mod contracts;
pub mod due_diligence_reports;
pub mod projects;
pub mod provider_profiles;
pub mod quotations;
pub mod review_votes;
pub mod reviews;
pub mod sessions;
pub mod users;
