//! Application services
//!
//! Business logic orchestrating the domain entities through the port
//! traits. Services are generic over their repositories so tests can run
//! against in-memory implementations.

pub mod account_service;
pub mod contract_service;
pub mod due_diligence_service;
pub mod onboarding_service;
pub mod policy;
pub mod project_service;
pub mod quotation_service;
pub mod review_analytics;
pub mod review_service;

pub use account_service::AccountService;
pub use contract_service::{ContractService, ContractView};
pub use due_diligence_service::DueDiligenceService;
pub use onboarding_service::{ClientStepPayload, OnboardingService, ProviderStepPayload};
pub use project_service::{CreateProject, ProjectService};
pub use quotation_service::{QuotationListing, QuotationService, SubmitQuotation};
pub use review_analytics::RatingCard;
pub use review_service::{CreateReview, ReviewDirection, ReviewService, ReviewWithVotes};

use serde::Deserialize;

use crate::app::policy::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page-based pagination parameters from query strings. Pages are 1-based;
/// out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageParams {
    pub fn limit(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }
}
