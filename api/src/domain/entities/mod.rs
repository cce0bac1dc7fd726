//! Domain entities
//!
//! Core marketplace types, free of persistence and HTTP concerns.

pub mod client_profile;
pub mod contract;
pub mod due_diligence;
pub mod project;
pub mod provider_profile;
pub mod quotation;
pub mod review;
pub mod session;
pub mod user;

pub use client_profile::{ClientProfile, ClientProfileId, CompanySize, NewClientProfile};
pub use contract::{
    Contract, ContractId, ContractStatus, ContractTerms, Milestone, MilestoneId, MilestoneStatus,
    NewContract, NewMilestone,
};
pub use due_diligence::{
    DueDiligenceReport, NewDueDiligenceReport, ReportId, RiskLevel, VerificationScores,
};
pub use project::{NewProject, Project, ProjectId, ProjectStatus};
pub use provider_profile::{Certification, NewProviderProfile, ProviderProfile, ProviderProfileId};
pub use quotation::{NewQuotation, Quotation, QuotationComparison, QuotationId, QuotationStatus};
pub use review::{
    DimensionRatings, NewReview, NewReviewVote, Review, ReviewId, ReviewVote, VoteCounts,
};
pub use session::{NewSession, Session, SessionId};
pub use user::{NewUser, User, UserId, UserRole};
