//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    ClientProfile, Contract, ContractId, ContractStatus, DueDiligenceReport, Milestone,
    NewClientProfile, NewContract, NewDueDiligenceReport, NewMilestone, NewProject,
    NewProviderProfile, NewQuotation, NewReview, NewReviewVote, NewSession, NewUser, Project,
    ProjectId, ProjectStatus, ProviderProfile, Quotation, QuotationId, QuotationStatus, Review,
    ReviewId, ReviewVote, Session, User, UserId, VoteCounts,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by email (emails are unique)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Update the last seen timestamp
    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError>;
}

/// Repository for Session entities
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError>;

    /// Find a session by the hash of its bearer token
    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError>;

    /// Delete a session by token hash (logout)
    async fn delete_by_token_hash(&self, hash: &str) -> Result<(), DomainError>;
}

/// Repository for ClientProfile entities
#[async_trait]
pub trait ClientProfileRepository: Send + Sync {
    /// Find the profile belonging to a user
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ClientProfile>, DomainError>;

    /// Create a fresh profile at wizard step 1
    async fn create(&self, profile: &NewClientProfile) -> Result<ClientProfile, DomainError>;

    /// Persist the full profile state (wizard step submissions)
    async fn save(&self, profile: &ClientProfile) -> Result<ClientProfile, DomainError>;
}

/// Repository for ProviderProfile entities
#[async_trait]
pub trait ProviderProfileRepository: Send + Sync {
    /// Find the profile belonging to a user
    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<ProviderProfile>, DomainError>;

    /// Create a fresh profile at wizard step 1
    async fn create(&self, profile: &NewProviderProfile) -> Result<ProviderProfile, DomainError>;

    /// Persist the full profile state (wizard step submissions)
    async fn save(&self, profile: &ProviderProfile) -> Result<ProviderProfile, DomainError>;
}

/// Repository for Project entities
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by ID
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// Find open projects with pagination (newest first)
    async fn find_open(&self, limit: u64, offset: u64) -> Result<Vec<Project>, DomainError>;

    /// Find a client's projects, any status
    async fn find_by_client(&self, client_id: &UserId) -> Result<Vec<Project>, DomainError>;

    /// Create a new project
    async fn create(&self, project: &NewProject) -> Result<Project, DomainError>;

    /// Update project status
    async fn update_status(&self, id: &ProjectId, status: ProjectStatus)
        -> Result<(), DomainError>;
}

/// Repository for Quotation entities
#[async_trait]
pub trait QuotationRepository: Send + Sync {
    /// Find a quotation by ID
    async fn find_by_id(&self, id: &QuotationId) -> Result<Option<Quotation>, DomainError>;

    /// All quotations on a project (newest first)
    async fn find_by_project(&self, project_id: &ProjectId)
        -> Result<Vec<Quotation>, DomainError>;

    /// Pending quotations on a project (for the accept cascade)
    async fn find_pending_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Quotation>, DomainError>;

    /// A provider's quotations with pagination (newest first)
    async fn find_by_provider(
        &self,
        provider_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Quotation>, DomainError>;

    /// Check whether a provider already quoted a project
    async fn exists_for_project_and_provider(
        &self,
        project_id: &ProjectId,
        provider_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Create a new quotation
    async fn create(&self, quotation: &NewQuotation) -> Result<Quotation, DomainError>;

    /// Update quotation status, recording the decision time
    async fn update_status(
        &self,
        id: &QuotationId,
        status: QuotationStatus,
        decided_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}

/// Repository for DueDiligenceReport entities
#[async_trait]
pub trait DueDiligenceRepository: Send + Sync {
    /// Find the report for a quotation (at most one)
    async fn find_by_quotation(
        &self,
        quotation_id: &QuotationId,
    ) -> Result<Option<DueDiligenceReport>, DomainError>;

    /// Persist a new report
    async fn create(
        &self,
        report: &NewDueDiligenceReport,
    ) -> Result<DueDiligenceReport, DomainError>;
}

/// Repository for Contract and Milestone entities
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Find a contract by ID
    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError>;

    /// Find the contract generated from a quotation (at most one)
    async fn find_by_quotation(
        &self,
        quotation_id: &QuotationId,
    ) -> Result<Option<Contract>, DomainError>;

    /// Contracts where the user is a party (newest first)
    async fn find_by_party(&self, user_id: &UserId) -> Result<Vec<Contract>, DomainError>;

    /// Create a new contract
    async fn create(&self, contract: &NewContract) -> Result<Contract, DomainError>;

    /// Record the client's signature
    async fn set_client_signed(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Record the provider's signature
    async fn set_provider_signed(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Update contract status
    async fn update_status(
        &self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<(), DomainError>;

    /// Milestones of a contract, ordered by sequence
    async fn find_milestones(&self, contract_id: &ContractId)
        -> Result<Vec<Milestone>, DomainError>;

    /// Persist the generated milestone schedule
    async fn create_milestones(
        &self,
        milestones: &[NewMilestone],
    ) -> Result<Vec<Milestone>, DomainError>;

    /// Mark a milestone paid by contract and sequence number
    async fn mark_milestone_paid(
        &self,
        contract_id: &ContractId,
        sequence: i32,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}

/// Repository for Review and ReviewVote entities
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find a review by ID
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError>;

    /// Reviews written by a user, paginated (newest first)
    async fn find_by_reviewer(
        &self,
        reviewer_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Review>, DomainError>;

    /// Reviews received by a user, paginated (newest first)
    async fn find_by_reviewee(
        &self,
        reviewee_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Review>, DomainError>;

    /// All reviews received by a user (for aggregation)
    async fn find_all_by_reviewee(&self, reviewee_id: &UserId)
        -> Result<Vec<Review>, DomainError>;

    /// Check whether a reviewer already reviewed a contract
    async fn exists_for_contract_and_reviewer(
        &self,
        contract_id: &crate::domain::entities::ContractId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Create a new review
    async fn create(&self, review: &NewReview) -> Result<Review, DomainError>;

    /// Record a helpfulness vote
    async fn create_vote(&self, vote: &NewReviewVote) -> Result<ReviewVote, DomainError>;

    /// Check whether a user already voted on a review
    async fn has_voted(&self, review_id: &ReviewId, voter_id: &UserId)
        -> Result<bool, DomainError>;

    /// Helpful/unhelpful tallies for a review
    async fn vote_counts(&self, review_id: &ReviewId) -> Result<VoteCounts, DomainError>;

    /// Total helpful votes across all of a user's received reviews
    async fn helpful_votes_for_reviewee(&self, reviewee_id: &UserId)
        -> Result<i64, DomainError>;
}
