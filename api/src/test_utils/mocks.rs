//! Mock implementations of port traits
//!
//! In-memory implementations backing service tests. They store data in
//! memory and can be pre-populated with the `with_*` builders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    ClientProfile, ClientProfileId, Contract, ContractId, ContractStatus, DueDiligenceReport,
    Milestone, MilestoneId, MilestoneStatus, NewClientProfile, NewContract, NewDueDiligenceReport,
    NewMilestone, NewProject, NewProviderProfile, NewQuotation, NewReview, NewReviewVote,
    NewSession, NewUser, Project, ProjectId, ProjectStatus, ProviderProfile, ProviderProfileId,
    Quotation, QuotationId, QuotationStatus, ReportId, Review, ReviewId, ReviewVote, Session,
    SessionId, User, UserId, VoteCounts,
};
use crate::domain::ports::{
    BureauScore, ClientProfileRepository, ContractRepository, DueDiligenceRepository,
    ProjectRepository, ProviderProfileRepository, QuotationRepository, ReviewRepository,
    SessionRepository, UserRepository, VerificationBureau,
};
use crate::error::{DomainError, VerifierError};

fn page<T: Clone>(mut items: Vec<T>, limit: u64, offset: u64) -> Vec<T> {
    let offset = offset.min(items.len() as u64) as usize;
    items.drain(..offset);
    items.truncate(limit as usize);
    items
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let user = User {
            id: UserId::new(),
            email: new_user.email.clone(),
            display_name: new_user.display_name.clone(),
            role: new_user.role,
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
            last_seen_at: None,
        };
        self.users.write().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError> {
        if let Some(user) = self.users.write().unwrap().get_mut(id) {
            user.last_seen_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Session Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, new_session: &NewSession) -> Result<Session, DomainError> {
        let session = Session {
            id: SessionId::new(),
            user_id: new_session.user_id,
            token_hash: new_session.token_hash.clone(),
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        self.sessions
            .write()
            .unwrap()
            .insert(session.token_hash.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().unwrap().get(hash).cloned())
    }

    async fn delete_by_token_hash(&self, hash: &str) -> Result<(), DomainError> {
        self.sessions.write().unwrap().remove(hash);
        Ok(())
    }
}

// ============================================================================
// In-Memory Profile Repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryClientProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, ClientProfile>>>,
}

impl InMemoryClientProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a profile for testing
    pub fn with_profile(self, profile: ClientProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id, profile);
        self
    }
}

#[async_trait]
impl ClientProfileRepository for InMemoryClientProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ClientProfile>, DomainError> {
        Ok(self.profiles.read().unwrap().get(user_id).cloned())
    }

    async fn create(&self, new_profile: &NewClientProfile) -> Result<ClientProfile, DomainError> {
        let now = Utc::now();
        let profile = ClientProfile {
            id: ClientProfileId::new(),
            user_id: new_profile.user_id,
            company_name: None,
            industry: None,
            company_size: None,
            sap_modules_needed: vec![],
            budget_min_cents: None,
            budget_max_cents: None,
            preferred_start: None,
            onboarding_step: 1,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn save(&self, profile: &ClientProfile) -> Result<ClientProfile, DomainError> {
        let mut updated = profile.clone();
        updated.updated_at = Utc::now();
        self.profiles
            .write()
            .unwrap()
            .insert(updated.user_id, updated.clone());
        Ok(updated)
    }
}

#[derive(Default)]
pub struct InMemoryProviderProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, ProviderProfile>>>,
}

impl InMemoryProviderProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a profile for testing
    pub fn with_profile(self, profile: ProviderProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id, profile);
        self
    }
}

#[async_trait]
impl ProviderProfileRepository for InMemoryProviderProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProviderProfile>, DomainError> {
        Ok(self.profiles.read().unwrap().get(user_id).cloned())
    }

    async fn create(
        &self,
        new_profile: &NewProviderProfile,
    ) -> Result<ProviderProfile, DomainError> {
        let now = Utc::now();
        let profile = ProviderProfile {
            id: ProviderProfileId::new(),
            user_id: new_profile.user_id,
            firm_name: None,
            registration_number: None,
            country: None,
            years_experience: None,
            consultant_count: None,
            sap_modules: vec![],
            certifications: vec![],
            hourly_rate_min_cents: None,
            hourly_rate_max_cents: None,
            onboarding_step: 1,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn save(&self, profile: &ProviderProfile) -> Result<ProviderProfile, DomainError> {
        let mut updated = profile.clone();
        updated.updated_at = Utc::now();
        self.profiles
            .write()
            .unwrap()
            .insert(updated.user_id, updated.clone());
        Ok(updated)
    }
}

// ============================================================================
// In-Memory Project Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a project for testing
    pub fn with_project(self, project: Project) -> Self {
        self.projects.write().unwrap().insert(project.id, project);
        self
    }

    /// Insert a project after construction
    pub fn insert(&self, project: Project) {
        self.projects.write().unwrap().insert(project.id, project);
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        Ok(self.projects.read().unwrap().get(id).cloned())
    }

    async fn find_open(&self, limit: u64, offset: u64) -> Result<Vec<Project>, DomainError> {
        let mut open: Vec<Project> = self
            .projects
            .read()
            .unwrap()
            .values()
            .filter(|p| p.status == ProjectStatus::Open)
            .cloned()
            .collect();
        open.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(open, limit, offset))
    }

    async fn find_by_client(&self, client_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let mut mine: Vec<Project> = self
            .projects
            .read()
            .unwrap()
            .values()
            .filter(|p| p.client_id == *client_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn create(&self, new_project: &NewProject) -> Result<Project, DomainError> {
        let project = Project {
            id: ProjectId::new(),
            client_id: new_project.client_id,
            title: new_project.title.clone(),
            description: new_project.description.clone(),
            sap_module: new_project.sap_module.clone(),
            budget_min_cents: new_project.budget_min_cents,
            budget_max_cents: new_project.budget_max_cents,
            expected_duration_days: new_project.expected_duration_days,
            status: ProjectStatus::Open,
            created_at: Utc::now(),
        };
        self.projects
            .write()
            .unwrap()
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<(), DomainError> {
        let mut projects = self.projects.write().unwrap();
        let project = projects
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Project {}", id)))?;
        project.status = status;
        Ok(())
    }
}

// ============================================================================
// In-Memory Quotation Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryQuotationRepository {
    quotations: Arc<RwLock<HashMap<QuotationId, Quotation>>>,
}

impl InMemoryQuotationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a quotation for testing
    pub fn with_quotation(self, quotation: Quotation) -> Self {
        self.quotations
            .write()
            .unwrap()
            .insert(quotation.id, quotation);
        self
    }
}

#[async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    async fn find_by_id(&self, id: &QuotationId) -> Result<Option<Quotation>, DomainError> {
        Ok(self.quotations.read().unwrap().get(id).cloned())
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Quotation>, DomainError> {
        let mut found: Vec<Quotation> = self
            .quotations
            .read()
            .unwrap()
            .values()
            .filter(|q| q.project_id == *project_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_pending_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Quotation>, DomainError> {
        Ok(self
            .quotations
            .read()
            .unwrap()
            .values()
            .filter(|q| q.project_id == *project_id && q.status == QuotationStatus::Pending)
            .cloned()
            .collect())
    }

    async fn find_by_provider(
        &self,
        provider_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Quotation>, DomainError> {
        let mut mine: Vec<Quotation> = self
            .quotations
            .read()
            .unwrap()
            .values()
            .filter(|q| q.provider_id == *provider_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(mine, limit, offset))
    }

    async fn exists_for_project_and_provider(
        &self,
        project_id: &ProjectId,
        provider_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .quotations
            .read()
            .unwrap()
            .values()
            .any(|q| q.project_id == *project_id && q.provider_id == *provider_id))
    }

    async fn create(&self, new_quotation: &NewQuotation) -> Result<Quotation, DomainError> {
        let quotation = Quotation {
            id: QuotationId::new(),
            project_id: new_quotation.project_id,
            provider_id: new_quotation.provider_id,
            amount_cents: new_quotation.amount_cents,
            estimated_days: new_quotation.estimated_days,
            proposal: new_quotation.proposal.clone(),
            status: QuotationStatus::Pending,
            created_at: Utc::now(),
            decided_at: None,
        };
        self.quotations
            .write()
            .unwrap()
            .insert(quotation.id, quotation.clone());
        Ok(quotation)
    }

    async fn update_status(
        &self,
        id: &QuotationId,
        status: QuotationStatus,
        decided_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut quotations = self.quotations.write().unwrap();
        let quotation = quotations
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Quotation {}", id)))?;
        quotation.status = status;
        quotation.decided_at = Some(decided_at);
        Ok(())
    }
}

// ============================================================================
// In-Memory Due-Diligence Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryDueDiligenceRepository {
    reports: Arc<RwLock<HashMap<QuotationId, DueDiligenceReport>>>,
}

impl InMemoryDueDiligenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a report for testing
    pub fn with_report(self, report: DueDiligenceReport) -> Self {
        self.reports
            .write()
            .unwrap()
            .insert(report.quotation_id, report);
        self
    }
}

#[async_trait]
impl DueDiligenceRepository for InMemoryDueDiligenceRepository {
    async fn find_by_quotation(
        &self,
        quotation_id: &QuotationId,
    ) -> Result<Option<DueDiligenceReport>, DomainError> {
        Ok(self.reports.read().unwrap().get(quotation_id).cloned())
    }

    async fn create(
        &self,
        new_report: &NewDueDiligenceReport,
    ) -> Result<DueDiligenceReport, DomainError> {
        let report = DueDiligenceReport {
            id: ReportId::new(),
            quotation_id: new_report.quotation_id,
            provider_id: new_report.provider_id,
            scores: new_report.scores,
            overall_score: new_report.overall_score,
            risk_level: new_report.risk_level,
            flags: new_report.flags.clone(),
            simulated: new_report.simulated,
            created_at: Utc::now(),
        };
        self.reports
            .write()
            .unwrap()
            .insert(report.quotation_id, report.clone());
        Ok(report)
    }
}

// ============================================================================
// In-Memory Contract Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryContractRepository {
    contracts: Arc<RwLock<HashMap<ContractId, Contract>>>,
    milestones: Arc<RwLock<HashMap<ContractId, Vec<Milestone>>>>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a contract for testing
    pub fn with_contract(self, contract: Contract) -> Self {
        self.contracts
            .write()
            .unwrap()
            .insert(contract.id, contract);
        self
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        Ok(self.contracts.read().unwrap().get(id).cloned())
    }

    async fn find_by_quotation(
        &self,
        quotation_id: &QuotationId,
    ) -> Result<Option<Contract>, DomainError> {
        Ok(self
            .contracts
            .read()
            .unwrap()
            .values()
            .find(|c| c.quotation_id == *quotation_id)
            .cloned())
    }

    async fn find_by_party(&self, user_id: &UserId) -> Result<Vec<Contract>, DomainError> {
        let mut mine: Vec<Contract> = self
            .contracts
            .read()
            .unwrap()
            .values()
            .filter(|c| c.is_party(user_id))
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn create(&self, new_contract: &NewContract) -> Result<Contract, DomainError> {
        let contract = Contract {
            id: ContractId::new(),
            quotation_id: new_contract.quotation_id,
            project_id: new_contract.project_id,
            client_id: new_contract.client_id,
            provider_id: new_contract.provider_id,
            terms: new_contract.terms.clone(),
            total_amount_cents: new_contract.total_amount_cents,
            status: ContractStatus::PendingSignatures,
            client_signed_at: None,
            provider_signed_at: None,
            created_at: Utc::now(),
        };
        self.contracts
            .write()
            .unwrap()
            .insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn set_client_signed(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut contracts = self.contracts.write().unwrap();
        let contract = contracts
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Contract {}", id)))?;
        contract.client_signed_at = Some(at);
        Ok(())
    }

    async fn set_provider_signed(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut contracts = self.contracts.write().unwrap();
        let contract = contracts
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Contract {}", id)))?;
        contract.provider_signed_at = Some(at);
        Ok(())
    }

    async fn update_status(
        &self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<(), DomainError> {
        let mut contracts = self.contracts.write().unwrap();
        let contract = contracts
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Contract {}", id)))?;
        contract.status = status;
        Ok(())
    }

    async fn find_milestones(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<Milestone>, DomainError> {
        let mut found = self
            .milestones
            .read()
            .unwrap()
            .get(contract_id)
            .cloned()
            .unwrap_or_default();
        found.sort_by_key(|m| m.sequence);
        Ok(found)
    }

    async fn create_milestones(
        &self,
        new_milestones: &[NewMilestone],
    ) -> Result<Vec<Milestone>, DomainError> {
        let mut created = Vec::with_capacity(new_milestones.len());
        let mut milestones = self.milestones.write().unwrap();
        for new_milestone in new_milestones {
            let milestone = Milestone {
                id: MilestoneId::new(),
                contract_id: new_milestone.contract_id,
                sequence: new_milestone.sequence,
                description: new_milestone.description.clone(),
                amount_cents: new_milestone.amount_cents,
                due_date: new_milestone.due_date,
                status: MilestoneStatus::Pending,
                paid_at: None,
            };
            milestones
                .entry(milestone.contract_id)
                .or_default()
                .push(milestone.clone());
            created.push(milestone);
        }
        Ok(created)
    }

    async fn mark_milestone_paid(
        &self,
        contract_id: &ContractId,
        sequence: i32,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut milestones = self.milestones.write().unwrap();
        let for_contract = milestones
            .get_mut(contract_id)
            .ok_or_else(|| DomainError::NotFound(format!("Contract {}", contract_id)))?;
        let milestone = for_contract
            .iter_mut()
            .find(|m| m.sequence == sequence)
            .ok_or_else(|| DomainError::NotFound(format!("Milestone {}", sequence)))?;
        milestone.status = MilestoneStatus::Paid;
        milestone.paid_at = Some(at);
        Ok(())
    }
}

// ============================================================================
// In-Memory Review Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<HashMap<ReviewId, Review>>>,
    votes: Arc<RwLock<HashMap<(ReviewId, UserId), ReviewVote>>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a review for testing
    pub fn with_review(self, review: Review) -> Self {
        self.reviews.write().unwrap().insert(review.id, review);
        self
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.reviews.read().unwrap().get(id).cloned())
    }

    async fn find_by_reviewer(
        &self,
        reviewer_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Review>, DomainError> {
        let mut found: Vec<Review> = self
            .reviews
            .read()
            .unwrap()
            .values()
            .filter(|r| r.reviewer_id == *reviewer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(found, limit, offset))
    }

    async fn find_by_reviewee(
        &self,
        reviewee_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Review>, DomainError> {
        let mut found: Vec<Review> = self
            .reviews
            .read()
            .unwrap()
            .values()
            .filter(|r| r.reviewee_id == *reviewee_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(found, limit, offset))
    }

    async fn find_all_by_reviewee(
        &self,
        reviewee_id: &UserId,
    ) -> Result<Vec<Review>, DomainError> {
        Ok(self
            .reviews
            .read()
            .unwrap()
            .values()
            .filter(|r| r.reviewee_id == *reviewee_id)
            .cloned()
            .collect())
    }

    async fn exists_for_contract_and_reviewer(
        &self,
        contract_id: &ContractId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .reviews
            .read()
            .unwrap()
            .values()
            .any(|r| r.contract_id == *contract_id && r.reviewer_id == *reviewer_id))
    }

    async fn create(&self, new_review: &NewReview) -> Result<Review, DomainError> {
        let review = Review {
            id: ReviewId::new(),
            contract_id: new_review.contract_id,
            reviewer_id: new_review.reviewer_id,
            reviewee_id: new_review.reviewee_id,
            rating: new_review.rating,
            dimensions: new_review.dimensions,
            comment: new_review.comment.clone(),
            created_at: Utc::now(),
        };
        self.reviews
            .write()
            .unwrap()
            .insert(review.id, review.clone());
        Ok(review)
    }

    async fn create_vote(&self, new_vote: &NewReviewVote) -> Result<ReviewVote, DomainError> {
        let vote = ReviewVote {
            review_id: new_vote.review_id,
            voter_id: new_vote.voter_id,
            helpful: new_vote.helpful,
            created_at: Utc::now(),
        };
        self.votes
            .write()
            .unwrap()
            .insert((vote.review_id, vote.voter_id), vote.clone());
        Ok(vote)
    }

    async fn has_voted(
        &self,
        review_id: &ReviewId,
        voter_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .votes
            .read()
            .unwrap()
            .contains_key(&(*review_id, *voter_id)))
    }

    async fn vote_counts(&self, review_id: &ReviewId) -> Result<VoteCounts, DomainError> {
        let votes = self.votes.read().unwrap();
        let mut counts = VoteCounts::default();
        for vote in votes.values().filter(|v| v.review_id == *review_id) {
            if vote.helpful {
                counts.helpful += 1;
            } else {
                counts.unhelpful += 1;
            }
        }
        Ok(counts)
    }

    async fn helpful_votes_for_reviewee(
        &self,
        reviewee_id: &UserId,
    ) -> Result<i64, DomainError> {
        let reviews = self.reviews.read().unwrap();
        let votes = self.votes.read().unwrap();
        Ok(votes
            .values()
            .filter(|v| {
                v.helpful
                    && reviews
                        .get(&v.review_id)
                        .map(|r| r.reviewee_id == *reviewee_id)
                        .unwrap_or(false)
            })
            .count() as i64)
    }
}

// ============================================================================
// Mock Verification Bureaus
// ============================================================================

/// Bureau returning the same configured score per dimension
pub struct FixedBureau {
    pub registry: i32,
    pub financial: i32,
    pub certifications: i32,
    pub references: i32,
}

#[async_trait]
impl VerificationBureau for FixedBureau {
    async fn registry_standing(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Ok(BureauScore {
            score: self.registry,
            note: None,
        })
    }

    async fn financial_standing(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Ok(BureauScore {
            score: self.financial,
            note: None,
        })
    }

    async fn certification_validity(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Ok(BureauScore {
            score: self.certifications,
            note: None,
        })
    }

    async fn reference_checks(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Ok(BureauScore {
            score: self.references,
            note: None,
        })
    }
}

/// Bureau that fails every lookup
pub struct FailingBureau;

impl FailingBureau {
    fn err() -> VerifierError {
        VerifierError::Api {
            status: 503,
            message: "bureau offline".to_string(),
        }
    }
}

#[async_trait]
impl VerificationBureau for FailingBureau {
    async fn registry_standing(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Err(Self::err())
    }

    async fn financial_standing(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Err(Self::err())
    }

    async fn certification_validity(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Err(Self::err())
    }

    async fn reference_checks(
        &self,
        _profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Err(Self::err())
    }
}
