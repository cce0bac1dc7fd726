//! Contract service
//!
//! Generates the contract from an accepted quotation and its due-diligence
//! report, then drives signing, milestone payments, and completion. The
//! payment schedule depends on the assessed risk level, and milestone
//! amounts always sum exactly to the contract total.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::app::policy::{milestone_plan, termination_notice_days};
use crate::domain::entities::{
    Contract, ContractId, ContractStatus, ContractTerms, Milestone, MilestoneStatus, NewContract,
    NewMilestone, Project, ProjectStatus, Quotation, QuotationId, QuotationStatus, User, UserRole,
};
use crate::domain::ports::{
    ContractRepository, DueDiligenceRepository, ProjectRepository, QuotationRepository,
};
use crate::error::{AppError, DomainError};

/// A contract together with its milestone schedule
#[derive(Debug, serde::Serialize)]
pub struct ContractView {
    pub contract: Contract,
    pub milestones: Vec<Milestone>,
}

/// Service for contract generation and lifecycle
pub struct ContractService<CR, QR, PR, DR>
where
    CR: ContractRepository,
    QR: QuotationRepository,
    PR: ProjectRepository,
    DR: DueDiligenceRepository,
{
    contracts: Arc<CR>,
    quotations: Arc<QR>,
    projects: Arc<PR>,
    reports: Arc<DR>,
}

impl<CR, QR, PR, DR> ContractService<CR, QR, PR, DR>
where
    CR: ContractRepository,
    QR: QuotationRepository,
    PR: ProjectRepository,
    DR: DueDiligenceRepository,
{
    pub fn new(contracts: Arc<CR>, quotations: Arc<QR>, projects: Arc<PR>, reports: Arc<DR>) -> Self {
        Self {
            contracts,
            quotations,
            projects,
            reports,
        }
    }

    /// Generate the contract for an accepted quotation. Project owner only;
    /// requires an existing due-diligence report and allows one contract per
    /// quotation.
    pub async fn create(
        &self,
        user: &User,
        quotation_id: &QuotationId,
    ) -> Result<ContractView, AppError> {
        let quotation = self.require_quotation(quotation_id).await?;
        let project = self.require_project(&quotation).await?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the project owner can generate the contract".to_string(),
            ));
        }
        if quotation.status != QuotationStatus::Accepted {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Contract generation requires an accepted quotation, this one is {}",
                quotation.status
            ))));
        }
        if self.contracts.find_by_quotation(quotation_id).await?.is_some() {
            return Err(AppError::Domain(DomainError::Conflict(
                "A contract already exists for this quotation".to_string(),
            )));
        }
        let report = self
            .reports
            .find_by_quotation(quotation_id)
            .await?
            .ok_or_else(|| {
                AppError::Domain(DomainError::Conflict(
                    "Run due diligence before generating the contract".to_string(),
                ))
            })?;

        let schedule = milestone_plan(report.risk_level);
        let terms = ContractTerms {
            scope: project.description.clone(),
            total_amount_cents: quotation.amount_cents,
            estimated_days: quotation.estimated_days,
            risk_level: report.risk_level,
            termination_notice_days: termination_notice_days(report.risk_level),
            payment_schedule_percents: schedule.to_vec(),
        };

        let contract = self
            .contracts
            .create(&NewContract {
                quotation_id: *quotation_id,
                project_id: project.id,
                client_id: project.client_id,
                provider_id: quotation.provider_id,
                terms,
                total_amount_cents: quotation.amount_cents,
            })
            .await?;

        let milestones = self
            .contracts
            .create_milestones(&build_milestones(&contract, schedule))
            .await?;

        tracing::info!(
            contract_id = %contract.id,
            quotation_id = %quotation_id,
            risk_level = %contract.terms.risk_level,
            milestones = milestones.len(),
            "Contract generated"
        );
        Ok(ContractView {
            contract,
            milestones,
        })
    }

    /// Record the calling party's signature. When both parties have signed,
    /// the contract goes active and the project moves to in_progress.
    pub async fn sign(&self, user: &User, id: &ContractId) -> Result<ContractView, AppError> {
        let contract = self.require_party_contract(user, id).await?;
        if contract.status != ContractStatus::PendingSignatures {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Contract is {}, not awaiting signatures",
                contract.status
            ))));
        }

        let now = Utc::now();
        match user.role {
            UserRole::Client => {
                if contract.client_signed() {
                    return Err(AppError::Domain(DomainError::Conflict(
                        "You have already signed this contract".to_string(),
                    )));
                }
                self.contracts.set_client_signed(id, now).await?;
            }
            UserRole::Provider => {
                if contract.provider_signed() {
                    return Err(AppError::Domain(DomainError::Conflict(
                        "You have already signed this contract".to_string(),
                    )));
                }
                self.contracts.set_provider_signed(id, now).await?;
            }
        }

        let contract = self.require_party_contract(user, id).await?;
        if contract.all_signed() {
            self.contracts
                .update_status(id, ContractStatus::Active)
                .await?;
            self.projects
                .update_status(&contract.project_id, ProjectStatus::InProgress)
                .await?;
            tracing::info!(contract_id = %id, "Contract fully signed, now active");
        }

        self.view(user, id).await
    }

    /// Pay the next milestone. Client only, contract must be active, and
    /// milestones settle strictly in sequence.
    pub async fn pay_milestone(
        &self,
        user: &User,
        id: &ContractId,
        sequence: i32,
    ) -> Result<ContractView, AppError> {
        let contract = self.require_party_contract(user, id).await?;
        if contract.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the client pays milestones".to_string(),
            ));
        }
        if contract.status != ContractStatus::Active {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Contract is {}, milestones are only payable while active",
                contract.status
            ))));
        }

        let milestones = self.contracts.find_milestones(id).await?;
        let target = milestones
            .iter()
            .find(|m| m.sequence == sequence)
            .ok_or_else(|| AppError::NotFound(format!("No milestone {} on contract", sequence)))?;
        if target.status == MilestoneStatus::Paid {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Milestone {} is already paid",
                sequence
            ))));
        }
        if let Some(unpaid_before) = milestones
            .iter()
            .find(|m| m.sequence < sequence && m.status != MilestoneStatus::Paid)
        {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Milestone {} must be paid first",
                unpaid_before.sequence
            ))));
        }

        self.contracts
            .mark_milestone_paid(id, sequence, Utc::now())
            .await?;
        tracing::info!(contract_id = %id, sequence, "Milestone paid");
        self.view(user, id).await
    }

    /// Complete the contract once every milestone is paid. Either party may
    /// complete; the project completes with it.
    pub async fn complete(&self, user: &User, id: &ContractId) -> Result<ContractView, AppError> {
        let contract = self.require_party_contract(user, id).await?;
        if contract.status != ContractStatus::Active {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Contract is {}, only active contracts complete",
                contract.status
            ))));
        }
        let milestones = self.contracts.find_milestones(id).await?;
        if milestones.iter().any(|m| m.status != MilestoneStatus::Paid) {
            return Err(AppError::Domain(DomainError::Conflict(
                "All milestones must be paid before completion".to_string(),
            )));
        }

        self.contracts
            .update_status(id, ContractStatus::Completed)
            .await?;
        self.projects
            .update_status(&contract.project_id, ProjectStatus::Completed)
            .await?;
        tracing::info!(contract_id = %id, "Contract completed");
        self.view(user, id).await
    }

    /// Terminate the contract. Either party may terminate while signatures
    /// are pending or while the contract is active; the notice period in
    /// the terms governs the wind-down.
    pub async fn terminate(&self, user: &User, id: &ContractId) -> Result<ContractView, AppError> {
        let contract = self.require_party_contract(user, id).await?;
        if !contract.status.can_transition_to(ContractStatus::Terminated) {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Contract is {}, it can no longer be terminated",
                contract.status
            ))));
        }

        self.contracts
            .update_status(id, ContractStatus::Terminated)
            .await?;
        tracing::info!(
            contract_id = %id,
            notice_days = contract.terms.termination_notice_days,
            "Contract terminated"
        );
        self.view(user, id).await
    }

    /// Fetch a contract with milestones. Parties only.
    pub async fn view(&self, user: &User, id: &ContractId) -> Result<ContractView, AppError> {
        let contract = self.require_party_contract(user, id).await?;
        let milestones = self.contracts.find_milestones(id).await?;
        Ok(ContractView {
            contract,
            milestones,
        })
    }

    /// Contracts where the caller is a party, newest first
    pub async fn list_mine(&self, user: &User) -> Result<Vec<Contract>, AppError> {
        Ok(self.contracts.find_by_party(&user.id).await?)
    }

    async fn require_party_contract(
        &self,
        user: &User,
        id: &ContractId,
    ) -> Result<Contract, AppError> {
        let contract = self
            .contracts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contract {} not found", id)))?;
        if !contract.is_party(&user.id) {
            return Err(AppError::Forbidden(
                "Only contract parties can access this contract".to_string(),
            ));
        }
        Ok(contract)
    }

    async fn require_quotation(&self, id: &QuotationId) -> Result<Quotation, AppError> {
        self.quotations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quotation {} not found", id)))
    }

    async fn require_project(&self, quotation: &Quotation) -> Result<Project, AppError> {
        self.projects
            .find_by_id(&quotation.project_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Project {} not found", quotation.project_id))
            })
    }
}

/// Build the milestone schedule from the percentage plan. Integer division
/// leaves a remainder; the final milestone absorbs it so the amounts sum
/// exactly to the contract total.
fn build_milestones(contract: &Contract, schedule: &[i32]) -> Vec<NewMilestone> {
    let total = contract.total_amount_cents;
    let count = schedule.len() as i64;
    let start = contract.created_at;
    let span_days = contract.terms.estimated_days as i64;

    let mut allocated = 0i64;
    schedule
        .iter()
        .enumerate()
        .map(|(i, pct)| {
            let sequence = i as i32 + 1;
            let amount = if i as i64 == count - 1 {
                total - allocated
            } else {
                total * (*pct as i64) / 100
            };
            allocated += amount;
            NewMilestone {
                contract_id: contract.id,
                sequence,
                description: format!("Milestone {} of {} ({}%)", sequence, count, pct),
                amount_cents: amount,
                due_date: start + Duration::days(span_days * sequence as i64 / count),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RiskLevel;
    use crate::test_utils::{
        accepted_quotation, due_diligence_report, test_client_user, test_open_project,
        test_provider_user, InMemoryContractRepository, InMemoryDueDiligenceRepository,
        InMemoryProjectRepository, InMemoryQuotationRepository,
    };

    type Service = ContractService<
        InMemoryContractRepository,
        InMemoryQuotationRepository,
        InMemoryProjectRepository,
        InMemoryDueDiligenceRepository,
    >;

    struct Setup {
        service: Service,
        projects: Arc<InMemoryProjectRepository>,
        client: User,
        provider: User,
        quotation: Quotation,
    }

    fn setup(risk: RiskLevel) -> Setup {
        let client = test_client_user();
        let provider = test_provider_user();
        let mut project = test_open_project(&client.id);
        project.status = ProjectStatus::QuotationAccepted;
        let quotation = accepted_quotation(&project.id, &provider.id);
        let report = due_diligence_report(&quotation.id, &provider.id, risk);

        let projects = Arc::new(InMemoryProjectRepository::new().with_project(project));
        let service = ContractService::new(
            Arc::new(InMemoryContractRepository::new()),
            Arc::new(InMemoryQuotationRepository::new().with_quotation(quotation.clone())),
            projects.clone(),
            Arc::new(InMemoryDueDiligenceRepository::new().with_report(report)),
        );

        Setup {
            service,
            projects,
            client,
            provider,
            quotation,
        }
    }

    #[tokio::test]
    async fn create_generates_terms_and_schedule() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();

        assert_eq!(view.contract.status, ContractStatus::PendingSignatures);
        assert_eq!(view.contract.terms.risk_level, RiskLevel::Low);
        assert_eq!(view.contract.terms.payment_schedule_percents, vec![30, 40, 30]);
        assert_eq!(view.contract.terms.termination_notice_days, 30);
        assert_eq!(view.milestones.len(), 3);
    }

    #[tokio::test]
    async fn high_risk_gets_five_milestones() {
        let s = setup(RiskLevel::High);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        assert_eq!(view.milestones.len(), 5);
        assert_eq!(
            view.contract.terms.payment_schedule_percents,
            vec![10, 25, 25, 25, 15]
        );
    }

    #[tokio::test]
    async fn milestone_amounts_sum_to_total() {
        // A total that does not divide evenly by the schedule percentages
        let s = setup(RiskLevel::Medium);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();

        let sum: i64 = view.milestones.iter().map(|m| m.amount_cents).sum();
        assert_eq!(sum, view.contract.total_amount_cents);
    }

    #[tokio::test]
    async fn remainder_lands_on_final_milestone() {
        let contract = Contract {
            id: ContractId::new(),
            quotation_id: QuotationId::new(),
            project_id: crate::domain::entities::ProjectId::new(),
            client_id: crate::domain::entities::UserId::new(),
            provider_id: crate::domain::entities::UserId::new(),
            terms: ContractTerms {
                scope: "scope".to_string(),
                total_amount_cents: 1_000_001,
                estimated_days: 30,
                risk_level: RiskLevel::Low,
                termination_notice_days: 30,
                payment_schedule_percents: vec![30, 40, 30],
            },
            total_amount_cents: 1_000_001,
            status: ContractStatus::PendingSignatures,
            client_signed_at: None,
            provider_signed_at: None,
            created_at: Utc::now(),
        };

        let milestones = build_milestones(&contract, &[30, 40, 30]);
        assert_eq!(milestones[0].amount_cents, 300_000);
        assert_eq!(milestones[1].amount_cents, 400_000);
        assert_eq!(milestones[2].amount_cents, 300_001);
    }

    #[tokio::test]
    async fn create_requires_due_diligence() {
        let client = test_client_user();
        let provider = test_provider_user();
        let mut project = test_open_project(&client.id);
        project.status = ProjectStatus::QuotationAccepted;
        let quotation = accepted_quotation(&project.id, &provider.id);

        let service: Service = ContractService::new(
            Arc::new(InMemoryContractRepository::new()),
            Arc::new(InMemoryQuotationRepository::new().with_quotation(quotation.clone())),
            Arc::new(InMemoryProjectRepository::new().with_project(project)),
            Arc::new(InMemoryDueDiligenceRepository::new()),
        );

        let err = service.create(&client, &quotation.id).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn one_contract_per_quotation() {
        let s = setup(RiskLevel::Low);
        s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let err = s
            .service
            .create(&s.client, &s.quotation.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn both_signatures_activate_contract_and_project() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let id = view.contract.id;

        let after_client = s.service.sign(&s.client, &id).await.unwrap();
        assert_eq!(
            after_client.contract.status,
            ContractStatus::PendingSignatures
        );
        assert!(after_client.contract.client_signed());

        let after_provider = s.service.sign(&s.provider, &id).await.unwrap();
        assert_eq!(after_provider.contract.status, ContractStatus::Active);

        let project = s
            .projects
            .find_by_id(&after_provider.contract.project_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
    }

    #[tokio::test]
    async fn double_signing_conflicts() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        s.service.sign(&s.client, &view.contract.id).await.unwrap();

        let err = s
            .service
            .sign(&s.client, &view.contract.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn milestones_settle_in_sequence() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let id = view.contract.id;
        s.service.sign(&s.client, &id).await.unwrap();
        s.service.sign(&s.provider, &id).await.unwrap();

        // paying out of order is rejected
        let err = s.service.pay_milestone(&s.client, &id, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));

        s.service.pay_milestone(&s.client, &id, 1).await.unwrap();
        let after = s.service.pay_milestone(&s.client, &id, 2).await.unwrap();
        assert_eq!(
            after
                .milestones
                .iter()
                .filter(|m| m.status == MilestoneStatus::Paid)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn provider_cannot_pay_milestones() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let id = view.contract.id;
        s.service.sign(&s.client, &id).await.unwrap();
        s.service.sign(&s.provider, &id).await.unwrap();

        let err = s
            .service
            .pay_milestone(&s.provider, &id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn completion_requires_all_milestones_paid() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let id = view.contract.id;
        s.service.sign(&s.client, &id).await.unwrap();
        s.service.sign(&s.provider, &id).await.unwrap();

        let err = s.service.complete(&s.client, &id).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));

        for seq in 1..=3 {
            s.service.pay_milestone(&s.client, &id, seq).await.unwrap();
        }
        let done = s.service.complete(&s.client, &id).await.unwrap();
        assert_eq!(done.contract.status, ContractStatus::Completed);

        let project = s
            .projects
            .find_by_id(&done.contract.project_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[tokio::test]
    async fn either_party_can_terminate_before_signing() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();

        let view = s
            .service
            .terminate(&s.provider, &view.contract.id)
            .await
            .unwrap();
        assert_eq!(view.contract.status, ContractStatus::Terminated);
    }

    #[tokio::test]
    async fn active_contracts_can_be_terminated() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let id = view.contract.id;
        s.service.sign(&s.client, &id).await.unwrap();
        s.service.sign(&s.provider, &id).await.unwrap();

        let view = s.service.terminate(&s.client, &id).await.unwrap();
        assert_eq!(view.contract.status, ContractStatus::Terminated);

        // nothing settles on a terminated contract
        let err = s.service.pay_milestone(&s.client, &id, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn completed_contracts_cannot_be_terminated() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();
        let id = view.contract.id;
        s.service.sign(&s.client, &id).await.unwrap();
        s.service.sign(&s.provider, &id).await.unwrap();
        for seq in 1..=3 {
            s.service.pay_milestone(&s.client, &id, seq).await.unwrap();
        }
        s.service.complete(&s.client, &id).await.unwrap();

        let err = s.service.terminate(&s.client, &id).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn outsiders_cannot_view_contracts() {
        let s = setup(RiskLevel::Low);
        let view = s.service.create(&s.client, &s.quotation.id).await.unwrap();

        let stranger = test_client_user();
        let err = s
            .service
            .view(&stranger, &view.contract.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
