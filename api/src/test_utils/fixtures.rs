//! Test data factories
//!
//! Factory functions producing fully-populated domain entities for tests.

use chrono::Utc;

use crate::app::policy::{CLIENT_WIZARD_STEPS, PROVIDER_WIZARD_STEPS};
use crate::domain::entities::{
    Certification, ClientProfile, ClientProfileId, CompanySize, Contract, ContractId,
    ContractStatus, ContractTerms, DueDiligenceReport, Project, ProjectId, ProjectStatus,
    ProviderProfile, ProviderProfileId, Quotation, QuotationId, QuotationStatus, ReportId,
    RiskLevel, User, UserId, UserRole, VerificationScores,
};

pub fn test_client_user() -> User {
    User {
        id: UserId::new(),
        email: "ops@acme.example".to_string(),
        display_name: "Acme Operations".to_string(),
        role: UserRole::Client,
        password_hash: "salt$hash".to_string(),
        created_at: Utc::now(),
        last_seen_at: None,
    }
}

pub fn test_provider_user() -> User {
    User {
        id: UserId::new(),
        email: "bids@hanaworks.example".to_string(),
        display_name: "HanaWorks Consulting".to_string(),
        role: UserRole::Provider,
        password_hash: "salt$hash".to_string(),
        created_at: Utc::now(),
        last_seen_at: None,
    }
}

/// A completed provider profile with a registration number for bureau lookups
pub fn test_provider_profile() -> ProviderProfile {
    completed_provider_profile(&UserId::new())
}

pub fn completed_client_profile(user_id: &UserId) -> ClientProfile {
    let now = Utc::now();
    ClientProfile {
        id: ClientProfileId::new(),
        user_id: *user_id,
        company_name: Some("Acme Manufacturing GmbH".to_string()),
        industry: Some("Manufacturing".to_string()),
        company_size: Some(CompanySize::Large),
        sap_modules_needed: vec!["FI".to_string(), "MM".to_string()],
        budget_min_cents: Some(2_000_000),
        budget_max_cents: Some(10_000_000),
        preferred_start: None,
        onboarding_step: CLIENT_WIZARD_STEPS,
        completed: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn completed_provider_profile(user_id: &UserId) -> ProviderProfile {
    let now = Utc::now();
    ProviderProfile {
        id: ProviderProfileId::new(),
        user_id: *user_id,
        firm_name: Some("HanaWorks Consulting".to_string()),
        registration_number: Some("HRB-204991".to_string()),
        country: Some("DE".to_string()),
        years_experience: Some(12),
        consultant_count: Some(25),
        sap_modules: vec!["FI".to_string(), "MM".to_string(), "SD".to_string()],
        certifications: vec![Certification {
            name: "SAP Certified Application Associate".to_string(),
            issued_by: "SAP".to_string(),
            year: 2023,
        }],
        hourly_rate_min_cents: Some(12_000),
        hourly_rate_max_cents: Some(22_000),
        onboarding_step: PROVIDER_WIZARD_STEPS,
        completed: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_open_project(client_id: &UserId) -> Project {
    Project {
        id: ProjectId::new(),
        client_id: *client_id,
        title: "S/4HANA finance migration".to_string(),
        description: "Migrate FI/CO from ECC to S/4HANA".to_string(),
        sap_module: "FI".to_string(),
        budget_min_cents: 2_000_000,
        budget_max_cents: 10_000_000,
        expected_duration_days: 90,
        status: ProjectStatus::Open,
        created_at: Utc::now(),
    }
}

/// An accepted quotation; the amount is not evenly divisible by the
/// milestone schedules so remainder handling gets exercised
pub fn accepted_quotation(project_id: &ProjectId, provider_id: &UserId) -> Quotation {
    Quotation {
        id: QuotationId::new(),
        project_id: *project_id,
        provider_id: *provider_id,
        amount_cents: 8_000_001,
        estimated_days: 75,
        proposal: "Fixed-bid migration with hypercare".to_string(),
        status: QuotationStatus::Accepted,
        created_at: Utc::now(),
        decided_at: Some(Utc::now()),
    }
}

pub fn due_diligence_report(
    quotation_id: &QuotationId,
    provider_id: &UserId,
    risk_level: RiskLevel,
) -> DueDiligenceReport {
    let scores = match risk_level {
        RiskLevel::Low => VerificationScores {
            registry: 90,
            financial: 85,
            certifications: 88,
            references: 92,
        },
        RiskLevel::Medium => VerificationScores {
            registry: 60,
            financial: 55,
            certifications: 65,
            references: 58,
        },
        RiskLevel::High => VerificationScores {
            registry: 30,
            financial: 25,
            certifications: 35,
            references: 28,
        },
    };
    DueDiligenceReport {
        id: ReportId::new(),
        quotation_id: *quotation_id,
        provider_id: *provider_id,
        scores,
        overall_score: scores.weighted_overall(),
        risk_level,
        flags: scores.flags(),
        simulated: false,
        created_at: Utc::now(),
    }
}

pub fn completed_contract(client_id: &UserId, provider_id: &UserId) -> Contract {
    let now = Utc::now();
    Contract {
        id: ContractId::new(),
        quotation_id: QuotationId::new(),
        project_id: ProjectId::new(),
        client_id: *client_id,
        provider_id: *provider_id,
        terms: ContractTerms {
            scope: "Migrate FI/CO from ECC to S/4HANA".to_string(),
            total_amount_cents: 8_000_001,
            estimated_days: 75,
            risk_level: RiskLevel::Low,
            termination_notice_days: 30,
            payment_schedule_percents: vec![30, 40, 30],
        },
        total_amount_cents: 8_000_001,
        status: ContractStatus::Completed,
        client_signed_at: Some(now),
        provider_signed_at: Some(now),
        created_at: now,
    }
}
