//! Onboarding service
//!
//! Drives the client and provider profile wizards. Progression is strictly
//! linear: each submission validates the payload for the profile's current
//! step and advances by exactly one. The last step is a review screen, so
//! completion is a separate operation gated on reaching it.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use crate::app::policy::{CLIENT_WIZARD_STEPS, PROVIDER_WIZARD_STEPS};
use crate::domain::entities::{
    Certification, ClientProfile, CompanySize, NewClientProfile, NewProviderProfile,
    ProviderProfile, User,
};
use crate::domain::ports::{ClientProfileRepository, ProviderProfileRepository};
use crate::error::{AppError, FieldError};

/// Payload for a client wizard step; which variant is expected depends on
/// the profile's current step.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientStepPayload {
    CompanyInfo {
        company_name: String,
        industry: String,
        company_size: CompanySize,
    },
    ModulesNeeded {
        sap_modules_needed: Vec<String>,
    },
    BudgetTimeline {
        budget_min_cents: i64,
        budget_max_cents: i64,
        preferred_start: Option<DateTime<Utc>>,
    },
}

/// Payload for a provider wizard step
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProviderStepPayload {
    FirmInfo {
        firm_name: String,
        registration_number: Option<String>,
        country: String,
    },
    Expertise {
        sap_modules: Vec<String>,
        certifications: Vec<Certification>,
        years_experience: i32,
    },
    RatesCapacity {
        hourly_rate_min_cents: i64,
        hourly_rate_max_cents: i64,
        consultant_count: i32,
    },
}

/// Service driving both onboarding wizards
pub struct OnboardingService<CR, PR>
where
    CR: ClientProfileRepository,
    PR: ProviderProfileRepository,
{
    client_profiles: Arc<CR>,
    provider_profiles: Arc<PR>,
}

impl<CR, PR> OnboardingService<CR, PR>
where
    CR: ClientProfileRepository,
    PR: ProviderProfileRepository,
{
    pub fn new(client_profiles: Arc<CR>, provider_profiles: Arc<PR>) -> Self {
        Self {
            client_profiles,
            provider_profiles,
        }
    }

    /// Begin the client wizard, or return the existing profile unchanged
    pub async fn start_client(&self, user: &User) -> Result<ClientProfile, AppError> {
        if !user.is_client() {
            return Err(AppError::Forbidden(
                "Only client accounts can start the client wizard".to_string(),
            ));
        }
        if let Some(existing) = self.client_profiles.find_by_user(&user.id).await? {
            return Ok(existing);
        }
        let profile = self
            .client_profiles
            .create(&NewClientProfile { user_id: user.id })
            .await?;
        tracing::info!(user_id = %user.id, "Client onboarding started");
        Ok(profile)
    }

    /// Submit the payload for the client's current step and advance by one
    pub async fn submit_client_step(
        &self,
        user: &User,
        payload: ClientStepPayload,
    ) -> Result<ClientProfile, AppError> {
        let mut profile = self.require_client_profile(user).await?;

        if profile.completed {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                "Onboarding is already complete".to_string(),
            )));
        }
        if profile.is_final_step() {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                "Wizard is at the review step; call complete".to_string(),
            )));
        }

        match (profile.onboarding_step, payload) {
            (
                1,
                ClientStepPayload::CompanyInfo {
                    company_name,
                    industry,
                    company_size,
                },
            ) => {
                let mut fields = Vec::new();
                if company_name.trim().is_empty() || company_name.len() > 200 {
                    fields.push(FieldError::new(
                        "company_name",
                        "must be between 1 and 200 characters",
                    ));
                }
                if industry.trim().is_empty() {
                    fields.push(FieldError::new("industry", "must not be empty"));
                }
                if !fields.is_empty() {
                    return Err(AppError::Fields(fields));
                }
                profile.company_name = Some(company_name.trim().to_string());
                profile.industry = Some(industry.trim().to_string());
                profile.company_size = Some(company_size);
            }
            (2, ClientStepPayload::ModulesNeeded { sap_modules_needed }) => {
                validate_modules("sap_modules_needed", &sap_modules_needed)?;
                profile.sap_modules_needed = normalize_modules(sap_modules_needed);
            }
            (
                3,
                ClientStepPayload::BudgetTimeline {
                    budget_min_cents,
                    budget_max_cents,
                    preferred_start,
                },
            ) => {
                validate_money_range(
                    "budget_min_cents",
                    budget_min_cents,
                    "budget_max_cents",
                    budget_max_cents,
                )?;
                profile.budget_min_cents = Some(budget_min_cents);
                profile.budget_max_cents = Some(budget_max_cents);
                profile.preferred_start = preferred_start;
            }
            (step, _) => {
                return Err(AppError::BadRequest(format!(
                    "Payload does not match wizard step {}",
                    step
                )));
            }
        }

        profile.onboarding_step += 1;
        Ok(self.client_profiles.save(&profile).await?)
    }

    /// Current client wizard state
    pub async fn client_status(&self, user: &User) -> Result<ClientProfile, AppError> {
        self.require_client_profile(user).await
    }

    /// Mark the client wizard complete; only valid from the review step
    pub async fn complete_client(&self, user: &User) -> Result<ClientProfile, AppError> {
        let mut profile = self.require_client_profile(user).await?;
        if profile.completed {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                "Onboarding is already complete".to_string(),
            )));
        }
        if !profile.is_final_step() {
            return Err(AppError::BadRequest(format!(
                "Wizard is at step {} of {}",
                profile.onboarding_step, CLIENT_WIZARD_STEPS
            )));
        }
        profile.completed = true;
        let profile = self.client_profiles.save(&profile).await?;
        tracing::info!(user_id = %user.id, "Client onboarding completed");
        Ok(profile)
    }

    /// Begin the provider wizard, or return the existing profile unchanged
    pub async fn start_provider(&self, user: &User) -> Result<ProviderProfile, AppError> {
        if !user.is_provider() {
            return Err(AppError::Forbidden(
                "Only provider accounts can start the provider wizard".to_string(),
            ));
        }
        if let Some(existing) = self.provider_profiles.find_by_user(&user.id).await? {
            return Ok(existing);
        }
        let profile = self
            .provider_profiles
            .create(&NewProviderProfile { user_id: user.id })
            .await?;
        tracing::info!(user_id = %user.id, "Provider onboarding started");
        Ok(profile)
    }

    /// Submit the payload for the provider's current step and advance by one
    pub async fn submit_provider_step(
        &self,
        user: &User,
        payload: ProviderStepPayload,
    ) -> Result<ProviderProfile, AppError> {
        let mut profile = self.require_provider_profile(user).await?;

        if profile.completed {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                "Onboarding is already complete".to_string(),
            )));
        }
        if profile.is_final_step() {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                "Wizard is at the review step; call complete".to_string(),
            )));
        }

        match (profile.onboarding_step, payload) {
            (
                1,
                ProviderStepPayload::FirmInfo {
                    firm_name,
                    registration_number,
                    country,
                },
            ) => {
                let mut fields = Vec::new();
                if firm_name.trim().is_empty() || firm_name.len() > 200 {
                    fields.push(FieldError::new(
                        "firm_name",
                        "must be between 1 and 200 characters",
                    ));
                }
                if country.trim().is_empty() {
                    fields.push(FieldError::new("country", "must not be empty"));
                }
                if let Some(reg) = &registration_number {
                    if reg.trim().is_empty() {
                        fields.push(FieldError::new(
                            "registration_number",
                            "must not be empty when provided",
                        ));
                    }
                }
                if !fields.is_empty() {
                    return Err(AppError::Fields(fields));
                }
                profile.firm_name = Some(firm_name.trim().to_string());
                profile.registration_number =
                    registration_number.map(|r| r.trim().to_string());
                profile.country = Some(country.trim().to_string());
            }
            (
                2,
                ProviderStepPayload::Expertise {
                    sap_modules,
                    certifications,
                    years_experience,
                },
            ) => {
                let mut fields = Vec::new();
                if let Err(AppError::Fields(mut f)) =
                    validate_modules("sap_modules", &sap_modules)
                {
                    fields.append(&mut f);
                }
                if !(0..=60).contains(&years_experience) {
                    fields.push(FieldError::new(
                        "years_experience",
                        "must be between 0 and 60",
                    ));
                }
                let current_year = Utc::now().year();
                for cert in &certifications {
                    if cert.name.trim().is_empty()
                        || !(1990..=current_year).contains(&cert.year)
                    {
                        fields.push(FieldError::new(
                            "certifications",
                            "each certification needs a name and a plausible year",
                        ));
                        break;
                    }
                }
                if !fields.is_empty() {
                    return Err(AppError::Fields(fields));
                }
                profile.sap_modules = normalize_modules(sap_modules);
                profile.certifications = certifications;
                profile.years_experience = Some(years_experience);
            }
            (
                3,
                ProviderStepPayload::RatesCapacity {
                    hourly_rate_min_cents,
                    hourly_rate_max_cents,
                    consultant_count,
                },
            ) => {
                validate_money_range(
                    "hourly_rate_min_cents",
                    hourly_rate_min_cents,
                    "hourly_rate_max_cents",
                    hourly_rate_max_cents,
                )?;
                if consultant_count < 1 {
                    return Err(AppError::Fields(vec![FieldError::new(
                        "consultant_count",
                        "must be at least 1",
                    )]));
                }
                profile.hourly_rate_min_cents = Some(hourly_rate_min_cents);
                profile.hourly_rate_max_cents = Some(hourly_rate_max_cents);
                profile.consultant_count = Some(consultant_count);
            }
            (step, _) => {
                return Err(AppError::BadRequest(format!(
                    "Payload does not match wizard step {}",
                    step
                )));
            }
        }

        profile.onboarding_step += 1;
        Ok(self.provider_profiles.save(&profile).await?)
    }

    /// Current provider wizard state
    pub async fn provider_status(&self, user: &User) -> Result<ProviderProfile, AppError> {
        self.require_provider_profile(user).await
    }

    /// Mark the provider wizard complete; only valid from the review step
    pub async fn complete_provider(&self, user: &User) -> Result<ProviderProfile, AppError> {
        let mut profile = self.require_provider_profile(user).await?;
        if profile.completed {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                "Onboarding is already complete".to_string(),
            )));
        }
        if !profile.is_final_step() {
            return Err(AppError::BadRequest(format!(
                "Wizard is at step {} of {}",
                profile.onboarding_step, PROVIDER_WIZARD_STEPS
            )));
        }
        profile.completed = true;
        let profile = self.provider_profiles.save(&profile).await?;
        tracing::info!(user_id = %user.id, "Provider onboarding completed");
        Ok(profile)
    }

    async fn require_client_profile(&self, user: &User) -> Result<ClientProfile, AppError> {
        if !user.is_client() {
            return Err(AppError::Forbidden(
                "Only client accounts have a client profile".to_string(),
            ));
        }
        self.client_profiles
            .find_by_user(&user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Onboarding has not been started".to_string()))
    }

    async fn require_provider_profile(&self, user: &User) -> Result<ProviderProfile, AppError> {
        if !user.is_provider() {
            return Err(AppError::Forbidden(
                "Only provider accounts have a provider profile".to_string(),
            ));
        }
        self.provider_profiles
            .find_by_user(&user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Onboarding has not been started".to_string()))
    }
}

fn validate_modules(field: &'static str, modules: &[String]) -> Result<(), AppError> {
    if modules.is_empty() || modules.iter().any(|m| m.trim().is_empty()) {
        return Err(AppError::Fields(vec![FieldError::new(
            field,
            "must list at least one SAP module code",
        )]));
    }
    Ok(())
}

fn normalize_modules(modules: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    modules
        .into_iter()
        .map(|m| m.trim().to_uppercase())
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

fn validate_money_range(
    min_field: &'static str,
    min: i64,
    max_field: &'static str,
    max: i64,
) -> Result<(), AppError> {
    let mut fields = Vec::new();
    if min < 0 {
        fields.push(FieldError::new(min_field, "must not be negative"));
    }
    if max < min {
        fields.push(FieldError::new(
            max_field,
            format!("must be at least {}", min_field),
        ));
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Fields(fields))
    }
}
