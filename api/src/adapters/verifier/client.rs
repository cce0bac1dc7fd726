//! Verification bureau API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::ProviderProfile;
use crate::domain::ports::{BureauScore, VerificationBureau};
use crate::error::VerifierError;

/// HTTP client for the external verification bureau
pub struct BureauClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl BureauClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    /// Registration number is the bureau's lookup key; a profile without
    /// one cannot be verified live.
    fn registration_number<'a>(
        &self,
        profile: &'a ProviderProfile,
    ) -> Result<&'a str, VerifierError> {
        profile
            .registration_number
            .as_deref()
            .ok_or_else(|| VerifierError::ProviderNotFound(profile.user_id.to_string()))
    }

    async fn fetch_score(&self, path: &str) -> Result<BureauScore, VerifierError> {
        let response = self
            .http
            .get(self.api_url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: ScoreResponse = response
                .json()
                .await
                .map_err(|e| VerifierError::Deserialization(e.to_string()))?;
            Ok(BureauScore {
                score: body.score.clamp(0, 100),
                note: body.note,
            })
        } else if status.as_u16() == 401 {
            Err(VerifierError::Unauthorized)
        } else if status.as_u16() == 404 {
            Err(VerifierError::ProviderNotFound(path.to_string()))
        } else if status.as_u16() == 429 {
            Err(VerifierError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(VerifierError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[derive(Deserialize)]
struct ScoreResponse {
    score: i32,
    #[serde(default)]
    note: Option<String>,
}

#[async_trait]
impl VerificationBureau for BureauClient {
    async fn registry_standing(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let reg = self.registration_number(profile)?;
        self.fetch_score(&format!("/firms/{}/registry", reg)).await
    }

    async fn financial_standing(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let reg = self.registration_number(profile)?;
        self.fetch_score(&format!("/firms/{}/financial", reg)).await
    }

    async fn certification_validity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let reg = self.registration_number(profile)?;
        self.fetch_score(&format!("/firms/{}/certifications", reg))
            .await
    }

    async fn reference_checks(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let reg = self.registration_number(profile)?;
        self.fetch_score(&format!("/firms/{}/references", reg))
            .await
    }
}
