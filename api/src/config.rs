use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the external verification bureau API
    pub verifier_url: String,
    /// API key for the verification bureau (empty disables live lookups)
    pub verifier_api_key: String,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            verifier_url: env::var("VERIFIER_URL")
                .unwrap_or_else(|_| "http://localhost:9400".to_string()),
            verifier_api_key: env::var("VERIFIER_API_KEY").unwrap_or_default(),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(crate::app::policy::DEFAULT_SESSION_TTL_HOURS),
        }
    }

    /// Check if live bureau lookups are configured
    pub fn verifier_enabled(&self) -> bool {
        !self.verifier_api_key.is_empty()
    }
}
