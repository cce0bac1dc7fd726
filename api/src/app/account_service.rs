//! Account service
//!
//! Handles signup, login, and session management. Session tokens are
//! random and only stored hashed; passwords are salted SHA-256.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{NewSession, NewUser, User, UserId, UserRole};
use crate::domain::ports::{SessionRepository, UserRepository};
use crate::error::{AppError, FieldError};

/// Minimum password length accepted at signup
const MIN_PASSWORD_LEN: usize = 8;

/// Service for managing accounts and sessions
pub struct AccountService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    session_ttl_hours: i64,
}

impl<UR, SR> AccountService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, session_ttl_hours: i64) -> Self {
        Self {
            users,
            sessions,
            session_ttl_hours,
        }
    }

    /// Create a user and issue the first session token.
    ///
    /// All field problems are collected and reported together as a 400;
    /// a duplicate email is reported the same way.
    pub async fn signup(
        &self,
        email: &str,
        display_name: &str,
        role: UserRole,
        password: &str,
    ) -> Result<(User, String), AppError> {
        let mut fields = Vec::new();

        if !is_valid_email(email) {
            fields.push(FieldError::new("email", "must be a valid email address"));
        }
        if display_name.trim().is_empty() || display_name.len() > 100 {
            fields.push(FieldError::new(
                "display_name",
                "must be between 1 and 100 characters",
            ));
        }
        if password.len() < MIN_PASSWORD_LEN {
            fields.push(FieldError::new(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        if fields.is_empty() && self.users.find_by_email(email).await?.is_some() {
            fields.push(FieldError::new("email", "already registered"));
        }

        if !fields.is_empty() {
            return Err(AppError::Fields(fields));
        }

        let new_user = NewUser {
            email: email.to_lowercase(),
            display_name: display_name.trim().to_string(),
            role,
            password_hash: hash_password(password),
        };
        let user = self.users.create(&new_user).await?;

        let token = self.issue_session(&user.id).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed up");

        Ok((user, token))
    }

    /// Verify credentials and issue a new session token
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .users
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::Unauthorized);
        }

        let token = self.issue_session(&user.id).await?;
        Ok((user, token))
    }

    /// Revoke the session behind a raw bearer token
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions
            .delete_by_token_hash(&hash_session_token(token))
            .await?;
        Ok(())
    }

    /// Resolve a raw bearer token to its user, honoring expiry
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, AppError> {
        let Some(session) = self
            .sessions
            .find_by_token_hash(&hash_session_token(token))
            .await?
        else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            return Ok(None);
        }

        Ok(self.users.find_by_id(&session.user_id).await?)
    }

    /// Update the user's last seen timestamp
    pub async fn touch(&self, id: &UserId) -> Result<(), AppError> {
        self.users.update_last_seen(id).await?;
        Ok(())
    }

    async fn issue_session(&self, user_id: &UserId) -> Result<String, AppError> {
        let token = generate_session_token();
        let session = NewSession {
            user_id: *user_id,
            token_hash: hash_session_token(&token),
            expires_at: Utc::now() + Duration::hours(self.session_ttl_hours),
        };
        self.sessions.create(&session).await?;
        Ok(token)
    }
}

/// Generate a random session token
fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("st-{}", hex::encode(bytes))
}

/// Hash a session token for storage
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Salted password hash, stored as `salt$digest`
fn hash_password(password: &str) -> String {
    let mut rng = rand::thread_rng();
    let salt_bytes: Vec<u8> = (0..16).map(|_| rng.gen()).collect();
    let salt = hex::encode(salt_bytes);
    format!("{}${}", salt, digest_with_salt(&salt, password))
}

/// Constant-shape comparison against the stored `salt$digest`
fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    digest_with_salt(salt, password) == digest
}

fn digest_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Pragmatic email shape check: local@domain.tld
fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex");
    re.is_match(email) && email.len() <= 254
}
