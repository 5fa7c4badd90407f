//! Domain service for identity: registration, credential checks, session-bound
//! user resolution, and the well-known admin bootstrap.

use thiserror::Error;

use crate::config::BootstrapConfig;
use crate::db::User;

/// Errors specific to identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// One or more required/format violations, reported as a list.
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("Email address already exists")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateName,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for IdentityError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Registration form input; missing form fields decode to empty strings.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Domain service trait for identity and sessions.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates a new regular user after trimming/normalizing inputs.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Validation`] when a field is empty and
    /// [`IdentityError::DuplicateEmail`] / [`IdentityError::DuplicateName`]
    /// on uniqueness conflicts.
    async fn register(&self, input: RegisterInput) -> Result<User, IdentityError>;

    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when the email is unknown
    /// or the password does not match; the two cases are indistinguishable.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, IdentityError>;

    /// Resolves a session-bound user id back to a user record.
    async fn current_user(&self, id: i32) -> Result<Option<User>, IdentityError>;

    /// Idempotent bootstrap: creates the configured admin account unless a
    /// user with that email already exists.
    async fn ensure_default_admin(&self, bootstrap: &BootstrapConfig)
    -> Result<(), IdentityError>;
}
