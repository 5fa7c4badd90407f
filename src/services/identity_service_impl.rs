//! `SeaORM` implementation of the `IdentityService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::{BootstrapConfig, SecurityConfig};
use crate::constants::limits;
use crate::db::{Role, Store, User};
use crate::services::identity_service::{IdentityError, IdentityService, RegisterInput};

pub struct SeaOrmIdentityService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmIdentityService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

/// Emails are matched case-insensitively by storing them lowercase.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl IdentityService for SeaOrmIdentityService {
    async fn register(&self, input: RegisterInput) -> Result<User, IdentityError> {
        let name = input.name.trim().to_string();
        let email = normalize_email(&input.email);
        let password = input.password;

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push("Name is required.".to_string());
        } else if name.chars().count() > limits::NAME_MAX_LEN {
            errors.push(format!(
                "Name must be {} characters or less.",
                limits::NAME_MAX_LEN
            ));
        }
        if email.is_empty() {
            errors.push("Email is required.".to_string());
        }
        if password.is_empty() {
            errors.push("Password is required.".to_string());
        }
        if !errors.is_empty() {
            return Err(IdentityError::Validation(errors));
        }

        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(IdentityError::DuplicateEmail);
        }

        if self.store.get_user_by_name(&name).await?.is_some() {
            return Err(IdentityError::DuplicateName);
        }

        let user = self
            .store
            .create_user(&name, &email, &password, Role::Regular, &self.security)
            .await?;

        info!("Registered user {} <{}>", user.name, user.email);
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let email = normalize_email(email);

        let is_valid = self.store.verify_user_password(&email, password).await?;

        if !is_valid {
            return Err(IdentityError::InvalidCredentials);
        }

        self.store
            .get_user_by_email(&email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)
    }

    async fn current_user(&self, id: i32) -> Result<Option<User>, IdentityError> {
        Ok(self.store.get_user_by_id(id).await?)
    }

    async fn ensure_default_admin(
        &self,
        bootstrap: &BootstrapConfig,
    ) -> Result<(), IdentityError> {
        let email = normalize_email(&bootstrap.admin_email);

        if self.store.get_user_by_email(&email).await?.is_some() {
            return Ok(());
        }

        self.store
            .create_user(
                bootstrap.admin_name.trim(),
                &email,
                &bootstrap.admin_password,
                Role::Admin,
                &self.security,
            )
            .await?;

        info!("Created default admin account <{email}>");
        Ok(())
    }
}
