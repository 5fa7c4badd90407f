//! Domain service for opportunity triage: create/list/edit/delete with field
//! validation, title uniqueness, and role-gated mutation of status and scores.

use thiserror::Error;

use crate::db::{Opportunity, User};

/// Errors specific to opportunity operations.
#[derive(Debug, Error)]
pub enum OpportunityError {
    /// One or more required/format violations, accumulated rather than
    /// short-circuited; the record is left unchanged.
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("An opportunity with this title already exists")]
    DuplicateTitle,

    #[error("Not authorised")]
    Forbidden,

    #[error("Opportunity not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for OpportunityError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for OpportunityError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Creation form input; missing form fields decode to empty strings.
#[derive(Debug, Clone, Default)]
pub struct CreateOpportunityInput {
    pub title: String,
    pub description: String,
    pub business_unit: String,
    pub predicted_benefits: String,
    pub business_criticality: String,
}

/// Edit form input. Status and scores arrive as raw form text: empty means
/// "leave unchanged", and non-admin submissions are ignored without error.
#[derive(Debug, Clone, Default)]
pub struct EditOpportunityInput {
    pub title: String,
    pub description: String,
    pub business_unit: String,
    pub predicted_benefits: String,
    pub business_criticality: String,
    pub status: String,
    pub value_score: String,
    pub effort_score: String,
}

/// Domain service trait for opportunities. Every call takes the explicit
/// acting user; there is no ambient request state.
#[async_trait::async_trait]
pub trait OpportunityService: Send + Sync {
    /// All opportunities in insertion order.
    async fn list(&self) -> Result<Vec<Opportunity>, OpportunityError>;

    async fn get(&self, id: i32) -> Result<Opportunity, OpportunityError>;

    /// Creates an opportunity submitted by `acting_user` with status "New".
    ///
    /// # Errors
    ///
    /// Returns [`OpportunityError::Validation`] listing the missing fields, or
    /// [`OpportunityError::DuplicateTitle`] on a title conflict.
    async fn create(
        &self,
        input: CreateOpportunityInput,
        acting_user: &User,
    ) -> Result<Opportunity, OpportunityError>;

    /// Rewrites the core fields; admins may additionally set status and
    /// scores. All-or-nothing: any validation error rejects the whole edit.
    ///
    /// # Errors
    ///
    /// Returns [`OpportunityError::Forbidden`] unless `acting_user` is an
    /// admin or the submitter.
    async fn edit(
        &self,
        id: i32,
        input: EditOpportunityInput,
        acting_user: &User,
    ) -> Result<Opportunity, OpportunityError>;

    /// Removes an opportunity. Admin only.
    async fn delete(&self, id: i32, acting_user: &User) -> Result<(), OpportunityError>;
}
