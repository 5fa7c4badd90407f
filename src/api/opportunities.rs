use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user;
use super::validation::validate_opportunity_id;
use super::{ApiError, ApiResponse, AppState, OpportunityDto};
use crate::services::{CreateOpportunityInput, EditOpportunityInput};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOpportunityRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub business_unit: String,
    #[serde(default)]
    pub predicted_benefits: String,
    #[serde(default)]
    pub business_criticality: String,
}

/// Status and scores arrive as raw form text; empty means "leave unchanged".
#[derive(Debug, Deserialize)]
pub struct EditOpportunityRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub business_unit: String,
    #[serde(default)]
    pub predicted_benefits: String,
    #[serde(default)]
    pub business_criticality: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub value_score: String,
    #[serde(default)]
    pub effort_score: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /home
/// List all opportunities.
pub async fn list_opportunities(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<OpportunityDto>>>, ApiError> {
    session_user(&state, &session).await?;

    let records = state.opportunities().list().await?;
    let dtos = records.into_iter().map(OpportunityDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /home/create
pub async fn create_form() -> Json<ApiResponse<()>> {
    Json(ApiResponse::success(()))
}

/// POST /home/create
pub async fn create_opportunity(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CreateOpportunityRequest>,
) -> Result<Json<ApiResponse<OpportunityDto>>, ApiError> {
    let user = session_user(&state, &session).await?;

    let created = state
        .opportunities()
        .create(
            CreateOpportunityInput {
                title: payload.title,
                description: payload.description,
                business_unit: payload.business_unit,
                predicted_benefits: payload.predicted_benefits,
                business_criticality: payload.business_criticality,
            },
            &user,
        )
        .await?;

    Ok(Json(
        ApiResponse::flash(
            OpportunityDto::from(created),
            "Opportunity created successfully.",
        )
        .with_redirect("/home"),
    ))
}

/// GET /home/edit/{id}
/// Edit form payload; only the submitter or an admin may view it.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<OpportunityDto>>, ApiError> {
    let id = validate_opportunity_id(id)?;
    let user = session_user(&state, &session).await?;

    let record = state.opportunities().get(id).await?;

    if !(user.role.is_admin() || record.submitted_by == user.id) {
        return Err(ApiError::Forbidden(
            "You are not authorised to edit this opportunity.".to_string(),
        ));
    }

    Ok(Json(ApiResponse::success(OpportunityDto::from(record))))
}

/// POST /home/edit/{id}
/// Role-gated edit: admins may also set status and scores.
pub async fn edit_opportunity(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<EditOpportunityRequest>,
) -> Result<Json<ApiResponse<OpportunityDto>>, ApiError> {
    let id = validate_opportunity_id(id)?;
    let user = session_user(&state, &session).await?;

    let updated = state
        .opportunities()
        .edit(
            id,
            EditOpportunityInput {
                title: payload.title,
                description: payload.description,
                business_unit: payload.business_unit,
                predicted_benefits: payload.predicted_benefits,
                business_criticality: payload.business_criticality,
                status: payload.status,
                value_score: payload.value_score,
                effort_score: payload.effort_score,
            },
            &user,
        )
        .await?;

    Ok(Json(
        ApiResponse::flash(
            OpportunityDto::from(updated),
            "Opportunity updated successfully.",
        )
        .with_redirect("/home"),
    ))
}

/// POST /home/delete/{id}
/// Delete an opportunity (admin only).
pub async fn delete_opportunity(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_opportunity_id(id)?;
    let user = session_user(&state, &session).await?;

    state.opportunities().delete(id, &user).await?;

    Ok(Json(
        ApiResponse::flash((), "Opportunity deleted successfully.").with_redirect("/home"),
    ))
}
