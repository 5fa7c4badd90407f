use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{IdentityError, OpportunityError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(Vec<String>),

    Conflict(String),

    Forbidden(String),

    Unauthorized(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msgs) => write!(f, "Validation error: {}", msgs.join(" ")),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Severity tags drive the flash styling in the view layer; 500s never
        // expose internals to the client.
        let (status, message, category, redirect) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "warning", None),
            ApiError::ValidationError(msgs) => {
                (StatusCode::BAD_REQUEST, msgs.join(" "), "danger", None)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, "warning", None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "danger", Some("/home")),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, msg, "danger", Some("/login"))
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing the request.".to_string(),
                    "danger",
                    None,
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                    "danger",
                    None,
                )
            }
        };

        let mut body = ApiResponse::<()>::error_with_category(message, category);
        if let Some(to) = redirect {
            body = body.with_redirect(to);
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Validation(msgs) => ApiError::ValidationError(msgs),
            IdentityError::DuplicateEmail => {
                ApiError::Conflict("Email address already exists.".to_string())
            }
            IdentityError::DuplicateName => {
                ApiError::Conflict("Username already taken.".to_string())
            }
            IdentityError::InvalidCredentials => {
                ApiError::Unauthorized("Login failed. Check your email and/or password.".to_string())
            }
            IdentityError::Database(msg) => ApiError::DatabaseError(msg),
            IdentityError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<OpportunityError> for ApiError {
    fn from(err: OpportunityError) -> Self {
        match err {
            OpportunityError::Validation(msgs) => ApiError::ValidationError(msgs),
            OpportunityError::DuplicateTitle => ApiError::Conflict(
                "An opportunity with this title already exists. Please choose a different title."
                    .to_string(),
            ),
            OpportunityError::Forbidden => {
                ApiError::Forbidden("You are not authorised to perform this action.".to_string())
            }
            OpportunityError::NotFound => {
                ApiError::NotFound("Opportunity not found.".to_string())
            }
            OpportunityError::Database(msg) => ApiError::DatabaseError(msg),
            OpportunityError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
