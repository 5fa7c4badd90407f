use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, LandingDto, UserDto};
use crate::db::User;
use crate::services::RegisterInput;

/// Session key binding a request sequence to an authenticated user's id.
const SESSION_USER_ID: &str = "user_id";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for session-only routes: requests without a bound user id are turned
/// away towards the login page.
pub async fn require_session(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = session
        .get::<i32>(SESSION_USER_ID)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    if user_id.is_none() {
        return Err(ApiError::Unauthorized("Please log in to continue.".to_string()));
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Public landing view payload.
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<LandingDto>>, ApiError> {
    let user = session_user_opt(&state, &session).await?;

    Ok(Json(ApiResponse::success(LandingDto {
        authenticated: user.is_some(),
        user: user.map(UserDto::from),
    })))
}

/// GET /register
pub async fn register_form() -> Json<ApiResponse<()>> {
    Json(ApiResponse::success(()))
}

/// POST /register
/// Create a new regular account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .identity()
        .register(RegisterInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Json(
        ApiResponse::flash(UserDto::from(user), "Registration successful! Please login.")
            .with_redirect("/login"),
    ))
}

/// GET /login
pub async fn login_form() -> Json<ApiResponse<()>> {
    Json(ApiResponse::success(()))
}

/// POST /login
/// Verify credentials and bind the session to the user's id.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .identity()
        .authenticate(&payload.email, &payload.password)
        .await?;

    session
        .insert(SESSION_USER_ID, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!("User {} logged in", user.id);

    Ok(Json(
        ApiResponse::flash(UserDto::from(user), "Login successful.").with_redirect("/home"),
    ))
}

/// GET /logout
/// Invalidate the current session.
pub async fn logout(session: Session) -> Result<Json<ApiResponse<()>>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to end session: {e}")))?;

    Ok(Json(ApiResponse::success(()).with_redirect("/")))
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the session's bound id to a user record; error if not authenticated.
pub async fn session_user(state: &AppState, session: &Session) -> Result<User, ApiError> {
    session_user_opt(state, session)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Please log in to continue.".to_string()))
}

/// Like [`session_user`], but anonymous requests resolve to `None`.
async fn session_user_opt(state: &AppState, session: &Session) -> Result<Option<User>, ApiError> {
    let Some(user_id) = session
        .get::<i32>(SESSION_USER_ID)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
    else {
        return Ok(None);
    };

    let user = state.identity().current_user(user_id).await?;
    Ok(user)
}
