//! Auth handlers — register, login, logout, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use authgate_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse, ProfileResponse, RegisterResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthIdentity};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let identity = state
        .auth_service
        .register(&req.email, &req.first_name, &req.last_name, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
            user: identity.into(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (token, identity) = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: identity.into(),
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless, so there is nothing to tear down server-side;
/// the client clears its persisted token.
pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    state.auth_service.logout();

    Json(MessageResponse {
        success: true,
        message: "Logged out".to_string(),
    })
}

/// GET /api/auth/profile
pub async fn profile(auth: AuthIdentity) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: auth.0.into(),
    })
}
