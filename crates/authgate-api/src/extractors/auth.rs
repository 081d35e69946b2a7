//! `AuthIdentity` extractor — pulls the bearer token from the
//! Authorization header, verifies it, and resolves the identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authgate_core::error::AppError;
use authgate_entity::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
///
/// This is the composable authorization guard: any handler that takes an
/// `AuthIdentity` argument is a protected route, independent of the
/// routing mechanism.
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub Identity);

impl std::ops::Deref for AuthIdentity {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let identity = state.auth_service.authorize(token).await?;

        Ok(AuthIdentity(identity))
    }
}
