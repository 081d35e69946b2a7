//! JSON body extractor with validation-error rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use authgate_core::error::AppError;

use crate::error::ApiError;

/// Drop-in replacement for `axum::Json` on request bodies.
///
/// Axum's own extractor rejects missing or malformed bodies with 422 or
/// 415; here those are input validation failures like any other, so the
/// rejection is mapped into the standard 400 error body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
