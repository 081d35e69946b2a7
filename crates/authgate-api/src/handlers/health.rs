//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Pings the credential store so a broken database surfaces here rather
/// than on the first login.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match state.credential_store.count().await {
        Ok(_) => (StatusCode::OK, "connected"),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed to reach credential store");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = HealthResponse {
        status: if status == StatusCode::OK {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status, Json(body))
}
