//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authgate_auth::jwt::{TokenIssuer, TokenVerifier};
use authgate_auth::password::PasswordHasher;
use authgate_auth::service::AuthService;
use authgate_core::config::AppConfig;
use authgate_database::CredentialStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Identity persistence.
    pub credential_store: Arc<dyn CredentialStore>,
    /// Auth service orchestration.
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires the auth stack on top of the given credential store.
    pub fn new(config: AppConfig, credential_store: Arc<dyn CredentialStore>) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let issuer = Arc::new(TokenIssuer::new(&config.auth));
        let verifier = Arc::new(TokenVerifier::new(&config.auth));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&credential_store),
            hasher,
            issuer,
            verifier,
            &config.auth,
        ));

        Self {
            config: Arc::new(config),
            credential_store,
            auth_service,
        }
    }
}
