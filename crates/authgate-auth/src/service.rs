//! Auth service — the register, login, and authorize orchestration.
//!
//! This is the only place business rules live. Storage, hashing, and
//! token signing are delegated to the credential store, the password
//! hasher, and the token issuer/verifier.

use std::sync::Arc;

use tracing::info;

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;
use authgate_database::CredentialStore;
use authgate_entity::identity::{CreateIdentity, Identity};

use crate::jwt::{TokenIssuer, TokenVerifier};
use crate::password::{PasswordHasher, PasswordPolicy};

/// Orchestrates registration, login, and token authorization.
#[derive(Clone)]
pub struct AuthService {
    /// Identity persistence.
    store: Arc<dyn CredentialStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: PasswordPolicy,
    /// Token issuer.
    issuer: Arc<TokenIssuer>,
    /// Token verifier.
    verifier: Arc<TokenVerifier>,
    /// Maximum length of name fields.
    name_max_length: usize,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("name_max_length", &self.name_max_length)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service with all required dependencies.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            policy: PasswordPolicy::new(config),
            issuer,
            verifier,
            name_max_length: config.name_max_length,
        }
    }

    /// Registers a new identity.
    ///
    /// Validates the email format, name fields, and password policy, then
    /// hashes the password and inserts. Duplicate emails surface as a
    /// `Conflict` error from the store's unique constraint; there is no
    /// application-level existence pre-check.
    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let email = email.trim().to_lowercase();
        let first_name = first_name.trim();
        let last_name = last_name.trim();

        validate_email(&email)?;
        self.validate_name("First name", first_name)?;
        self.validate_name("Last name", last_name)?;
        self.policy.validate(password)?;

        let password_hash = self.hasher.hash_password(password)?;

        let identity = self
            .store
            .insert(&CreateIdentity {
                email,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password_hash,
            })
            .await?;

        info!(identity_id = %identity.id, "Identity registered");
        Ok(identity)
    }

    /// Authenticates an identity and issues a token.
    ///
    /// Unknown email and wrong password both fail with the same
    /// undifferentiated error so callers cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Identity), AppError> {
        let email = email.trim().to_lowercase();

        let identity = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let password_valid = self
            .hasher
            .verify_password(password, &identity.password_hash)?;
        if !password_valid {
            return Err(invalid_credentials());
        }

        let token = self.issuer.issue(identity.id)?;

        info!(identity_id = %identity.id, "Login succeeded");
        Ok((token, identity))
    }

    /// Resolves a bearer token to the identity it was issued for.
    ///
    /// Verification is stateless; the identity is then re-loaded so a
    /// token for a since-removed subject fails with `NotFound`.
    pub async fn authorize(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.verifier.verify(token)?;

        self.store
            .find_by_id(claims.identity_id())
            .await?
            .ok_or_else(|| AppError::not_found("Token subject no longer exists"))
    }

    /// Server-side logout.
    ///
    /// Tokens are stateless and not revocable, so this is a no-op kept
    /// for interface symmetry with the client; session teardown happens
    /// client-side.
    pub fn logout(&self) {}

    fn validate_name(&self, field: &str, value: &str) -> Result<(), AppError> {
        if value.is_empty() {
            return Err(AppError::validation(format!("{field} is required")));
        }
        if value.chars().count() > self.name_max_length {
            return Err(AppError::validation(format!(
                "{field} must be at most {} characters",
                self.name_max_length
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
        {
            return Err(AppError::validation(format!(
                "{field} contains invalid characters"
            )));
        }
        Ok(())
    }
}

/// The single undifferentiated credential error.
fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid email or password")
}

/// Minimal email format check: one `@`, non-empty local part, and a
/// dotted domain.
fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::validation("Email is not valid");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.len() < 2 {
        return Err(invalid());
    }
    Ok(())
}
