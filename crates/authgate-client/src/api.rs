//! HTTP client for the Authgate auth endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Client-side errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure; not a server-classified error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server rejected the request.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message.
        message: String,
    },
    /// Durable token storage failed.
    #[error("storage error: {0}")]
    Storage(String),
    /// An auth call is already in flight; duplicate submission refused.
    #[error("an auth request is already in flight")]
    InFlight,
}

impl ClientError {
    /// True when the server answered with an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

/// Identity snapshot as returned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last updated at.
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RegisterEnvelope {
    user: UserProfile,
}

#[derive(Deserialize)]
struct LoginEnvelope {
    token: String,
    user: UserProfile,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    user: UserProfile,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// Thin typed wrapper over the HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against the given base URL
    /// (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST /api/auth/register
    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&RegisterBody {
                email,
                first_name,
                last_name,
                password,
            })
            .send()
            .await?;

        let envelope: RegisterEnvelope = Self::parse(response).await?;
        Ok(envelope.user)
    }

    /// POST /api/auth/login
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, UserProfile), ClientError> {
        let response = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginBody { email, password })
            .send()
            .await?;

        let envelope: LoginEnvelope = Self::parse(response).await?;
        Ok((envelope.token, envelope.user))
    }

    /// POST /api/auth/logout
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/api/auth/logout", self.base_url))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// GET /api/auth/profile with the bearer token attached.
    pub async fn profile(&self, token: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/auth/profile", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let envelope: ProfileEnvelope = Self::parse(response).await?;
        Ok(envelope.user)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorEnvelope>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| status.to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
