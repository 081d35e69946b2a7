//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authgate_entity::identity::Identity;

/// Identity summary for responses. Built from [`Identity`], which keeps
/// the password hash behind the store boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
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

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// The created identity.
    pub user: IdentityResponse,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Bearer token.
    pub token: String,
    /// The authenticated identity.
    pub user: IdentityResponse,
}

/// Profile response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The authenticated identity.
    pub user: IdentityResponse,
}

/// Simple success message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Credential store reachability.
    pub database: String,
    /// Version.
    pub version: String,
}
