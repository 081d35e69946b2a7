//! Identity entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered identity in the Authgate system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Identity {
    /// Unique identity identifier, assigned at creation and immutable.
    pub id: Uuid,
    /// Email address, unique across all identities (compared case-insensitively).
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Argon2id password hash. Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
    /// When the identity was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIdentity {
    /// Email address, already trimmed and lowercased.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
