//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token TTL in seconds.
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum length of the first/last name fields.
    #[serde(default = "default_name_max")]
    pub name_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_seconds: default_jwt_ttl(),
            password_min_length: default_password_min(),
            name_max_length: default_name_max(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_ttl() -> u64 {
    // 24 hours
    86400
}

fn default_password_min() -> usize {
    8
}

fn default_name_max() -> usize {
    100
}
