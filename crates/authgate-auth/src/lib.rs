//! # authgate-auth
//!
//! Authentication core for Authgate.
//!
//! ## Modules
//!
//! - `jwt` — token issuance and verification (HS256, stateless)
//! - `password` — Argon2id hashing and password policy enforcement
//! - `service` — the auth service orchestrating register, login, and
//!   authorize against the credential store

pub mod jwt;
pub mod password;
pub mod service;

pub use jwt::{Claims, TokenIssuer, TokenVerifier};
pub use password::{PasswordHasher, PasswordPolicy};
pub use service::AuthService;
