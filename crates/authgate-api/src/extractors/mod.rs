//! Axum extractors.

pub mod auth;
pub mod json;

pub use auth::AuthIdentity;
pub use json::ApiJson;
