//! # authgate-api
//!
//! HTTP API layer for Authgate built on Axum: router, handlers, DTOs,
//! the `AuthIdentity` extractor, and the error-to-status mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
