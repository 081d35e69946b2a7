//! # authgate-client
//!
//! Client-side counterpart of the Authgate server: holds the current
//! token and identity snapshot, persists the token in durable storage,
//! attaches it to outgoing requests, and reacts to rejection.
//!
//! ## Modules
//!
//! - `session` — the pure reducer-style session state machine
//! - `store` — durable token storage (file-backed, plus in-memory)
//! - `api` — `reqwest`-based HTTP client for the auth endpoints
//! - `client` — the async orchestrator driving the state machine

pub mod api;
pub mod client;
pub mod session;
pub mod store;

pub use api::{ApiClient, ClientError, UserProfile};
pub use client::SessionClient;
pub use session::{SessionEvent, SessionPhase, SessionState, reduce};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
