//! # authgate-database
//!
//! Database layer for Authgate: the [`CredentialStore`] contract, its
//! PostgreSQL implementation, an in-memory implementation for tests,
//! connection pool management, and the migration runner.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::CredentialStore;
pub use repositories::identity::IdentityRepository;
pub use repositories::memory::MemoryCredentialStore;
