//! Credential store contract and its implementations.

pub mod identity;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use authgate_core::result::AppResult;
use authgate_entity::identity::{CreateIdentity, Identity};

/// Persistence contract for registered identities.
///
/// Implementations must enforce case-insensitive email uniqueness as a
/// single atomic operation at the storage boundary. Callers never perform
/// an existence pre-check before inserting; a duplicate email surfaces as
/// a `Conflict` error from [`CredentialStore::insert`] regardless of how
/// two concurrent registrations interleave.
#[async_trait]
pub trait CredentialStore: std::fmt::Debug + Send + Sync + 'static {
    /// Find an identity by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>>;

    /// Find an identity by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Insert a new identity and return the stored row.
    ///
    /// Fails with a `Conflict` error when the email is already taken.
    async fn insert(&self, data: &CreateIdentity) -> AppResult<Identity>;

    /// Count registered identities.
    async fn count(&self) -> AppResult<u64>;
}
