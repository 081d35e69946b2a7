//! In-memory credential store for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::identity::{CreateIdentity, Identity};

use super::CredentialStore;

/// Credential store backed by a mutex-guarded map.
///
/// The whole check-then-insert runs under one lock, giving the same
/// atomic uniqueness guarantee the PostgreSQL unique index provides.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    identities: Mutex<HashMap<Uuid, Identity>>,
}

impl MemoryCredentialStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>> {
        let identities = self
            .identities
            .lock()
            .map_err(|_| AppError::internal("Credential store lock poisoned"))?;
        Ok(identities.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let identities = self
            .identities
            .lock()
            .map_err(|_| AppError::internal("Credential store lock poisoned"))?;
        Ok(identities
            .values()
            .find(|i| i.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, data: &CreateIdentity) -> AppResult<Identity> {
        let mut identities = self
            .identities
            .lock()
            .map_err(|_| AppError::internal("Credential store lock poisoned"))?;

        if identities
            .values()
            .any(|i| i.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict("Email is already registered"));
        }

        let now = Utc::now();
        let identity = Identity {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn count(&self) -> AppResult<u64> {
        let identities = self
            .identities
            .lock()
            .map_err(|_| AppError::internal("Credential store lock poisoned"))?;
        Ok(identities.len() as u64)
    }
}
