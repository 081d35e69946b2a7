//! PostgreSQL-backed identity repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::identity::{CreateIdentity, Identity};

use super::CredentialStore;

/// Repository for identity persistence backed by PostgreSQL.
///
/// Email uniqueness is guaranteed by the `identities_email_lower_key`
/// unique index, so insertion is the atomic check-then-insert.
#[derive(Debug, Clone)]
pub struct IdentityRepository {
    pool: PgPool,
}

impl IdentityRepository {
    /// Create a new identity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for IdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find identity by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find identity by email", e)
            })
    }

    async fn insert(&self, data: &CreateIdentity) -> AppResult<Identity> {
        sqlx::query_as::<_, Identity>(
            "INSERT INTO identities (email, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("identities_email_lower_key") =>
            {
                AppError::conflict("Email is already registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create identity", e),
        })
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM identities")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count identities", e)
            })?;
        Ok(count as u64)
    }
}
