//! `PostgreSQL` implementation of the identity provider store.

use async_trait::async_trait;
use idp_model::IdentityProvider;
use idp_storage::error::StorageResult;
use idp_storage::{IdentityProviderStore, ProviderSummary};
use sqlx::{PgPool, Postgres, Transaction};

use crate::convert::provider_from_rows;
use crate::entities::{AuthenticatorRow, IdentityProviderRow};
use crate::error::{from_sqlx_error, not_found, unique_name_error};

/// `PostgreSQL` identity provider store.
pub struct PgIdentityProviderStore {
    pool: PgPool,
}

impl PgIdentityProviderStore {
    /// Creates a new `PostgreSQL` identity provider store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch authenticator configs for a provider.
    async fn fetch_authenticators(&self, idp_id: i32) -> StorageResult<Vec<AuthenticatorRow>> {
        let rows: Vec<AuthenticatorRow> =
            sqlx::query_as("SELECT * FROM idp_authenticator WHERE idp_id = $1")
                .bind(idp_id)
                .fetch_all(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        Ok(rows)
    }
}

/// Insert a provider's authenticator configs inside an open transaction.
async fn insert_authenticators(
    tx: &mut Transaction<'_, Postgres>,
    idp_id: i32,
    provider: &IdentityProvider,
) -> StorageResult<()> {
    for config in provider.authenticator_configs().values() {
        sqlx::query(
            r"INSERT INTO idp_authenticator (idp_id, name, is_enabled, properties)
            VALUES ($1, $2, $3, $4)",
        )
        .bind(idp_id)
        .bind(config.name())
        .bind(config.is_enabled())
        .bind(sqlx::types::Json(config.properties()))
        .execute(&mut **tx)
        .await
        .map_err(from_sqlx_error)?;
    }

    Ok(())
}

#[async_trait]
impl IdentityProviderStore for PgIdentityProviderStore {
    async fn create(&self, provider: &IdentityProvider) -> StorageResult<i32> {
        let mut tx = self.pool.begin().await.map_err(from_sqlx_error)?;

        let (id,): (i32,) = sqlx::query_as(
            r"INSERT INTO idp (name, display_name, description, dialect_id, is_enabled, is_resident)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id",
        )
        .bind(provider.name())
        .bind(provider.display_label())
        .bind(provider.description())
        .bind(provider.dialect_id())
        .bind(provider.is_enabled())
        .bind(provider.is_resident())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_name_error(e, provider.name()))?;

        insert_authenticators(&mut tx, id, provider).await?;

        tx.commit().await.map_err(from_sqlx_error)?;

        tracing::debug!(id, name = provider.name(), "created identity provider");
        Ok(id)
    }

    async fn update(&self, provider: &IdentityProvider) -> StorageResult<()> {
        let mut tx = self.pool.begin().await.map_err(from_sqlx_error)?;

        let result = sqlx::query(
            r"UPDATE idp SET
                name = $2, display_name = $3, description = $4,
                dialect_id = $5, is_enabled = $6, is_resident = $7
            WHERE id = $1",
        )
        .bind(provider.id())
        .bind(provider.name())
        .bind(provider.display_label())
        .bind(provider.description())
        .bind(provider.dialect_id())
        .bind(provider.is_enabled())
        .bind(provider.is_resident())
        .execute(&mut *tx)
        .await
        .map_err(|e| unique_name_error(e, provider.name()))?;

        if result.rows_affected() == 0 {
            return Err(not_found("IdentityProvider", provider.id()));
        }

        // Replace the authenticator config set
        sqlx::query("DELETE FROM idp_authenticator WHERE idp_id = $1")
            .bind(provider.id())
            .execute(&mut *tx)
            .await
            .map_err(from_sqlx_error)?;

        insert_authenticators(&mut tx, provider.id(), provider).await?;

        tx.commit().await.map_err(from_sqlx_error)?;

        tracing::debug!(
            id = provider.id(),
            name = provider.name(),
            "updated identity provider"
        );
        Ok(())
    }

    async fn delete(&self, id: i32) -> StorageResult<()> {
        // Authenticator configs are deleted by cascade
        let result = sqlx::query("DELETE FROM idp WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("IdentityProvider", id));
        }

        tracing::debug!(id, "deleted identity provider");
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> StorageResult<Option<IdentityProvider>> {
        let row: Option<IdentityProviderRow> = sqlx::query_as("SELECT * FROM idp WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        match row {
            Some(r) => {
                let authenticators = self.fetch_authenticators(r.id).await?;
                Ok(Some(provider_from_rows(r, authenticators)?))
            }
            None => Ok(None),
        }
    }

    async fn get_by_name(&self, name: &str) -> StorageResult<Option<IdentityProvider>> {
        let row: Option<IdentityProviderRow> = sqlx::query_as("SELECT * FROM idp WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        match row {
            Some(r) => {
                let authenticators = self.fetch_authenticators(r.id).await?;
                Ok(Some(provider_from_rows(r, authenticators)?))
            }
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> StorageResult<Vec<ProviderSummary>> {
        let rows: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM idp ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ProviderSummary { id, name })
            .collect())
    }

    async fn list_enabled(&self) -> StorageResult<Vec<ProviderSummary>> {
        let rows: Vec<(i32, String)> =
            sqlx::query_as("SELECT id, name FROM idp WHERE is_enabled ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ProviderSummary { id, name })
            .collect())
    }

    async fn count(&self) -> StorageResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM idp")
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }
}
