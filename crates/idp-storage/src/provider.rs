//! Identity provider store trait.

use async_trait::async_trait;
use idp_model::IdentityProvider;

use crate::error::StorageResult;

/// An `(id, name)` pair describing one stored identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSummary {
    /// Store-assigned id.
    pub id: i32,
    /// Unique provider name.
    pub name: String,
}

/// Store for identity provider persistence operations.
///
/// Implementations must be thread-safe and support concurrent access. The
/// store holds no state across calls beyond its handle to the underlying
/// SQL gateway; every operation is a single unit of work. Races between
/// concurrent creates with the same name are resolved by the store's
/// uniqueness constraint, not by locking here.
#[async_trait]
pub trait IdentityProviderStore: Send + Sync {
    /// Creates a new identity provider and returns the store-assigned id.
    ///
    /// The returned id is always non-zero. The insert is atomic: on failure
    /// no partial record is left behind.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a provider with the same name
    /// exists.
    async fn create(&self, provider: &IdentityProvider) -> StorageResult<i32>;

    /// Updates an existing identity provider, replacing its metadata and
    /// authenticator configs.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the provider doesn't exist.
    async fn update(&self, provider: &IdentityProvider) -> StorageResult<()>;

    /// Deletes an identity provider by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the provider doesn't exist.
    async fn delete(&self, id: i32) -> StorageResult<()>;

    /// Gets an identity provider by id.
    ///
    /// Absence is reported as `Ok(None)`, never as an error.
    async fn get_by_id(&self, id: i32) -> StorageResult<Option<IdentityProvider>>;

    /// Gets an identity provider by its unique name.
    ///
    /// Absence is reported as `Ok(None)`, never as an error. Case
    /// sensitivity of the match follows the store's collation.
    async fn get_by_name(&self, name: &str) -> StorageResult<Option<IdentityProvider>>;

    /// Lists `(id, name)` summaries for all providers, enabled or not.
    ///
    /// Returns an empty vec for an empty store. Order is stable for a given
    /// store state.
    async fn list_all(&self) -> StorageResult<Vec<ProviderSummary>>;

    /// Lists `(id, name)` summaries for enabled providers only.
    ///
    /// Always a subset of [`list_all`] for the same store state.
    ///
    /// [`list_all`]: Self::list_all
    async fn list_enabled(&self) -> StorageResult<Vec<ProviderSummary>>;

    /// Counts all providers.
    async fn count(&self) -> StorageResult<u64>;

    /// Checks if a provider exists by name.
    async fn exists_by_name(&self, name: &str) -> StorageResult<bool> {
        Ok(self.get_by_name(name).await?.is_some())
    }
}
