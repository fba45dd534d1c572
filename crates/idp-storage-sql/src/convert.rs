//! Conversion between database entities and domain models.

use idp_model::{IdentityProvider, IdentityProviderBuilder, LocalAuthenticatorConfig};
use idp_storage::{StorageError, StorageResult};

use crate::entities::{AuthenticatorRow, IdentityProviderRow};

/// Rehydrates an `IdentityProvider` aggregate from its rows.
///
/// Reconstruction goes through the builder, the aggregate's only
/// construction path. A row that fails builder validation indicates a
/// corrupt record and is surfaced as an internal error.
pub fn provider_from_rows(
    row: IdentityProviderRow,
    authenticators: Vec<AuthenticatorRow>,
) -> StorageResult<IdentityProvider> {
    let mut builder = if row.is_resident {
        IdentityProviderBuilder::resident(row.id, row.name)
    } else {
        IdentityProviderBuilder::new(row.id, row.name)
    };
    builder = builder.enabled(row.is_enabled);

    if let Some(label) = row.display_name {
        builder = builder.display_label(label);
    }
    if let Some(description) = row.description {
        builder = builder.description(description);
    }
    if let Some(dialect_id) = row.dialect_id {
        builder = builder.dialect_id(dialect_id);
    }
    for auth in authenticators {
        builder = builder.authenticator_config(authenticator_from_row(auth));
    }

    builder
        .build()
        .map_err(|e| StorageError::Internal(format!("Corrupt identity provider row: {e}")))
}

/// Rehydrates one authenticator config from its row.
fn authenticator_from_row(row: AuthenticatorRow) -> LocalAuthenticatorConfig {
    let mut config = LocalAuthenticatorConfig::new(row.name).enabled(row.is_enabled);
    for (key, value) in row.properties.0 {
        config = config.property(key, value);
    }
    config
}
