//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted to domain
//! models on read.

use std::collections::HashMap;

use sqlx::FromRow;

/// Database row for identity providers.
#[derive(Debug, Clone, FromRow)]
pub struct IdentityProviderRow {
    pub id: i32,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub dialect_id: Option<i32>,
    pub is_enabled: bool,
    pub is_resident: bool,
}

/// Database row for per-provider authenticator configs.
#[derive(Debug, Clone, FromRow)]
pub struct AuthenticatorRow {
    /// Provider id is used when fetching from database via query.
    #[allow(dead_code)]
    pub idp_id: i32,
    pub name: String,
    pub is_enabled: bool,
    pub properties: sqlx::types::Json<HashMap<String, String>>,
}
