//! Identity provider aggregate and builder.
//!
//! An identity provider is a named trust anchor the authentication system
//! delegates to, or — for the resident provider — the system's own built-in
//! identity. Aggregates are constructed exclusively through
//! [`IdentityProviderBuilder`], which validates required fields once at
//! build time and hands out immutable snapshots.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::authenticator::LocalAuthenticatorConfig;

/// Errors raised when building an [`IdentityProvider`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The provider name was empty.
    #[error("identity provider name is required")]
    MissingName,

    /// The provider id was negative.
    #[error("identity provider id cannot be negative: {0}")]
    NegativeId(i32),
}

/// An identity provider's metadata and authenticator configuration.
///
/// Instances are immutable snapshots produced by
/// [`IdentityProviderBuilder::build`]; the store hands out fresh, detached
/// copies on every read.
#[derive(Debug, Clone, Serialize)]
pub struct IdentityProvider {
    id: i32,
    name: String,
    display_label: Option<String>,
    description: Option<String>,
    dialect_id: Option<i32>,
    enabled: bool,
    resident: bool,
    authenticator_configs: HashMap<String, LocalAuthenticatorConfig>,
}

impl IdentityProvider {
    /// Sentinel id of an aggregate that has not been persisted yet.
    pub const UNSET_ID: i32 = 0;

    /// The store-assigned id, or [`Self::UNSET_ID`] before persistence.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// The unique provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable display label.
    #[must_use]
    pub fn display_label(&self) -> Option<&str> {
        self.display_label.as_deref()
    }

    /// The free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The associated claim-dialect id.
    #[must_use]
    pub const fn dialect_id(&self) -> Option<i32> {
        self.dialect_id
    }

    /// Whether the provider is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether this is the system's built-in resident provider.
    #[must_use]
    pub const fn is_resident(&self) -> bool {
        self.resident
    }

    /// Whether the aggregate carries a store-assigned id.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != Self::UNSET_ID
    }

    /// The authenticator configs, keyed by authenticator name.
    #[must_use]
    pub const fn authenticator_configs(&self) -> &HashMap<String, LocalAuthenticatorConfig> {
        &self.authenticator_configs
    }

    /// Looks up one authenticator config by name.
    #[must_use]
    pub fn authenticator_config(&self, name: &str) -> Option<&LocalAuthenticatorConfig> {
        self.authenticator_configs.get(name)
    }
}

/// Builder for [`IdentityProvider`].
///
/// The two required fields are supplied up front; everything else is
/// optional and defaults to the unset/enabled state. Setters are
/// last-write-wins and may be applied in any order before [`build`].
///
/// [`build`]: Self::build
#[derive(Debug, Clone)]
pub struct IdentityProviderBuilder {
    id: i32,
    name: String,
    display_label: Option<String>,
    description: Option<String>,
    dialect_id: Option<i32>,
    enabled: bool,
    resident: bool,
    authenticator_configs: HashMap<String, LocalAuthenticatorConfig>,
}

impl IdentityProviderBuilder {
    /// Starts a builder for a standard provider.
    ///
    /// Pass [`IdentityProvider::UNSET_ID`] for a provider that has not been
    /// persisted yet.
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_label: None,
            description: None,
            dialect_id: None,
            enabled: true,
            resident: false,
            authenticator_configs: HashMap::new(),
        }
    }

    /// Starts a builder for the system's resident provider.
    #[must_use]
    pub fn resident(id: i32, name: impl Into<String>) -> Self {
        Self {
            resident: true,
            ..Self::new(id, name)
        }
    }

    /// Sets the claim-dialect id.
    #[must_use]
    pub const fn dialect_id(mut self, dialect_id: i32) -> Self {
        self.dialect_id = Some(dialect_id);
        self
    }

    /// Sets the display label.
    #[must_use]
    pub fn display_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Attaches an authenticator config, replacing any config with the
    /// same name.
    #[must_use]
    pub fn authenticator_config(mut self, config: LocalAuthenticatorConfig) -> Self {
        self.authenticator_configs
            .insert(config.name().to_string(), config);
        self
    }

    /// Builds an immutable snapshot of the current builder state.
    ///
    /// The builder is left untouched; repeated builds after further
    /// mutation yield independent snapshots.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::MissingName`] when no name was supplied
    /// and [`ValidationError::NegativeId`] when the id is negative.
    pub fn build(&self) -> Result<IdentityProvider, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.id < 0 {
            return Err(ValidationError::NegativeId(self.id));
        }

        Ok(IdentityProvider {
            id: self.id,
            name: self.name.clone(),
            display_label: self.display_label.clone(),
            description: self.description.clone(),
            dialect_id: self.dialect_id,
            enabled: self.enabled,
            resident: self.resident,
            authenticator_configs: self.authenticator_configs.clone(),
        })
    }
}
