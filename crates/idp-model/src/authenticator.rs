//! Local authenticator configuration.
//!
//! A local authenticator config is a named, enable-flagged bundle of
//! key/value properties attached to an identity provider.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Configuration for one named local authentication mechanism.
///
/// ## Equality
///
/// Equality and hashing are defined by `name` alone. Two configs with the
/// same name compare equal even when their enabled flags or properties
/// differ, and they collide in hash-keyed collections. Callers must treat
/// equality as name identity, not full-state equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalAuthenticatorConfig {
    name: String,
    enabled: bool,
    properties: HashMap<String, String>,
}

impl LocalAuthenticatorConfig {
    /// Creates a new enabled config with no properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            properties: HashMap::new(),
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Adds a property. A property with the same key is replaced.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The authenticator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the authenticator is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The property bag.
    #[must_use]
    pub const fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Looks up a single property value.
    #[must_use]
    pub fn property_value(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl PartialEq for LocalAuthenticatorConfig {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for LocalAuthenticatorConfig {}

impl Hash for LocalAuthenticatorConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
