//! # idp-model
//!
//! Domain models for identity provider management.
//!
//! This crate defines the [`IdentityProvider`] aggregate, its builder, and
//! the [`LocalAuthenticatorConfig`] value object attached to a provider.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod authenticator;
pub mod provider;

pub use authenticator::LocalAuthenticatorConfig;
pub use provider::{IdentityProvider, IdentityProviderBuilder, ValidationError};
