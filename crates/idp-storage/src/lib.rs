//! # idp-storage
//!
//! Storage abstraction traits for identity provider management.
//!
//! This crate defines the store interface that must be implemented by
//! concrete storage backends, together with the error taxonomy those
//! backends surface.
//!
//! ## Provider Traits
//!
//! - [`IdentityProviderStore`] - persistence operations for identity providers

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod provider;

pub use error::{StorageError, StorageResult};
pub use provider::{IdentityProviderStore, ProviderSummary};
