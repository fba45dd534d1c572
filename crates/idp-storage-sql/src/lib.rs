//! # idp-storage-sql
//!
//! SQLx-based storage implementation for identity provider management.
//!
//! This crate provides `PostgreSQL` storage using `SQLx`. The connection
//! pool is the injected SQL execution gateway: it owns connection
//! acquisition and release on all exit paths, while the store translates
//! aggregate operations into parameterized statements.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

mod convert;
mod entities;
mod error;
pub mod pool;
pub mod provider;

pub use pool::{create_pool, PoolConfig};
pub use provider::PgIdentityProviderStore;
