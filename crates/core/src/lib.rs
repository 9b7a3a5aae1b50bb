//! Domain types and rules for the shop unit catalog.
//!
//! Everything here is pure: no I/O, no store access. The `db` crate maps
//! these types onto Postgres rows and the `api` crate drives them from
//! HTTP handlers.

pub mod error;
pub mod pricing;
pub mod types;
pub mod unit;
