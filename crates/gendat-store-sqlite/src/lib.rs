//! SQLite backend for the GenDat record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The synchronous building blocks
//! ([`safe`], [`search`], [`pgv`]) take a plain `&rusqlite::Connection` and
//! run inside one closure per request.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod pgv;
pub mod safe;
pub mod search;

pub use error::{Error, Result};
pub use pgv::{GedcomBlob, PersonFactSource, PgvTables, StructuredTables};
pub use search::WildcardSearch;
pub use store::{SqliteStore, StoreOptions};

#[cfg(test)]
mod tests;
