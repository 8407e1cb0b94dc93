//! Core types and trait definitions for GenDat.
//!
//! GenDat overlays user transcriptions on the official Nova Scotia
//! vital-statistics records and cross-references them against a PhpGedView
//! genealogy database. This crate holds the domain model only; it is
//! deliberately free of HTTP and database dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod domain;
pub mod error;
pub mod fields;
pub mod person;
pub mod place;
pub mod record;
pub mod search;
pub mod store;

pub use error::{Error, Result};
