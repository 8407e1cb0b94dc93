//! HTML front end for GenDat.
//!
//! Exposes an axum [`Router`] serving the record lists, the overlay edit
//! pages and the two search pages, backed by any [`RecordStore`].

pub mod error;
pub mod handlers;
pub mod html;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use gendat_core::{person::PersonFactsKind, store::RecordStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{edit, index, list, places, search};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  /// Separate PhpGedView database file. When unset the genealogy tables are
  /// expected in the main database.
  #[serde(default)]
  pub pgv_database:  Option<PathBuf>,
  #[serde(default)]
  pub pgv_prefix:    String,
  /// Root of the PhpGedView installation, with a trailing slash.
  #[serde(default)]
  pub pgv_base_url:  String,
  #[serde(default)]
  pub person_facts:  PersonFactsKind,
  #[serde(default = "default_stylesheet")]
  pub stylesheet:    String,
}

fn default_stylesheet() -> String { "gendat.css".to_string() }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the GenDat pages.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    .route("/",              get(index::show::<S>))
    .route("/search",        get(search::form::<S>).post(search::submit::<S>))
    .route("/places",        get(places::form::<S>).post(places::submit::<S>))
    .route("/places/view",   get(places::view::<S>))
    .route("/{domain}",      get(list::show::<S>))
    .route("/{domain}/edit", get(edit::show::<S>).post(edit::submit::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
