//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `gendat-store-sqlite`).
//! The web layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  domain::RecordDomain, fields::FieldSet, person::PersonView, record::Row,
  search::Criteria,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// The tables a wildcard search can run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
  /// Official birth records, by `LastName` / `FirstName`.
  Births,
  /// The geoNAMES place-name dataset, by `GEONAME` / `COUNTY`.
  Places,
}

/// One bounded page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
  pub rows:          Vec<Row>,
  /// Rows actually returned; never more than `max_rows` when it is set.
  pub row_count:     usize,
  /// Rows the search would match without the limit.
  pub total_matches: usize,
  pub max_rows:      usize,
}

impl SearchPage {
  /// More rows matched than were returned.
  pub fn is_truncated(&self) -> bool { self.total_matches > self.row_count }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the GenDat database.
///
/// Official source records are read-only. Overlay records are created on
/// first submit and then updated in place; there is no delete.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Official source records ───────────────────────────────────────────

  /// The official record `id`, or `None` if there is no such record.
  fn source_record(
    &self,
    domain: RecordDomain,
    id: i64,
  ) -> impl Future<Output = Result<Option<Row>, Self::Error>> + Send + '_;

  fn source_exists(
    &self,
    domain: RecordDomain,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The smallest official record id strictly greater than `id`.
  fn next_record_id(
    &self,
    domain: RecordDomain,
    id: i64,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + '_;

  // ── Overlay records ───────────────────────────────────────────────────

  /// The overlay for record `id`, or `None` if none has been saved yet.
  fn overlay(
    &self,
    domain: RecordDomain,
    id: i64,
  ) -> impl Future<Output = Result<Option<FieldSet>, Self::Error>> + Send + '_;

  /// Store `fields` for record `id`, first creating the row when
  /// `new_record` is set. Returns the number of rows the update touched.
  ///
  /// The insert and the update are separate statements; there is no
  /// transaction around them.
  fn save_overlay(
    &self,
    id: i64,
    fields: FieldSet,
    new_record: bool,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Every record that has an overlay, joined with its official record and
  /// ordered by surname, year, given name and id.
  fn list_records(
    &self,
    domain: RecordDomain,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  // ── Genealogy database ────────────────────────────────────────────────

  /// Assemble the display record for genealogy person `person_id`.
  fn person_view<'a>(
    &'a self,
    person_id: &'a str,
  ) -> impl Future<Output = Result<PersonView, Self::Error>> + Send + 'a;

  // ── Search and place names ────────────────────────────────────────────

  /// Run a wildcard search returning at most `max_rows` rows (0 = no limit).
  fn search(
    &self,
    target: SearchTarget,
    criteria: Criteria,
    max_rows: usize,
  ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send + '_;

  /// One geoNAMES record by `OBJECTID`.
  fn place(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Row>, Self::Error>> + Send + '_;
}
