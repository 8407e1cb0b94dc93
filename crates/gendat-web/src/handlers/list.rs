//! Summary listing of every record that has an overlay.

use axum::{
  extract::{Path, State},
  response::Html,
};
use gendat_core::{
  domain::RecordDomain,
  person::individual_url,
  record::{Row, archive_url},
  store::RecordStore,
};

use crate::{
  AppState,
  error::Error,
  handlers::{edit_url, page},
  html::Cell,
};

const VITAL_HEADERS: &[&str] =
  &["ID", "Last Name", "First Name", "Place", "Year", "Name", "URL"];

const MARRIAGE_HEADERS: &[&str] = &[
  "Marriage ID",
  "URL",
  "NSHVS Groom",
  "NSHVS Bride",
  "Year",
  "Groom",
  "Groom n_id",
  "Bride",
  "Bride n_id",
  "Family",
];

pub async fn show<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error> {
  let domain = RecordDomain::from_slug(&slug)?;
  let rows = state.store.list_records(domain).await.map_err(Error::store)?;
  let base_url = &state.config.pgv_base_url;

  let mut page = page(&state, domain.list_title());
  page.heading(domain.list_title());
  match domain {
    RecordDomain::Marriage => page.table(
      MARRIAGE_HEADERS,
      rows.iter().map(|row| marriage_row(row, base_url)),
    ),
    _ => page.table(VITAL_HEADERS, rows.iter().map(|row| vital_row(domain, row))),
  };
  page.paragraph(&format!("{} records", rows.len()));
  page.link("/", "Home");

  Ok(Html(page.finish()?))
}

fn vital_row(domain: RecordDomain, row: &Row) -> Vec<Cell> {
  let id = row.text(domain.key_field());
  vec![
    Cell::link(edit_url(domain, id), id),
    Cell::opt(row.get("LastName")),
    Cell::opt(row.get("FirstName")),
    Cell::opt(row.get("Place")),
    Cell::opt(row.get("Year")),
    Cell::opt(row.get("name")),
    Cell::link(archive_url(domain, row), "Source"),
  ]
}

fn marriage_row(row: &Row, base_url: &str) -> Vec<Cell> {
  let domain = RecordDomain::Marriage;
  let id = row.text(domain.key_field());
  vec![
    Cell::link(edit_url(domain, id), id),
    Cell::link(archive_url(domain, row), "Source"),
    Cell::text(format!("{}, {}", row.text("GroomLastName"), row.text("GroomFirstName"))),
    Cell::text(format!("{}, {}", row.text("BrideLastName"), row.text("BrideFirstName"))),
    Cell::opt(row.get("Year")),
    Cell::opt(row.get("groom")),
    pgv_cell(row.get("n_id_g"), base_url),
    Cell::opt(row.get("bride")),
    pgv_cell(row.get("n_id_b"), base_url),
    Cell::opt(row.get("f_id")),
  ]
}

fn pgv_cell(id: Option<&str>, base_url: &str) -> Cell {
  match id.filter(|id| !id.is_empty()) {
    Some(id) => Cell::link(individual_url(base_url, id), id),
    None => Cell::Empty,
  }
}
