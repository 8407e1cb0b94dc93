//! Nova Scotia place-name search and detail pages.

use axum::{
  Form,
  extract::{Query, State},
  response::Html,
};
use gendat_core::{
  place::{COUNTIES, cgndb_url, county_pattern, feature_type_url, map_url},
  search::Criteria,
  store::{RecordStore, SearchPage, SearchTarget},
};
use serde::Deserialize;

use crate::{
  AppState,
  error::Error,
  handlers::{IdQuery, not_in_database, page, parse_id},
  html::Page,
};

const MAX_ROWS: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct PlaceForm {
  #[serde(rename = "PlaceName", default)]
  pub place_name: String,
  /// Index into [`COUNTIES`]; anything unparseable means any county.
  #[serde(rename = "County", default)]
  pub county:     String,
  /// Set by the Reset button.
  #[serde(default)]
  pub reset:      Option<String>,
}

impl PlaceForm {
  fn county_index(&self) -> usize {
    self
      .county
      .trim()
      .parse()
      .ok()
      .filter(|i| *i < COUNTIES.len())
      .unwrap_or(0)
  }

  fn criteria(&self) -> Criteria {
    let mut criteria = Criteria::new();
    criteria.add("GEONAME", self.place_name.trim());
    if let Some(pattern) = county_pattern(self.county_index()) {
      criteria.add("COUNTY", &pattern);
    }
    criteria
  }
}

pub async fn form<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>, Error> {
  let page = search_page(&state, &PlaceForm::default());
  Ok(Html(page.finish()?))
}

pub async fn submit<S: RecordStore>(
  State(state): State<AppState<S>>,
  Form(form): Form<PlaceForm>,
) -> Result<Html<String>, Error> {
  if form.reset.is_some() {
    return Ok(Html(search_page(&state, &PlaceForm::default()).finish()?));
  }
  let mut page = search_page(&state, &form);

  // A place name is required; without one there is nothing to search for.
  if !form.place_name.trim().is_empty() {
    let results = state
      .store
      .search(SearchTarget::Places, form.criteria(), MAX_ROWS)
      .await
      .map_err(Error::store)?;
    write_results(&mut page, &results);
  }
  Ok(Html(page.finish()?))
}

fn search_page<S: RecordStore>(state: &AppState<S>, form: &PlaceForm) -> Page {
  let mut page = page(state, "NS Place Names");
  page.heading("Nova Scotia Place Names");
  page.start("p", &[]);
  page.text("This page searches the ");
  page.link(
    "https://geonova.novascotia.ca/place-names",
    "Nova Scotia GeoNAMES dataset",
  );
  page.text(", which contains all current approved and official geographic names for the Province of Nova Scotia.");
  page.end("p");

  page.form("/places");
  page.start("fieldset", &[]).element("legend", &[], "Search");
  page.start("div", &[("class", "field")]);
  page.required_field("PlaceName", "Place Name", &form.place_name);
  page.end("div");
  page.start("div", &[("class", "field")]);
  page.element("label", &[("for", "County")], "County");
  page.select("County", &COUNTIES, form.county_index());
  page.end("div");
  page
    .start("div", &[("class", "button")])
    .submit("Submit")
    .reset("Reset")
    .end("div");
  page.end("fieldset");
  page.end("form");

  page.paragraph(
    "The search field can contain wildcards. For example, a search for u*musq* would return information about Upper Musquodoboit.",
  );
  page.empty("hr", &[]);
  page
}

fn write_results(page: &mut Page, results: &SearchPage) {
  if results.rows.is_empty() {
    page.paragraph("No matches found");
    return;
  }
  if results.is_truncated() {
    page.paragraph(&format!(
      "Your search matched {} records, but only {} are shown here. Please refine the search",
      results.total_matches, results.max_rows,
    ));
  }

  for row in &results.rows {
    page.link(&format!("/places/view?id={}", row.text("OBJECTID")), row.text("GEONAME"));
    page.start("ul", &[]);
    page.element("li", &[], row.text("LOCN_NARR"));
    page.element("li", &[], &format!("County(s): {}", row.text("COUNTY")));
    page.end("ul");
  }
}

pub async fn view<S: RecordStore>(
  State(state): State<AppState<S>>,
  Query(query): Query<IdQuery>,
) -> Result<Html<String>, Error> {
  let id = parse_id(query.id.as_deref())?;
  let row = state
    .store
    .place(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| not_in_database("OBJECTID", id))?;

  let name = row.text("GEONAME");
  let mut page = page(&state, name);
  page.heading(name);

  detail(&mut page, "CGNDB Key", |p| {
    p.text(row.text("CGNDB_KEY"));
  });
  detail(&mut page, "Location", |p| {
    p.link(&map_url(&row), "Map").text(" - ").text(row.text("LOCN_NARR"));
  });
  detail(&mut page, "Type", |p| {
    p.link(&feature_type_url(&row), row.text("GENERIC_TM"));
  });
  for (label, column) in DESCRIPTIVE_COLUMNS {
    detail(&mut page, label, |p| {
      p.text(row.text(column));
    });
  }

  page.start("p", &[]);
  page.text("For more information, see this ");
  page.link(&cgndb_url(&row), "record");
  page.text(" in the Canadian Geographical Names Data Base (CGNDB).");
  page.end("p");

  Ok(Html(page.finish()?))
}

const DESCRIPTIVE_COLUMNS: [(&str, &str); 7] = [
  ("Description", "CONCISE_DS"),
  ("Administrative Location", "ADMIN_LOC"),
  ("County(s)", "COUNTY"),
  ("Status", "STATUS_DS"),
  ("NTS Map Number(s)", "NTS_MAP"),
  ("Jurisdictional Narrative", "JURR_NARR"),
  ("Historical Narrative", "ORIG_NARR"),
];

/// A label/value pair of `<div>`s.
fn detail(page: &mut Page, label: &str, value: impl FnOnce(&mut Page)) {
  page.element("div", &[("class", "text-left")], label);
  page.start("div", &[("class", "text-right")]);
  value(page);
  page.end("div");
}
