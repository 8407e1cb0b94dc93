//! Birth-record name search.

use axum::{Form, extract::State, response::Html};
use gendat_core::{
  domain::RecordDomain,
  search::Criteria,
  store::{RecordStore, SearchPage, SearchTarget},
};
use serde::Deserialize;

use crate::{
  AppState,
  error::Error,
  handlers::{edit_url, page},
  html::{Cell, Page},
};

const MAX_ROWS: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
  #[serde(rename = "LastName", default)]
  pub last_name:  String,
  #[serde(rename = "FirstName", default)]
  pub first_name: String,
}

impl SearchForm {
  fn criteria(&self) -> Criteria {
    let mut criteria = Criteria::new();
    criteria
      .add("LastName", self.last_name.trim())
      .add("FirstName", self.first_name.trim());
    criteria
  }
}

pub async fn form<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>, Error> {
  let page = search_page(&state, &SearchForm::default());
  Ok(Html(page.finish()?))
}

pub async fn submit<S: RecordStore>(
  State(state): State<AppState<S>>,
  Form(form): Form<SearchForm>,
) -> Result<Html<String>, Error> {
  let results = state
    .store
    .search(SearchTarget::Births, form.criteria(), MAX_ROWS)
    .await
    .map_err(Error::store)?;

  let mut page = search_page(&state, &form);
  write_results(&mut page, &results);
  Ok(Html(page.finish()?))
}

fn search_page<S: RecordStore>(state: &AppState<S>, form: &SearchForm) -> Page {
  let mut page = page(state, "GenDat Search");
  page.heading("Search Birth Records");
  page.form("/search");
  page.start("div", &[("class", "field")]);
  page.text_field("LastName", "Surname", &form.last_name);
  page.end("div");
  page.start("div", &[("class", "field")]);
  page.text_field("FirstName", "Given Name(s)", &form.first_name);
  page.end("div");
  page.start("div", &[("class", "button")]).submit("Submit").end("div");
  page.end("form");
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

  let domain = RecordDomain::Birth;
  page.table(
    &["ID", "Last Name", "First Name", "Year", "Place", "County"],
    results.rows.iter().map(|row| {
      let id = row.text(domain.key_field());
      vec![
        Cell::link(edit_url(domain, id), id),
        Cell::opt(row.get("LastName")),
        Cell::opt(row.get("FirstName")),
        Cell::opt(row.get("Year")),
        Cell::opt(row.get("Place")),
        Cell::opt(row.get("County")),
      ]
    }),
  );
}
