//! Landing page.

use axum::{extract::State, response::Html};
use gendat_core::{domain::RecordDomain, store::RecordStore};

use crate::{AppState, error::Error, handlers::page};

pub async fn show<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>, Error> {
  let mut page = page(&state, "GenDat");
  page.heading("Nova Scotia Vital Statistics");

  page.start("ul", &[]);
  for domain in RecordDomain::ALL {
    page.start("li", &[]);
    page.link(&format!("/{}", domain.slug()), domain.list_title());
    page.end("li");
  }
  page.start("li", &[]).link("/search", "Search birth records").end("li");
  page.start("li", &[]).link("/places", "Search place names").end("li");
  page.end("ul");

  Ok(Html(page.finish()?))
}
