//! Single-record edit page: the official record, its overlay form, and the
//! genealogy facts of every linked person side by side.

use std::collections::HashMap;

use axum::{
  Form,
  extract::{Path, Query, State},
  response::Html,
};
use gendat_core::{
  domain::{GenealogyCell, PersonAttr, PersonRole, RecordDomain},
  fields::FieldSet,
  person::PersonView,
  record::{archive_url, summary},
  store::RecordStore,
};

use crate::{
  AppState,
  error::Error,
  handlers::{IdQuery, edit_url, page, parse_id, record_missing},
  html::Cell,
};

const NEW_RECORD: &str = "new_record";

pub async fn show<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
  Query(query): Query<IdQuery>,
) -> Result<Html<String>, Error> {
  let domain = RecordDomain::from_slug(&slug)?;
  let id = parse_id(query.id.as_deref())?;
  render(&state, domain, id).await
}

pub async fn submit<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
  Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, Error> {
  let domain = RecordDomain::from_slug(&slug)?;
  let key = form.get(domain.key_field()).ok_or(Error::LogicError)?;
  let id = parse_id(Some(key))?;
  let new_record = form
    .get(NEW_RECORD)
    .ok_or_else(|| gendat_core::Error::MissingField(NEW_RECORD.to_string()))?
    == "true";
  let fields = FieldSet::from_form(domain, &form)?;

  if !state.store.source_exists(domain, id).await.map_err(Error::store)? {
    return Err(record_missing(domain, id));
  }

  let updated = state
    .store
    .save_overlay(id, fields, new_record)
    .await
    .map_err(Error::store)?;
  tracing::debug!(domain = domain.slug(), id, updated, "overlay submitted");

  render(&state, domain, id).await
}

/// Render the page from what is stored now.
async fn render<S: RecordStore>(
  state: &AppState<S>,
  domain: RecordDomain,
  id: i64,
) -> Result<Html<String>, Error> {
  let source = state
    .store
    .source_record(domain, id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| record_missing(domain, id))?;

  let overlay = state.store.overlay(domain, id).await.map_err(Error::store)?;
  let new_record = overlay.is_none();
  let fields = overlay.unwrap_or_else(|| FieldSet::empty(domain));

  let mut people = Vec::new();
  for &role in domain.roles() {
    if let Some(person_id) = fields.person_id(role) {
      let view = state.store.person_view(person_id).await.map_err(Error::store)?;
      people.push((role, view));
    }
  }

  let next = state.store.next_record_id(domain, id).await.map_err(Error::store)?;

  let mut page = page(state, domain.title());
  page.heading(domain.title());
  page.start("p", &[]);
  page.text(&summary(domain, &source));
  page.text(" ");
  page.link(&archive_url(domain, &source), "Source");
  page.end("p");

  page.form(&format!("/{}/edit", domain.slug()));
  page.table(&["", "NSHVS", "Database"], form_rows(&fields, &people));
  page.hidden(domain.key_field(), &id.to_string());
  page.hidden(NEW_RECORD, if new_record { "true" } else { "false" });
  page.submit("Save");
  page.end("form");

  page.start("p", &[]);
  if let Some(next) = next {
    page.link(&edit_url(domain, &next.to_string()), "Next record");
    page.text(" ");
  }
  page.link(&format!("/{}", domain.slug()), domain.list_title());
  page.end("p");

  Ok(Html(page.finish()?))
}

fn form_rows(fields: &FieldSet, people: &[(PersonRole, PersonView)]) -> Vec<Vec<Cell>> {
  fields
    .iter()
    .map(|(spec, value)| {
      vec![
        Cell::Label { for_id: spec.name.to_string(), text: spec.label.to_string() },
        Cell::Input {
          name:  spec.name.to_string(),
          value: value.unwrap_or("").to_string(),
        },
        spec.genealogy.map_or(Cell::Empty, |g| genealogy_cell(g, people)),
      ]
    })
    .collect()
}

fn genealogy_cell(cell: GenealogyCell, people: &[(PersonRole, PersonView)]) -> Cell {
  let Some((_, view)) = people.iter().find(|(role, _)| *role == cell.role) else {
    return Cell::Empty;
  };
  match cell.attr {
    PersonAttr::Link => Cell::person(&view.link),
    PersonAttr::BirthDate => Cell::opt(view.birth_date.as_deref()),
    PersonAttr::BirthPlace => Cell::opt(view.birth_place.as_deref()),
    PersonAttr::DeathDate => Cell::opt(view.death_date.as_deref()),
    PersonAttr::DeathPlace => Cell::opt(view.death_place.as_deref()),
    PersonAttr::FatherLink => view.father.as_ref().map_or(Cell::Empty, Cell::person),
    PersonAttr::MotherLink => view.mother.as_ref().map_or(Cell::Empty, Cell::person),
  }
}
