//! Person lookup against the PhpGedView genealogy database.
//!
//! A person's name always comes from the `pgv_name` table. Birth, death and
//! parent facts come from a [`PersonFactSource`], of which there are two
//! storage layouts; the deployment picks one.

use gendat_core::person::{PersonFacts, PersonLink, PersonView, display_name};
use gendat_gedcom::{extract_tag, extract_xref};
use rusqlite::Connection;

use crate::{Result, safe::select_rows};

// ─── Table names ─────────────────────────────────────────────────────────────

/// Fully-qualified names of the genealogy tables.
///
/// PhpGedView prefixes its table names per installation, and the genealogy
/// database may be attached under its own schema name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgvTables {
  schema: Option<String>,
  prefix: String,
}

impl PgvTables {
  pub fn new(schema: Option<&str>, prefix: &str) -> Self {
    Self { schema: schema.map(str::to_string), prefix: prefix.to_string() }
  }

  /// `[schema.]{prefix}{name}`.
  pub fn table(&self, name: &str) -> String {
    match &self.schema {
      Some(schema) => format!("{schema}.{}{name}", self.prefix),
      None => format!("{}{name}", self.prefix),
    }
  }

  pub fn names(&self) -> String { self.table("pgv_name") }

  pub fn individuals(&self) -> String { self.table("pgv_individuals") }

  pub fn families(&self) -> String { self.table("pgv_families") }
}

// ─── Fact sources ────────────────────────────────────────────────────────────

/// Reads the birth, death and parent facts of one person.
///
/// Absent facts are `None`; only database failures are errors.
pub trait PersonFactSource: Send + Sync {
  fn facts(
    &self,
    conn: &Connection,
    tables: &PgvTables,
    person_id: &str,
  ) -> Result<PersonFacts>;
}

/// One narrow table per fact: `births_1(DoB)`, `births_2(PoB)`,
/// `deaths_1(DoD)`, `deaths_2(PoD)` and `parents(father, mother)`, all keyed
/// by `i_id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredTables;

impl PersonFactSource for StructuredTables {
  fn facts(
    &self,
    conn: &Connection,
    tables: &PgvTables,
    person_id: &str,
  ) -> Result<PersonFacts> {
    let value = |table: &str, column: &str| {
      first_value(conn, &tables.table(table), column, "i_id", person_id)
    };

    let parents = select_rows(
      conn,
      &tables.table("parents"),
      &["father", "mother"],
      "i_id",
      person_id,
    )?;
    let parents = parents.first();

    Ok(PersonFacts {
      birth_date:  value("births_1", "DoB")?,
      birth_place: value("births_2", "PoB")?,
      death_date:  value("deaths_1", "DoD")?,
      death_place: value("deaths_2", "PoD")?,
      father_id:   parents.and_then(|r| present(r.get("father"))),
      mother_id:   parents.and_then(|r| present(r.get("mother"))),
    })
  }
}

/// The individual's raw GEDCOM record in `pgv_individuals.i_gedcom`, with
/// parents found through its `FAMC` family in `pgv_families`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GedcomBlob;

impl PersonFactSource for GedcomBlob {
  fn facts(
    &self,
    conn: &Connection,
    tables: &PgvTables,
    person_id: &str,
  ) -> Result<PersonFacts> {
    let Some(gedcom) =
      first_value(conn, &tables.individuals(), "i_gedcom", "i_id", person_id)?
    else {
      return Ok(PersonFacts::default());
    };

    let (father_id, mother_id) = match extract_xref(&gedcom, "FAMC") {
      Some(family) => {
        let rows = select_rows(
          conn,
          &tables.families(),
          &["f_husb", "f_wife"],
          "f_id",
          family,
        )?;
        let row = rows.first();
        (
          row.and_then(|r| present(r.get("f_husb"))),
          row.and_then(|r| present(r.get("f_wife"))),
        )
      }
      None => (None, None),
    };

    Ok(PersonFacts {
      birth_date:  gedcom_value(&gedcom, &["BIRT", "DATE"]),
      birth_place: gedcom_value(&gedcom, &["BIRT", "PLAC"]),
      death_date:  gedcom_value(&gedcom, &["DEAT", "DATE"]),
      death_place: gedcom_value(&gedcom, &["DEAT", "PLAC"]),
      father_id,
      mother_id,
    })
  }
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// The display name of `person_id`, or `None` if the genealogy database has
/// no name for it.
pub fn lookup_name(
  conn: &Connection,
  tables: &PgvTables,
  person_id: &str,
) -> Result<Option<String>> {
  let name = first_value(conn, &tables.names(), "n_list", "n_id", person_id)?;
  Ok(name.map(|n| display_name(&n)))
}

/// Assemble the view of `person_id`.
///
/// A person without a name record is shown as the bare id and nothing else
/// is looked up. Parents become named links when they too have a name.
pub fn build_person_view(
  conn: &Connection,
  tables: &PgvTables,
  source: &dyn PersonFactSource,
  base_url: &str,
  person_id: &str,
) -> Result<PersonView> {
  let Some(name) = lookup_name(conn, tables, person_id)? else {
    return Ok(PersonView::unknown(person_id));
  };
  let facts = source.facts(conn, tables, person_id)?;

  let link = |id: Option<String>| -> Result<Option<PersonLink>> {
    let Some(id) = id else { return Ok(None) };
    Ok(Some(match lookup_name(conn, tables, &id)? {
      Some(name) => PersonLink::named(id, name, base_url),
      None => PersonLink::bare(id),
    }))
  };

  Ok(PersonView {
    link:        PersonLink::named(person_id, name, base_url),
    birth_date:  facts.birth_date,
    birth_place: facts.birth_place,
    death_date:  facts.death_date,
    death_place: facts.death_place,
    father:      link(facts.father_id)?,
    mother:      link(facts.mother_id)?,
  })
}

fn first_value(
  conn: &Connection,
  table: &str,
  column: &str,
  key_field: &str,
  key_value: &str,
) -> Result<Option<String>> {
  let rows = select_rows(conn, table, &[column], key_field, key_value)?;
  Ok(rows.first().and_then(|r| present(r.get(column))))
}

fn gedcom_value(gedcom: &str, path: &[&str]) -> Option<String> {
  present(extract_tag(gedcom, path))
}

fn present(value: Option<&str>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
