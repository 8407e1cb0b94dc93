//! Record domains: births, deaths and marriages.
//!
//! Each domain pairs an immutable official source table with a user-editable
//! overlay table keyed by the same identifier. The overlay's fixed, ordered
//! field list drives the edit form, form validation, and the SQL that stores
//! it.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Linked people ───────────────────────────────────────────────────────────

/// Which genealogy person a cross-reference field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
  Subject,
  Father,
  Mother,
  Groom,
  Bride,
}

impl PersonRole {
  /// Overlay field holding this person's genealogy id.
  pub fn id_field(self) -> &'static str {
    match self {
      PersonRole::Subject => "n_id",
      PersonRole::Father => "n_id_f",
      PersonRole::Mother => "n_id_m",
      PersonRole::Groom => "n_id_g",
      PersonRole::Bride => "n_id_b",
    }
  }
}

/// Which attribute of a linked person's view is shown beside a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonAttr {
  Link,
  BirthDate,
  BirthPlace,
  DeathDate,
  DeathPlace,
  FatherLink,
  MotherLink,
}

/// The genealogy-database column shown next to an overlay field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenealogyCell {
  pub role: PersonRole,
  pub attr: PersonAttr,
}

/// One named, nullable text field of an overlay record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub name:      &'static str,
  pub label:     &'static str,
  pub genealogy: Option<GenealogyCell>,
}

const fn plain(name: &'static str, label: &'static str) -> FieldSpec {
  FieldSpec { name, label, genealogy: None }
}

const fn linked(
  name: &'static str,
  label: &'static str,
  role: PersonRole,
  attr: PersonAttr,
) -> FieldSpec {
  FieldSpec { name, label, genealogy: Some(GenealogyCell { role, attr }) }
}

// ─── Field lists ─────────────────────────────────────────────────────────────

use PersonAttr::*;
use PersonRole::*;

const BIRTH_FIELDS: &[FieldSpec] = &[
  linked("name", "Name", Subject, Link),
  linked("birth_date", "Date of Birth", Subject, BirthDate),
  linked("birth_place", "Place of Birth", Subject, BirthPlace),
  linked("father", "Father", Father, Link),
  linked("mother", "Mother", Mother, Link),
  plain("father_residence", "Father's Residence"),
  plain("marriage_date", "Parents' Date of Marriage"),
  plain("marriage_place", "Parents' Place of Marriage"),
  plain("notes", "Notes"),
  plain("n_id", "Child n_id"),
  plain("n_id_f", "Father n_id"),
  plain("n_id_m", "Mother n_id"),
];

const DEATH_FIELDS: &[FieldSpec] = &[
  linked("name", "Name", Subject, Link),
  linked("death_date", "Date of Death", Subject, DeathDate),
  linked("death_place", "Place of Death", Subject, DeathPlace),
  plain("death_age", "Age"),
  plain("death_residence", "Residence"),
  linked("birth_date", "Date of Birth", Subject, BirthDate),
  linked("birth_place", "Place of Birth", Subject, BirthPlace),
  plain("mar_status", "Marital Status"),
  plain("spouse", "Spouse"),
  linked("father", "Father", Subject, FatherLink),
  plain("father_birthplace", "Father's Place of Birth"),
  linked("mother", "Mother", Subject, MotherLink),
  plain("mother_birthplace", "Mother's Place of Birth"),
  plain("informant", "Informant"),
  plain("notes", "Notes"),
  plain("n_id", "n_id"),
];

const MARRIAGE_FIELDS: &[FieldSpec] = &[
  linked("groom", "Groom", Groom, Link),
  plain("groom_age", "Groom's Age"),
  plain("groom_status", "Groom's Status"),
  plain("groom_residence", "Groom's Residence"),
  linked("groom_birthplace", "Groom's Birthplace", Groom, BirthPlace),
  plain("groom_occupation", "Groom's Occupation"),
  linked("groom_father", "Groom's Father", Groom, FatherLink),
  plain("groom_father_birthplace", "Groom's Father's Birthplace"),
  linked("groom_mother", "Groom's Mother", Groom, MotherLink),
  plain("groom_mother_birthplace", "Groom's Mother's Birthplace"),
  linked("bride", "Bride", Bride, Link),
  plain("bride_age", "Bride's Age"),
  plain("bride_status", "Bride's Status"),
  plain("bride_residence", "Bride's Residence"),
  linked("bride_birthplace", "Bride's Birthplace", Bride, BirthPlace),
  plain("bride_occupation", "Bride's Occupation"),
  linked("bride_father", "Bride's Father", Bride, FatherLink),
  plain("bride_father_birthplace", "Bride's Father's Birthplace"),
  linked("bride_mother", "Bride's Mother", Bride, MotherLink),
  plain("bride_mother_birthplace", "Bride's Mother's Birthplace"),
  plain("date", "Marriage Date"),
  plain("place", "Marriage Place"),
  plain("notes", "Notes"),
  plain("n_id_g", "Groom n_id"),
  plain("n_id_b", "Bride n_id"),
];

// ─── Domain ──────────────────────────────────────────────────────────────────

/// A kind of official vital-statistics record with an editable overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordDomain {
  Birth,
  Death,
  Marriage,
}

impl RecordDomain {
  pub const ALL: [RecordDomain; 3] =
    [RecordDomain::Birth, RecordDomain::Death, RecordDomain::Marriage];

  /// URL path segment, e.g. `births` in `/births/edit?id=1`.
  pub fn slug(self) -> &'static str {
    match self {
      RecordDomain::Birth => "births",
      RecordDomain::Death => "deaths",
      RecordDomain::Marriage => "marriages",
    }
  }

  pub fn from_slug(slug: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|d| d.slug() == slug)
      .ok_or_else(|| Error::UnknownDomain(slug.to_string()))
  }

  /// Title of the single-record edit page.
  pub fn title(self) -> &'static str {
    match self {
      RecordDomain::Birth => "NS Birth Record",
      RecordDomain::Death => "NS Death Record",
      RecordDomain::Marriage => "NS Marriage Record",
    }
  }

  /// Title of the summary listing page.
  pub fn list_title(self) -> &'static str {
    match self {
      RecordDomain::Birth => "NS Birth Records",
      RecordDomain::Death => "NS Death Records",
      RecordDomain::Marriage => "NS Marriage Records",
    }
  }

  pub fn source_table(self) -> &'static str {
    match self {
      RecordDomain::Birth => "ns_births",
      RecordDomain::Death => "ns_deaths",
      RecordDomain::Marriage => "ns_marriages",
    }
  }

  pub fn overlay_table(self) -> &'static str {
    match self {
      RecordDomain::Birth => "ns_births_data",
      RecordDomain::Death => "ns_deaths_data",
      RecordDomain::Marriage => "ns_marriages_data",
    }
  }

  /// Identifier column shared by the source and overlay tables.
  pub fn key_field(self) -> &'static str {
    match self {
      RecordDomain::Birth => "BirthID",
      RecordDomain::Death => "Deathid",
      RecordDomain::Marriage => "MarriageID",
    }
  }

  /// The fixed, ordered overlay field list.
  pub fn fields(self) -> &'static [FieldSpec] {
    match self {
      RecordDomain::Birth => BIRTH_FIELDS,
      RecordDomain::Death => DEATH_FIELDS,
      RecordDomain::Marriage => MARRIAGE_FIELDS,
    }
  }

  pub fn field_names(self) -> Vec<&'static str> {
    self.fields().iter().map(|f| f.name).collect()
  }

  /// People this domain links to, in display order.
  pub fn roles(self) -> &'static [PersonRole] {
    match self {
      RecordDomain::Birth => &[Subject, Father, Mother],
      RecordDomain::Death => &[Subject],
      RecordDomain::Marriage => &[Groom, Bride],
    }
  }

  /// Verb used in the one-line record summary.
  pub fn event_verb(self) -> &'static str {
    match self {
      RecordDomain::Birth => "born",
      RecordDomain::Death => "died",
      RecordDomain::Marriage => "married",
    }
  }
}
