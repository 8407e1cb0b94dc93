//! Genealogy-database people (PhpGedView individuals).

use serde::{Deserialize, Serialize};

/// PhpGedView's marker for an unknown name.
pub const UNKNOWN_NAME_MARKER: &str = "@N.N.";

/// Placeholder shown instead of [`UNKNOWN_NAME_MARKER`].
pub const UNKNOWN_NAME: &str = "(unknown)";

/// Replace every unknown-name marker in a stored name.
pub fn display_name(raw: &str) -> String {
  raw.replace(UNKNOWN_NAME_MARKER, UNKNOWN_NAME)
}

/// URL of an individual's page in the PhpGedView installation at `base_url`.
pub fn individual_url(base_url: &str, id: &str) -> String {
  format!("{base_url}individual.php?pid={id}&ged=base.ged")
}

/// Where birth and death facts of a person are stored.
///
/// Chosen once at configuration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonFactsKind {
  /// One raw GEDCOM record per individual plus a families table.
  #[default]
  Gedcom,
  /// Normalised per-fact tables (`births_1`, `deaths_2`, `parents`, …).
  Structured,
}

/// Facts about one person, as read from whichever storage is configured.
/// `None` means "not recorded", never a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFacts {
  pub birth_date:  Option<String>,
  pub birth_place: Option<String>,
  pub death_date:  Option<String>,
  pub death_place: Option<String>,
  pub father_id:   Option<String>,
  pub mother_id:   Option<String>,
}

/// A renderable reference to a person: a named link when the person is
/// known to the genealogy database, otherwise the bare id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonLink {
  pub id:   String,
  pub name: Option<String>,
  pub url:  Option<String>,
}

impl PersonLink {
  pub fn bare(id: impl Into<String>) -> Self {
    Self { id: id.into(), name: None, url: None }
  }

  pub fn named(id: impl Into<String>, name: String, base_url: &str) -> Self {
    let id = id.into();
    let url = individual_url(base_url, &id);
    Self { id, name: Some(name), url: Some(url) }
  }

  /// Link text: the name if known, else the id.
  pub fn text(&self) -> &str { self.name.as_deref().unwrap_or(&self.id) }
}

/// The display record assembled for one person id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonView {
  pub link:        PersonLink,
  pub birth_date:  Option<String>,
  pub birth_place: Option<String>,
  pub death_date:  Option<String>,
  pub death_place: Option<String>,
  pub father:      Option<PersonLink>,
  pub mother:      Option<PersonLink>,
}

impl PersonView {
  /// The view of a person with no name record: the bare id and nothing else.
  pub fn unknown(id: impl Into<String>) -> Self {
    Self {
      link:        PersonLink::bare(id),
      birth_date:  None,
      birth_place: None,
      death_date:  None,
      death_place: None,
      father:      None,
      mother:      None,
    }
  }

  pub fn is_known(&self) -> bool { self.link.name.is_some() }
}
