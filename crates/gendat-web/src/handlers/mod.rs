//! Page handlers.
//!
//! Every handler renders a complete page or fails with [`Error`]; there are
//! no partial responses.

pub mod edit;
pub mod index;
pub mod list;
pub mod places;
pub mod search;

use gendat_core::{domain::RecordDomain, store::RecordStore};
use serde::Deserialize;

use crate::{AppState, error::Error, html::Page};

/// `?id=N` on record and place pages.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
  pub id: Option<String>,
}

/// A record id must be a positive integer.
pub(crate) fn parse_id(raw: Option<&str>) -> Result<i64, Error> {
  raw
    .and_then(|s| s.trim().parse::<i64>().ok())
    .filter(|id| *id > 0)
    .ok_or(Error::InvalidId)
}

pub(crate) fn not_in_database(key: &str, id: i64) -> Error {
  Error::NotFound(format!("{key} {id} is not in the database."))
}

pub(crate) fn record_missing(domain: RecordDomain, id: i64) -> Error {
  not_in_database(domain.key_field(), id)
}

pub(crate) fn page<S: RecordStore>(state: &AppState<S>, title: &str) -> Page {
  Page::new(title, &state.config.stylesheet)
}

pub(crate) fn edit_url(domain: RecordDomain, id: &str) -> String {
  format!("/{}/edit?id={id}", domain.slug())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_must_be_positive_integers() {
    assert_eq!(parse_id(Some("42")).unwrap(), 42);
    assert_eq!(parse_id(Some(" 7 ")).unwrap(), 7);
    for bad in [None, Some(""), Some("0"), Some("-3"), Some("12a"), Some("1.5")] {
      assert!(matches!(parse_id(bad), Err(Error::InvalidId)), "{bad:?}");
    }
  }

  #[test]
  fn missing_record_message_names_the_key() {
    assert_eq!(
      record_missing(RecordDomain::Death, 9).to_string(),
      "Deathid 9 is not in the database."
    );
  }
}
