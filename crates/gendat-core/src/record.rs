//! Result rows and official source-record helpers.
//!
//! Official source records are immutable reference data; GenDat only reads
//! them, summarises them in one line, and links out to the provincial
//! archive.

use chrono::Month;

use crate::domain::RecordDomain;

// ─── Row ─────────────────────────────────────────────────────────────────────

/// One result row: an ordered mapping from column name to nullable text.
///
/// Every value is carried as text regardless of its storage type; a SQL
/// `NULL` is `None`, which keeps a row of all nulls distinct from "no row".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
  columns: Vec<(String, Option<String>)>,
}

impl Row {
  pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
    self.columns.push((name.into(), value));
  }

  /// Value of the first column called `name`; `None` if absent or null.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .columns
      .iter()
      .find(|(n, _)| n == name)
      .and_then(|(_, v)| v.as_deref())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.columns.iter().any(|(n, _)| n == name)
  }

  /// Column value or the empty string, for display.
  pub fn text(&self, name: &str) -> &str { self.get(name).unwrap_or("") }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
    self.columns.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
  }

  pub fn len(&self) -> usize { self.columns.len() }

  pub fn is_empty(&self) -> bool { self.columns.is_empty() }
}

impl<N: Into<String>> FromIterator<(N, Option<String>)> for Row {
  fn from_iter<I: IntoIterator<Item = (N, Option<String>)>>(iter: I) -> Self {
    Self {
      columns: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
    }
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Render a partially-known event date.
///
/// Some records carry only a year, others a month too, others a full date:
/// `"1890"`, `"March 1890"`, `"12 March 1890"`. A day without a month is
/// ignored, as is an out-of-range month.
pub fn format_event_date(
  day: Option<&str>,
  month: Option<&str>,
  year: Option<&str>,
) -> String {
  let year = year.unwrap_or("").trim();
  let month_name = month
    .and_then(|m| m.trim().parse::<u8>().ok())
    .and_then(|m| Month::try_from(m).ok())
    .map(|m| m.name());

  match month_name {
    None => year.to_string(),
    Some(name) => {
      let mut date = format!("{name} {year}");
      if let Some(day) = day.map(str::trim).filter(|d| !d.is_empty()) {
        date = format!("{day} {date}");
      }
      date
    }
  }
}

// ─── Source records ──────────────────────────────────────────────────────────

/// URL of this record in the Nova Scotia Historical Vital Statistics archive.
pub fn archive_url(domain: RecordDomain, row: &Row) -> String {
  let id = row.text(domain.key_field());
  match domain {
    RecordDomain::Birth => {
      format!("https://archives.novascotia.ca/vital-statistics/birth/?ID={id}")
    }
    RecordDomain::Death => format!(
      "https://www.novascotiagenealogy.com/ItemView.aspx?ImageFile={}-{}&Event=death&ID={id}",
      row.text("RegBook"),
      row.text("RegPage"),
    ),
    RecordDomain::Marriage => format!(
      "https://archives.novascotia.ca/vital-statistics/marriage/?ID={id}"
    ),
  }
}

/// One-line description, e.g. `"Mary Smith, born 3 May 1901 in Truro,
/// Colchester County"`.
pub fn summary(domain: RecordDomain, row: &Row) -> String {
  let who = match domain {
    RecordDomain::Marriage => format!(
      "{} {} and {} {}",
      row.text("BrideFirstName"),
      row.text("BrideLastName"),
      row.text("GroomFirstName"),
      row.text("GroomLastName"),
    ),
    _ => format!("{} {}", row.text("FirstName"), row.text("LastName")),
  };
  let date =
    format_event_date(row.get("Day"), row.get("Month"), row.get("Year"));

  let mut out = format!("{who}, {} {date} in ", domain.event_verb());
  if let Some(place) = row.get("Place").filter(|p| !p.is_empty()) {
    out.push_str(place);
    out.push_str(", ");
  }
  out.push_str(row.text("County"));
  out.push_str(" County");
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(pairs: &[(&str, Option<&str>)]) -> Row {
    pairs
      .iter()
      .map(|(n, v)| (*n, v.map(str::to_string)))
      .collect()
  }

  #[test]
  fn null_column_differs_from_missing_column() {
    let r = row(&[("a", None)]);
    assert!(r.contains("a"));
    assert_eq!(r.get("a"), None);
    assert!(!r.contains("b"));
    assert!(!r.is_empty());
  }

  #[test]
  fn year_only_date() {
    assert_eq!(format_event_date(None, None, Some("1890")), "1890");
  }

  #[test]
  fn month_and_year_date() {
    assert_eq!(format_event_date(None, Some("3"), Some("1890")), "March 1890");
  }

  #[test]
  fn full_date() {
    assert_eq!(
      format_event_date(Some("12"), Some("3"), Some("1890")),
      "12 March 1890"
    );
  }

  #[test]
  fn day_without_month_is_dropped() {
    assert_eq!(format_event_date(Some("12"), None, Some("1890")), "1890");
  }

  #[test]
  fn birth_archive_url_uses_id() {
    let r = row(&[("BirthID", Some("42"))]);
    assert_eq!(
      archive_url(RecordDomain::Birth, &r),
      "https://archives.novascotia.ca/vital-statistics/birth/?ID=42"
    );
  }

  #[test]
  fn death_archive_url_uses_book_and_page() {
    let r = row(&[
      ("Deathid", Some("7")),
      ("RegBook", Some("1815")),
      ("RegPage", Some("210")),
    ]);
    assert_eq!(
      archive_url(RecordDomain::Death, &r),
      "https://www.novascotiagenealogy.com/ItemView.aspx?ImageFile=1815-210&Event=death&ID=7"
    );
  }

  #[test]
  fn summary_skips_missing_place() {
    let r = row(&[
      ("FirstName", Some("Mary")),
      ("LastName", Some("Smith")),
      ("Day", Some("3")),
      ("Month", Some("5")),
      ("Year", Some("1901")),
      ("Place", None),
      ("County", Some("Colchester")),
    ]);
    assert_eq!(
      summary(RecordDomain::Birth, &r),
      "Mary Smith, born 3 May 1901 in Colchester County"
    );
  }

  #[test]
  fn marriage_summary_names_both_parties() {
    let r = row(&[
      ("BrideFirstName", Some("Ann")),
      ("BrideLastName", Some("Hiltz")),
      ("GroomFirstName", Some("John")),
      ("GroomLastName", Some("Himmelman")),
      ("Year", Some("1870")),
      ("Place", Some("Mahone Bay")),
      ("County", Some("Lunenburg")),
    ]);
    assert_eq!(
      summary(RecordDomain::Marriage, &r),
      "Ann Hiltz and John Himmelman, married 1870 in Mahone Bay, Lunenburg County"
    );
  }
}
