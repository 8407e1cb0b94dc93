//! [`WildcardSearch`]: the executor half of the wildcard search builder.
//!
//! Criteria accumulate in a [`Criteria`]; `execute` appends its WHERE clause
//! (and a `LIMIT` when bounded) to a caller-supplied base query, binds every
//! pattern as text, and buffers the results. Rows are then consumed one at a
//! time. A search must be `close`d before it can run again.

use std::collections::VecDeque;

use gendat_core::{record::Row, search::Criteria};
use rusqlite::Connection;

use crate::{Error, Result, safe::safe_select};

/// State that only exists between `execute` and `close`.
#[derive(Debug)]
struct Executed {
  /// Base query plus WHERE clause, without the limit.
  unbounded: String,
  values:    Vec<String>,
  max_rows:  usize,
  row_count: usize,
  rows:      VecDeque<Row>,
  total:     Option<usize>,
}

#[derive(Debug, Default)]
pub struct WildcardSearch {
  criteria: Criteria,
  executed: Option<Executed>,
}

impl WildcardSearch {
  pub fn new() -> Self { Self::default() }

  /// Start from an already-built criteria set.
  pub fn with_criteria(criteria: Criteria) -> Self {
    Self { criteria, executed: None }
  }

  /// Match `field` against the user pattern `pattern`; empty patterns add
  /// nothing.
  pub fn add_criterion(&mut self, field: &str, pattern: &str) -> &mut Self {
    self.criteria.add(field, pattern);
    self
  }

  pub fn clear_criteria(&mut self) { self.criteria = Criteria::new(); }

  pub fn criteria(&self) -> &Criteria { &self.criteria }

  /// The statement `execute` would run.
  pub fn query(&self, base_query: &str, max_rows: usize) -> String {
    let mut query = format!("{base_query}{}", self.criteria.where_clause());
    if max_rows > 0 {
      query.push_str(&format!(" LIMIT {max_rows}"));
    }
    query
  }

  /// Run the search, returning at most `max_rows` rows (0 = unbounded).
  pub fn execute(
    &mut self,
    conn: &Connection,
    base_query: &str,
    max_rows: usize,
  ) -> Result<()> {
    if self.executed.is_some() {
      return Err(Error::SearchNotClosed);
    }

    let query = self.query(base_query, max_rows);
    let values = self.criteria.values();
    tracing::debug!(%query, ?values, "executing search");
    let rows = safe_select(conn, &query, &values)?;

    self.executed = Some(Executed {
      unbounded: format!("{base_query}{}", self.criteria.where_clause()),
      values: values.into_iter().map(str::to_string).collect(),
      max_rows,
      row_count: rows.len(),
      rows: rows.into(),
      total: None,
    });
    Ok(())
  }

  /// Rows the last `execute` returned; 0 when nothing has run.
  pub fn row_count(&self) -> usize {
    self.executed.as_ref().map_or(0, |e| e.row_count)
  }

  /// Rows the search would match without its limit.
  ///
  /// Only a search that filled its limit asks the database again; the answer
  /// is cached until `close`.
  pub fn total_match_count(&mut self, conn: &Connection) -> Result<usize> {
    let Some(executed) = self.executed.as_mut() else {
      return Ok(0);
    };
    if let Some(total) = executed.total {
      return Ok(total);
    }

    let total = if executed.max_rows > 0 && executed.row_count == executed.max_rows {
      let query = format!("SELECT COUNT(*) AS total FROM ({})", executed.unbounded);
      let values: Vec<&str> = executed.values.iter().map(String::as_str).collect();
      let rows = safe_select(conn, &query, &values)?;
      parse_count(rows.first().and_then(|r| r.get("total")).unwrap_or("0"))?
    } else {
      executed.row_count
    };

    executed.total = Some(total);
    Ok(total)
  }

  /// The next buffered row, or `None` once every row has been taken.
  pub fn fetch_row(&mut self) -> Option<Row> {
    self.executed.as_mut().and_then(|e| e.rows.pop_front())
  }

  /// Discard results and counts so the search can be executed again.
  /// Criteria are kept.
  pub fn close(&mut self) { self.executed = None; }
}

fn parse_count(count: &str) -> Result<usize> {
  count.parse().map_err(|_| Error::InvalidCount(count.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  const BASE: &str = "SELECT OBJECTID, GEONAME, COUNTY FROM ns_geonames";

  fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn
      .execute_batch(
        "CREATE TABLE ns_geonames (OBJECTID INTEGER PRIMARY KEY, GEONAME TEXT, COUNTY TEXT);
         INSERT INTO ns_geonames VALUES (1, 'Musquodoboit', 'Halifax');
         INSERT INTO ns_geonames VALUES (2, 'Upper Musquodoboit', 'Halifax');
         INSERT INTO ns_geonames VALUES (3, 'Truro', 'Colchester');
         INSERT INTO ns_geonames VALUES (4, 'Hantsport', 'Kings, Hants');
         INSERT INTO ns_geonames VALUES (5, NULL, NULL);",
      )
      .unwrap();
    conn
  }

  fn drain(search: &mut WildcardSearch) -> Vec<Row> {
    std::iter::from_fn(|| search.fetch_row()).collect()
  }

  #[test]
  fn query_has_no_where_without_criteria() {
    let s = WildcardSearch::new();
    assert_eq!(s.query(BASE, 0), BASE);
    assert_eq!(s.query(BASE, 20), format!("{BASE} LIMIT 20"));
  }

  #[test]
  fn query_uses_like_only_for_wildcards() {
    let mut s = WildcardSearch::new();
    s.add_criterion("GEONAME", "u*musq*").add_criterion("COUNTY", "Halifax");
    assert_eq!(
      s.query(BASE, 0),
      format!("{BASE} WHERE GEONAME LIKE ? AND COUNTY = ?")
    );
  }

  #[test]
  fn wildcard_search_matches() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.add_criterion("GEONAME", "u*musq*");
    s.execute(&c, BASE, 0).unwrap();
    assert_eq!(s.row_count(), 1);
    let row = s.fetch_row().unwrap();
    assert_eq!(row.get("GEONAME"), Some("Upper Musquodoboit"));
    assert!(s.fetch_row().is_none());
  }

  #[test]
  fn exact_match_without_wildcard() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.add_criterion("GEONAME", "Musquodoboit");
    s.execute(&c, BASE, 0).unwrap();
    let rows = drain(&mut s);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("OBJECTID"), Some("1"));
  }

  #[test]
  fn county_substring_pattern() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.add_criterion("GEONAME", "*").add_criterion("COUNTY", "*Hants*");
    s.execute(&c, BASE, 0).unwrap();
    let rows = drain(&mut s);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("GEONAME"), Some("Hantsport"));
  }

  #[test]
  fn executing_twice_without_close_fails() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.execute(&c, BASE, 0).unwrap();
    assert!(matches!(s.execute(&c, BASE, 0), Err(Error::SearchNotClosed)));
  }

  #[test]
  fn close_then_execute_behaves_like_new() {
    let c = conn();
    let mut reused = WildcardSearch::new();
    reused.add_criterion("COUNTY", "Halifax");
    reused.execute(&c, BASE, 1).unwrap();
    assert_eq!(reused.total_match_count(&c).unwrap(), 2);
    reused.close();
    assert_eq!(reused.row_count(), 0);
    assert!(reused.fetch_row().is_none());

    reused.clear_criteria();
    reused.add_criterion("GEONAME", "Truro");
    reused.execute(&c, BASE, 20).unwrap();

    let mut fresh = WildcardSearch::new();
    fresh.add_criterion("GEONAME", "Truro");
    fresh.execute(&c, BASE, 20).unwrap();

    assert_eq!(reused.row_count(), fresh.row_count());
    assert_eq!(
      reused.total_match_count(&c).unwrap(),
      fresh.total_match_count(&c).unwrap()
    );
    assert_eq!(drain(&mut reused), drain(&mut fresh));
  }

  #[test]
  fn full_page_triggers_unbounded_count() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.execute(&c, BASE, 2).unwrap();
    assert_eq!(s.row_count(), 2);
    assert_eq!(s.total_match_count(&c).unwrap(), 5);
  }

  #[test]
  fn short_page_reports_row_count() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.add_criterion("COUNTY", "Halifax");
    s.execute(&c, BASE, 20).unwrap();
    assert_eq!(s.row_count(), 2);
    // The table is gone, so any second query would fail.
    c.execute_batch("DROP TABLE ns_geonames").unwrap();
    assert_eq!(s.total_match_count(&c).unwrap(), 2);
  }

  #[test]
  fn count_is_cached_until_close() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.execute(&c, BASE, 1).unwrap();
    assert_eq!(s.total_match_count(&c).unwrap(), 5);
    c.execute_batch("DROP TABLE ns_geonames").unwrap();
    assert_eq!(s.total_match_count(&c).unwrap(), 5);
  }

  #[test]
  fn all_null_row_is_not_end_of_rows() {
    let c = conn();
    let mut s = WildcardSearch::new();
    s.execute(&c, "SELECT GEONAME, COUNTY FROM ns_geonames WHERE OBJECTID = 5", 0)
      .unwrap();
    let row = s.fetch_row().expect("a row of nulls");
    assert_eq!(row.len(), 2);
    assert!(row.iter().all(|(_, v)| v.is_none()));
    assert!(s.fetch_row().is_none());
  }

  #[test]
  fn bad_base_query_is_an_error_and_leaves_search_idle() {
    let c = conn();
    let mut s = WildcardSearch::new();
    assert!(s.execute(&c, "SELECT * FROM missing", 0).is_err());
    assert_eq!(s.row_count(), 0);
    s.execute(&c, BASE, 0).unwrap();
  }

  #[test]
  fn non_numeric_count_is_its_own_error() {
    assert_eq!(parse_count("17").unwrap(), 17);
    assert!(matches!(parse_count("many"), Err(Error::InvalidCount(c)) if c == "many"));
    assert!(matches!(parse_count("-1"), Err(Error::InvalidCount(_))));
  }
}
