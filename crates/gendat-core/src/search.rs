//! Wildcard search criteria.
//!
//! Users type `*` as a wildcard (SQL's `%` is accepted too). A pattern with a
//! wildcard is matched with `LIKE`; a pattern without one is matched by exact
//! equality. Criteria are AND-joined in the order they were added.

use std::fmt;

/// Comparison used for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Like,
  Eq,
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Operator::Like => "LIKE",
      Operator::Eq => "=",
    })
  }
}

/// One `field <op> ?` predicate and the text value bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
  pub field:    String,
  pub operator: Operator,
  pub value:    String,
}

/// Translate a user pattern: any `*` or `%` selects `LIKE`, and every `*`
/// becomes `%`. Otherwise the pattern is returned unchanged for `=`.
pub fn translate_pattern(pattern: &str) -> (Operator, String) {
  if pattern.contains(['*', '%']) {
    (Operator::Like, pattern.replace('*', "%"))
  } else {
    (Operator::Eq, pattern.to_string())
  }
}

/// An ordered, AND-conjoined set of search criteria.
///
/// Field names are SQL identifiers supplied by the application, never by
/// the user; only patterns are user input and they are always bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
  items: Vec<Criterion>,
}

impl Criteria {
  pub fn new() -> Self { Self::default() }

  /// Add `field` matched against `pattern`. An empty pattern adds nothing.
  pub fn add(&mut self, field: impl Into<String>, pattern: &str) -> &mut Self {
    if pattern.is_empty() {
      return self;
    }
    let (operator, value) = translate_pattern(pattern);
    self.items.push(Criterion { field: field.into(), operator, value });
    self
  }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn iter(&self) -> std::slice::Iter<'_, Criterion> { self.items.iter() }

  /// `" WHERE a LIKE ? AND b = ?"`, or the empty string with no criteria.
  pub fn where_clause(&self) -> String {
    let mut clause = String::new();
    for (i, c) in self.items.iter().enumerate() {
      clause.push_str(if i == 0 { " WHERE " } else { " AND " });
      clause.push_str(&format!("{} {} ?", c.field, c.operator));
    }
    clause
  }

  /// Bound values, positionally aligned with [`Criteria::where_clause`].
  pub fn values(&self) -> Vec<&str> {
    self.items.iter().map(|c| c.value.as_str()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn star_becomes_percent_with_like() {
    let (op, v) = translate_pattern("u*musq*");
    assert_eq!(op, Operator::Like);
    assert_eq!(v, "u%musq%");
  }

  #[test]
  fn percent_alone_selects_like_unchanged() {
    assert_eq!(translate_pattern("Hal%"), (Operator::Like, "Hal%".into()));
  }

  #[test]
  fn plain_pattern_is_exact_match() {
    assert_eq!(translate_pattern("Halifax"), (Operator::Eq, "Halifax".into()));
  }

  #[test]
  fn empty_pattern_adds_nothing() {
    let mut c = Criteria::new();
    c.add("LastName", "");
    assert!(c.is_empty());
    assert_eq!(c.where_clause(), "");
  }

  #[test]
  fn criteria_are_and_joined_in_call_order() {
    let mut c = Criteria::new();
    c.add("LastName", "Smi*").add("County", "").add("FirstName", "Mary");
    assert_eq!(c.where_clause(), " WHERE LastName LIKE ? AND FirstName = ?");
    assert_eq!(c.values(), vec!["Smi%", "Mary"]);
  }

  #[test]
  fn single_criterion_opens_where() {
    let mut c = Criteria::new();
    c.add("GEONAME", "Truro");
    assert_eq!(c.where_clause(), " WHERE GEONAME = ?");
    assert_eq!(c.len(), 1);
  }

  mod properties {
    use proptest::prelude::*;

    use crate::search::*;

    proptest! {
      #![proptest_config(ProptestConfig::with_cases(200))]

      #[test]
      fn starred_pattern_is_like_with_percent(
        head in "[^*]{0,8}",
        tail in "[a-zA-Z*% ']{0,12}",
      ) {
        let pattern = format!("{head}*{tail}");
        let (op, value) = translate_pattern(&pattern);
        prop_assert_eq!(op, Operator::Like);
        prop_assert_eq!(value, pattern.replace('*', "%"));
      }

      #[test]
      fn plain_pattern_is_exact(pattern in "[^*%]{0,20}") {
        let (op, value) = translate_pattern(&pattern);
        prop_assert_eq!(op, Operator::Eq);
        prop_assert_eq!(value, pattern);
      }

      #[test]
      fn empty_patterns_never_constrain(
        fields in proptest::collection::vec("[A-Za-z]{1,10}", 0..6),
      ) {
        let mut c = Criteria::new();
        for field in &fields {
          c.add(field.as_str(), "");
        }
        prop_assert!(c.is_empty());
        prop_assert_eq!(c.where_clause(), "");
        prop_assert!(c.values().is_empty());
      }

      #[test]
      fn one_placeholder_per_criterion(
        patterns in proptest::collection::vec("[a-z*]{0,6}", 0..8),
      ) {
        let mut c = Criteria::new();
        for (i, p) in patterns.iter().enumerate() {
          c.add(format!("f{i}"), p);
        }
        let kept = patterns.iter().filter(|p| !p.is_empty()).count();
        prop_assert_eq!(c.len(), kept);
        prop_assert_eq!(c.values().len(), kept);
        prop_assert_eq!(c.where_clause().matches('?').count(), kept);
      }
    }
  }
}
