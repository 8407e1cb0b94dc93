//! [`FieldSet`]: the values of one overlay record, in field-list order.

use std::collections::HashMap;

use crate::{
  Error, Result,
  domain::{FieldSpec, PersonRole, RecordDomain},
  record::Row,
};

/// An explicit ordered mapping from a domain's field names to nullable text.
///
/// The domain's fixed field list is the single source of truth for form
/// rendering, submission validation, and statement binding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
  domain: RecordDomain,
  values: Vec<Option<String>>,
}

impl FieldSet {
  /// All fields null; the state of a record that has no overlay row yet.
  pub fn empty(domain: RecordDomain) -> Self {
    Self { domain, values: vec![None; domain.fields().len()] }
  }

  /// Read a submitted form.
  ///
  /// Every field of the domain must be present. Values are trimmed and blank
  /// values become `None`, so an empty string is never stored.
  pub fn from_form(
    domain: RecordDomain,
    form: &HashMap<String, String>,
  ) -> Result<Self> {
    let values = domain
      .fields()
      .iter()
      .map(|f| {
        form
          .get(f.name)
          .map(|v| normalize(v))
          .ok_or_else(|| Error::MissingField(f.name.to_string()))
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { domain, values })
  }

  /// Load from an overlay-table row. Columns missing from the row are null.
  pub fn from_row(domain: RecordDomain, row: &Row) -> Self {
    let values = domain
      .fields()
      .iter()
      .map(|f| row.get(f.name).map(str::to_string))
      .collect();
    Self { domain, values }
  }

  pub fn domain(&self) -> RecordDomain { self.domain }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .domain
      .fields()
      .iter()
      .position(|f| f.name == name)
      .and_then(|i| self.values[i].as_deref())
  }

  /// The genealogy id stored for `role`, if any.
  pub fn person_id(&self, role: PersonRole) -> Option<&str> {
    self.get(role.id_field())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, Option<&str>)> {
    self
      .domain
      .fields()
      .iter()
      .zip(self.values.iter().map(Option::as_deref))
  }

  pub fn names(&self) -> Vec<&'static str> { self.domain.field_names() }

  /// Values in field-list order, ready to bind positionally.
  pub fn values(&self) -> Vec<Option<&str>> {
    self.values.iter().map(Option::as_deref).collect()
  }
}

fn normalize(raw: &str) -> Option<String> {
  let v = raw.trim();
  if v.is_empty() { None } else { Some(v.to_string()) }
}
