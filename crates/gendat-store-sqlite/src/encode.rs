//! Decoding SQLite values into the text-only [`Row`] representation.
//!
//! Every column is surfaced as text whatever its storage class: integers and
//! reals are formatted, blobs are read as lossy UTF-8, and `NULL` stays
//! `None`.

use gendat_core::record::Row;
use rusqlite::types::ValueRef;

pub fn decode_value(value: ValueRef<'_>) -> Option<String> {
  match value {
    ValueRef::Null => None,
    ValueRef::Integer(i) => Some(i.to_string()),
    ValueRef::Real(f) => Some(f.to_string()),
    ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
      Some(String::from_utf8_lossy(bytes).into_owned())
    }
  }
}

/// Read every column of `row`, naming them after `names` (the statement's
/// column names, in order).
pub fn decode_row(names: &[String], row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
  names
    .iter()
    .enumerate()
    .map(|(i, name)| Ok((name.clone(), decode_value(row.get_ref(i)?))))
    .collect()
}
