//! Parameterized statement helpers.
//!
//! Every helper prepares its statement fresh, binds all values positionally
//! as text, runs it, and lets the statement drop, which finalizes it on every
//! exit path. Table and field names are application constants; only values
//! ever come from a request.

use gendat_core::record::Row;
use rusqlite::{Connection, params_from_iter};

use crate::{Error, Result, encode::decode_row};

// ─── Statements ──────────────────────────────────────────────────────────────

/// Run one `SELECT` and collect every row.
pub fn safe_select(conn: &Connection, query: &str, values: &[&str]) -> Result<Vec<Row>> {
  let mut stmt = conn.prepare(query)?;
  let names: Vec<String> =
    stmt.column_names().into_iter().map(str::to_string).collect();

  let mut rows = stmt.query(params_from_iter(values))?;
  let mut out = Vec::new();
  while let Some(row) = rows.next()? {
    out.push(decode_row(&names, row)?);
  }
  Ok(out)
}

/// Run one `INSERT`, `UPDATE` or `DELETE`; returns the affected row count.
/// A `None` value binds SQL `NULL`.
pub fn safe_execute(
  conn: &Connection,
  query: &str,
  values: &[Option<&str>],
) -> Result<usize> {
  let mut stmt = conn.prepare(query)?;
  Ok(stmt.execute(params_from_iter(values))?)
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// Does `table` hold a row whose `key_field` equals `key_value`?
pub fn row_exists(
  conn: &Connection,
  table: &str,
  key_field: &str,
  key_value: &str,
) -> Result<bool> {
  let query = format!(
    "SELECT EXISTS(SELECT 1 FROM {table} WHERE {key_field} = ?) AS result"
  );
  let rows = safe_select(conn, &query, &[key_value])?;
  Ok(rows.first().and_then(|r| r.get("result")) == Some("1"))
}

/// The smallest `key_field` value strictly greater than `key_value`.
///
/// Keys are compared the way the column stores them, so an integer key
/// column orders numerically even though the bound value is text.
pub fn next_key_after(
  conn: &Connection,
  table: &str,
  key_field: &str,
  key_value: &str,
) -> Result<Option<String>> {
  let query = format!(
    "SELECT {key_field} FROM {table} WHERE {key_field} > ? \
     ORDER BY {key_field} ASC LIMIT 1"
  );
  let rows = safe_select(conn, &query, &[key_value])?;
  Ok(rows.first().and_then(|r| r.get(key_field)).map(str::to_string))
}

/// `UPDATE table SET f1 = ?, f2 = ?, … WHERE key_field = ?`.
///
/// `fields` and `values` are positionally aligned and must be the same
/// length.
pub fn update_row(
  conn: &Connection,
  table: &str,
  fields: &[&str],
  values: &[Option<&str>],
  key_field: &str,
  key_value: &str,
) -> Result<usize> {
  check_aligned(fields, values)?;
  let assignments = fields
    .iter()
    .map(|f| format!("{f} = ?"))
    .collect::<Vec<_>>()
    .join(", ");
  let query = format!("UPDATE {table} SET {assignments} WHERE {key_field} = ?");

  let mut bound = values.to_vec();
  bound.push(Some(key_value));
  safe_execute(conn, &query, &bound)
}

/// `INSERT INTO table (f1, f2, …) VALUES (?, ?, …)`.
pub fn insert_row(
  conn: &Connection,
  table: &str,
  fields: &[&str],
  values: &[Option<&str>],
) -> Result<usize> {
  check_aligned(fields, values)?;
  let placeholders = vec!["?"; fields.len()].join(", ");
  let query = format!(
    "INSERT INTO {table} ({}) VALUES ({placeholders})",
    fields.join(", ")
  );
  safe_execute(conn, &query, values)
}

/// `SELECT f1, f2, … FROM table WHERE key_field = ?`. The key field need not
/// be the table's primary key.
pub fn select_rows(
  conn: &Connection,
  table: &str,
  fields: &[&str],
  key_field: &str,
  key_value: &str,
) -> Result<Vec<Row>> {
  let query = format!(
    "SELECT {} FROM {table} WHERE {key_field} = ?",
    fields.join(", ")
  );
  safe_select(conn, &query, &[key_value])
}

fn check_aligned(fields: &[&str], values: &[Option<&str>]) -> Result<()> {
  if fields.is_empty() || fields.len() != values.len() {
    return Err(Error::FieldCountMismatch {
      fields: fields.len(),
      values: values.len(),
    });
  }
  Ok(())
}
