//! Error types for `gendat-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A submitted form lacked one of the domain's fixed fields. This is a
  /// defect in the form, never a recoverable validation failure.
  #[error("Bug: field '{0}' was not set.")]
  MissingField(String),

  #[error("Invalid ID")]
  InvalidId(String),

  #[error("unknown record type: {0:?}")]
  UnknownDomain(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
