//! Error type for `gendat-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] gendat_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("database error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  /// `execute` was called on a search whose previous results were never
  /// closed.
  #[error("search executed again before close()")]
  SearchNotClosed,

  #[error("{fields} fields but {values} values")]
  FieldCountMismatch { fields: usize, values: usize },

  /// A key column held something other than an integer.
  #[error("invalid key value: {0:?}")]
  InvalidKey(String),

  /// A row count query returned something other than a count.
  #[error("invalid row count: {0:?}")]
  InvalidCount(String),
}

impl Error {
  /// Recover an error raised inside a connection closure.
  ///
  /// Closures passed to [`tokio_rusqlite::Connection::call`] must return
  /// `tokio_rusqlite::Error`, so crate errors travel boxed in its `Other`
  /// variant and are unboxed here.
  pub(crate) fn from_call(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Other(inner) => match inner.downcast::<Error>() {
        Ok(err) => *err,
        Err(inner) => Error::Database(tokio_rusqlite::Error::Other(inner)),
      },
      other => Error::Database(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
