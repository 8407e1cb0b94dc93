//! Error types and axum `IntoResponse` implementation.
//!
//! Every failure ends the request with a short plain-text body; there is no
//! recovery and no partial page.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid ID")]
  InvalidId,
  /// The form did not carry the record key it was rendered with.
  #[error("Logic Error")]
  LogicError,
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  Core(#[from] gendat_core::Error),
  #[error("render error: {0}")]
  Render(String),
  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(err))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::InvalidId | Error::LogicError => StatusCode::BAD_REQUEST,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Core(gendat_core::Error::UnknownDomain(_)) => StatusCode::NOT_FOUND,
      Error::Core(_) => StatusCode::BAD_REQUEST,
      Error::Render(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(error = %self, %status, "request rejected");
    }
    (status, self.to_string()).into_response()
  }
}
