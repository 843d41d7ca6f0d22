//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The nudge quota for the current period is exhausted.
  #[error("nudge quota exhausted for the current period")]
  QuotaExceeded,

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<plaza_core::Error> for ApiError {
  fn from(e: plaza_core::Error) -> Self {
    match e {
      plaza_core::Error::EmptyAdminList => Self::BadRequest(e.to_string()),
      plaza_core::Error::QuotaExceeded => Self::QuotaExceeded,
      plaza_core::Error::Serialization(_) => Self::Internal(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::QuotaExceeded => {
        (StatusCode::TOO_MANY_REQUESTS, self.to_string())
      }
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
