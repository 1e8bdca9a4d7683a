//! Handler errors and how they map onto HTTP statuses.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use studylog_core::store::StoreError;
use thiserror::Error;

/// Rendered as `{"error": "<message>"}` with the matching status.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("storage failure: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Rejected input is a 400 whichever layer caught it; anything else the
  /// store reports is a 500.
  pub(crate) fn store<E: StoreError>(e: E) -> Self {
    match e.as_core() {
      Some(core) => ApiError::BadRequest(core.to_string()),
      None => ApiError::Store(Box::new(e)),
    }
  }
}

/// Input that fails the form rules is the client's fault.
impl From<studylog_core::Error> for ApiError {
  fn from(e: studylog_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
