//! Handlers for `/sessions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/sessions` | Optional `?subject_id=<id>`; newest first |
//! | `POST`   | `/sessions` | Body: [`NewSession`]; 400 if the subject is unknown |
//! | `DELETE` | `/sessions/:id` | 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use studylog_core::{
  session::{NewSession, StudySession},
  store::StudyStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Restrict to sessions logged against this subject.
  pub subject_id: Option<Uuid>,
}

/// `GET /sessions[?subject_id=<id>]`
///
/// Sessions whose subject has since been deleted are included.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StudySession>>, ApiError>
where
  S: StudyStore,
{
  let mut sessions = store.load_sessions().await.map_err(ApiError::store)?;
  if let Some(subject_id) = params.subject_id {
    sessions.retain(|s| s.subject_id == subject_id);
  }
  Ok(Json(sessions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /sessions`: 201 with the stored [`StudySession`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSession>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
{
  body.validate(Utc::now())?;

  // The store checks the subject exists in the same step as the insert.
  let subject_id = body.subject_id;
  let session = store.add_session(body).await.map_err(ApiError::store)?;
  tracing::info!(
    session_id = %session.session_id,
    %subject_id,
    duration = session.duration,
    "session logged"
  );
  Ok((StatusCode::CREATED, Json(session)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /sessions/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore,
{
  if !store.delete_session(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("session {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
