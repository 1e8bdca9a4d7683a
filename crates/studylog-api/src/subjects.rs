//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | Newest first |
//! | `POST`   | `/subjects` | Body: `{"name":"...","weekly_goal":5}` |
//! | `GET`    | `/subjects/:id` | 404 if not found |
//! | `DELETE` | `/subjects/:id` | 204; the subject's sessions are kept |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use studylog_core::{
  store::StudyStore,
  subject::{NewSubject, Subject},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: StudyStore,
{
  let subjects = store.load_subjects().await.map_err(ApiError::store)?;
  Ok(Json(subjects))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /subjects`: 201 with the stored [`Subject`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSubject>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
{
  body.validate()?;
  let subject = store.add_subject(body).await.map_err(ApiError::store)?;
  tracing::info!(subject_id = %subject.subject_id, name = %subject.name, "subject created");
  Ok((StatusCode::CREATED, Json(subject)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subjects/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Subject>, ApiError>
where
  S: StudyStore,
{
  let subject = store
    .get_subject(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("subject {id} not found")))?;
  Ok(Json(subject))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subjects/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore,
{
  if !store.delete_subject(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("subject {id} not found")));
  }
  tracing::info!(subject_id = %id, "subject deleted");
  Ok(StatusCode::NO_CONTENT)
}
