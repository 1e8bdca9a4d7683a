//! Handlers for weekly progress.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/progress` | Every subject, newest first |
//! | `GET`  | `/subjects/:id/progress` | One subject; 404 if not found |
//!
//! Both accept `?now=<RFC 3339>`. The week is computed in the UTC offset of
//! that timestamp, so a client passes its own local time to get its own
//! calendar week. Without it the server's local time is used.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{DateTime, FixedOffset, Local};
use serde::Deserialize;
use studylog_core::{
  progress::{SubjectProgress, weekly_progress},
  store::StudyStore,
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ProgressParams {
  /// Reference instant; its offset selects the local week.
  pub now: Option<DateTime<FixedOffset>>,
}

impl ProgressParams {
  fn now(&self) -> DateTime<FixedOffset> {
    self.now.unwrap_or_else(|| Local::now().fixed_offset())
  }
}

/// `GET /progress[?now=...]`
pub async fn all<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ProgressParams>,
) -> Result<Json<Vec<SubjectProgress>>, ApiError>
where
  S: StudyStore,
{
  let subjects = store.load_subjects().await.map_err(ApiError::store)?;
  let sessions = store.load_sessions().await.map_err(ApiError::store)?;
  Ok(Json(weekly_progress(&subjects, &sessions, &params.now())))
}

/// `GET /subjects/:id/progress[?now=...]`
pub async fn one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<ProgressParams>,
) -> Result<Json<SubjectProgress>, ApiError>
where
  S: StudyStore,
{
  let subject = store
    .get_subject(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("subject {id} not found")))?;
  let sessions = store.load_sessions().await.map_err(ApiError::store)?;
  Ok(Json(SubjectProgress::compute(&subject, &sessions, &params.now())))
}
