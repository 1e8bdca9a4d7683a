//! JSON REST API for studylog.
//!
//! Exposes an axum [`Router`] backed by any [`studylog_core::store::StudyStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", studylog_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod progress;
pub mod sessions;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use studylog_core::store::StudyStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StudyStore + 'static,
{
  Router::new()
    // Subjects
    .route("/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    .route(
      "/subjects/{id}",
      get(subjects::get_one::<S>).delete(subjects::delete_one::<S>),
    )
    .route("/subjects/{id}/progress", get(progress::one::<S>))
    // Sessions
    .route("/sessions", get(sessions::list::<S>).post(sessions::create::<S>))
    .route("/sessions/{id}", delete(sessions::delete_one::<S>))
    // Weekly progress
    .route("/progress", get(progress::all::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
