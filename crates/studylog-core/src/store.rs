//! The `StudyStore` trait, implemented by [`crate::memory::MemoryStore`] and
//! `studylog-store-sqlite`.

use std::future::Future;

use uuid::Uuid;

use crate::{
  session::{NewSession, StudySession},
  subject::{NewSubject, Subject},
};

/// Error type of a [`StudyStore`] backend.
///
/// Backends wrap [`crate::Error`] alongside their own failures; callers use
/// [`StoreError::as_core`] to tell a rejected input from a broken backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The validation or missing-subject failure behind this error, if any.
  fn as_core(&self) -> Option<&crate::Error>;
}

impl StoreError for crate::Error {
  fn as_core(&self) -> Option<&crate::Error> { Some(self) }
}

/// Abstraction over a studylog store backend.
///
/// Records are never updated in place: they are created, and later deleted.
/// `load_*` return records newest first by `created_at`, however they were
/// saved; `save_*` replace a whole collection.
pub trait StudyStore: Send + Sync {
  type Error: StoreError;

  // ── Whole collections ─────────────────────────────────────────────────

  /// Every subject, newest first.
  fn load_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Replace the stored subjects with `subjects`. Sessions are untouched.
  fn save_subjects(
    &self,
    subjects: Vec<Subject>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every session, newest first, including sessions whose subject is gone.
  fn load_sessions(
    &self,
  ) -> impl Future<Output = Result<Vec<StudySession>, Self::Error>> + Send + '_;

  /// Replace the stored sessions with `sessions`.
  fn save_sessions(
    &self,
    sessions: Vec<StudySession>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Retrieve a subject by id. Returns `None` if not found.
  fn get_subject(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// Validate `input` and persist it as a new subject.
  fn add_subject(
    &self,
    input: NewSubject,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  /// Delete a subject. Its sessions are kept. Returns `false` if there was no
  /// such subject.
  fn delete_subject(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Validate `input` and persist it as a new session. Fails with
  /// [`crate::Error::SubjectNotFound`] if the subject does not exist.
  fn add_session(
    &self,
    input: NewSession,
  ) -> impl Future<Output = Result<StudySession, Self::Error>> + Send + '_;

  /// Delete a session. Returns `false` if there was no such session.
  fn delete_session(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
