//! Error types for `studylog-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid subject name: please enter a subject name")]
  EmptyName,

  #[error("invalid weekly goal {0}: weekly goal must be a positive number")]
  InvalidGoal(f64),

  #[error("invalid duration: duration must be a positive number of minutes")]
  InvalidDuration,

  #[error("session date lies in the future")]
  SessionInFuture,

  #[error("subject not found: {0}")]
  SubjectNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
