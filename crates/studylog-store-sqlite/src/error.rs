//! Error type for `studylog-store-sqlite`.

use studylog_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Validation failures and missing subjects.
  #[error(transparent)]
  Core(#[from] studylog_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl StoreError for Error {
  fn as_core(&self) -> Option<&studylog_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}
