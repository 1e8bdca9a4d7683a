//! Logged study sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A logged block of study time.
///
/// `subject_id` is checked when the session is recorded but is not enforced
/// afterwards: deleting the subject leaves the session dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
  pub session_id: Uuid,
  pub subject_id: Uuid,
  /// Minutes studied. Always positive.
  pub duration:   u32,
  /// When the studying happened, as opposed to when it was recorded.
  pub date:       DateTime<Utc>,
  #[serde(default)]
  pub note:       String,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::StudyStore::add_session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
  pub subject_id: Uuid,
  pub duration:   u32,
  #[serde(default)]
  pub note:       String,
  /// Defaults to the moment the session is recorded.
  pub date:       Option<DateTime<Utc>>,
}

impl NewSession {
  pub fn new(subject_id: Uuid, duration: u32) -> Self {
    Self { subject_id, duration, note: String::new(), date: None }
  }

  /// Check the add-session form rules against the wall-clock instant `now`.
  ///
  /// Sessions are logs of past study, so an explicit date may not lie after
  /// `now`.
  pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
    if self.duration == 0 {
      return Err(Error::InvalidDuration);
    }
    if self.date.is_some_and(|date| date > now) {
      return Err(Error::SessionInFuture);
    }
    Ok(())
  }

  /// Validate and turn the input into a stored [`StudySession`] recorded at
  /// `now`. Does not check that the subject exists; stores do that.
  pub fn build(self, now: DateTime<Utc>) -> Result<StudySession> {
    self.validate(now)?;
    Ok(StudySession {
      session_id: Uuid::new_v4(),
      subject_id: self.subject_id,
      duration:   self.duration,
      date:       self.date.unwrap_or(now),
      note:       self.note,
      created_at: now,
    })
  }
}
