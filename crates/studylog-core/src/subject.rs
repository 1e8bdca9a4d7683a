//! A subject is a topic of study with a weekly time goal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A user-defined topic of study. Never mutated once created; deleting a
/// subject leaves its sessions in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id:  Uuid,
  pub name:        String,
  /// Target study time per week, in hours. Always finite and positive.
  pub weekly_goal: f64,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::StudyStore::add_subject`].
/// The identifier and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubject {
  pub name:        String,
  pub weekly_goal: f64,
}

impl NewSubject {
  pub fn new(name: impl Into<String>, weekly_goal: f64) -> Self {
    Self { name: name.into(), weekly_goal }
  }

  /// Check the add-subject form rules: a non-blank name and a positive goal.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyName);
    }
    if !self.weekly_goal.is_finite() || self.weekly_goal <= 0.0 {
      return Err(Error::InvalidGoal(self.weekly_goal));
    }
    Ok(())
  }

  /// Validate and turn the input into a stored [`Subject`] created at `now`.
  pub fn build(self, now: DateTime<Utc>) -> Result<Subject> {
    self.validate()?;
    Ok(Subject {
      subject_id:  Uuid::new_v4(),
      name:        self.name.trim().to_owned(),
      weekly_goal: self.weekly_goal,
      created_at:  now,
    })
  }
}
