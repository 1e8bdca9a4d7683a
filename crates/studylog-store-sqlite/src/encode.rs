//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed nanosecond width and
//! a `Z` suffix, so lexical order matches chronological order. UUIDs are stored
//! as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use studylog_core::{session::StudySession, subject::Subject};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawSubject::from_row`].
pub const SUBJECT_COLUMNS: &str = "subject_id, name, weekly_goal, created_at";

/// Raw values read directly from a `subjects` row.
pub struct RawSubject {
  pub subject_id:  String,
  pub name:        String,
  pub weekly_goal: f64,
  pub created_at:  String,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:  row.get(0)?,
      name:        row.get(1)?,
      weekly_goal: row.get(2)?,
      created_at:  row.get(3)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      subject_id:  decode_uuid(&self.subject_id)?,
      name:        self.name,
      weekly_goal: self.weekly_goal,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawSession::from_row`].
pub const SESSION_COLUMNS: &str =
  "session_id, subject_id, duration, date, note, created_at";

/// Raw values read directly from a `sessions` row.
pub struct RawSession {
  pub session_id: String,
  pub subject_id: String,
  pub duration:   u32,
  pub date:       String,
  pub note:       String,
  pub created_at: String,
}

impl RawSession {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      session_id: row.get(0)?,
      subject_id: row.get(1)?,
      duration:   row.get(2)?,
      date:       row.get(3)?,
      note:       row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_session(self) -> Result<StudySession> {
    Ok(StudySession {
      session_id: decode_uuid(&self.session_id)?,
      subject_id: decode_uuid(&self.subject_id)?,
      duration:   self.duration,
      date:       decode_dt(&self.date)?,
      note:       self.note,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Owned column values for inserting a [`Subject`] on the database thread.
pub struct SubjectParams {
  pub subject_id:  String,
  pub name:        String,
  pub weekly_goal: f64,
  pub created_at:  String,
}

impl From<&Subject> for SubjectParams {
  fn from(s: &Subject) -> Self {
    Self {
      subject_id:  encode_uuid(s.subject_id),
      name:        s.name.clone(),
      weekly_goal: s.weekly_goal,
      created_at:  encode_dt(s.created_at),
    }
  }
}

/// Owned column values for inserting a [`StudySession`] on the database
/// thread.
pub struct SessionParams {
  pub session_id: String,
  pub subject_id: String,
  pub duration:   u32,
  pub date:       String,
  pub note:       String,
  pub created_at: String,
}

impl From<&StudySession> for SessionParams {
  fn from(s: &StudySession) -> Self {
    Self {
      session_id: encode_uuid(s.session_id),
      subject_id: encode_uuid(s.subject_id),
      duration:   s.duration,
      date:       encode_dt(s.date),
      note:       s.note.clone(),
      created_at: encode_dt(s.created_at),
    }
  }
}
