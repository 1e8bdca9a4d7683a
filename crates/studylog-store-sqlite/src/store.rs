//! [`StudyStore`] on SQLite.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use studylog_core::{
  session::{NewSession, StudySession},
  store::StudyStore,
  subject::{NewSubject, Subject},
};

use crate::{
  Result,
  encode::{
    RawSession, RawSubject, SESSION_COLUMNS, SUBJECT_COLUMNS, SessionParams,
    SubjectParams, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A studylog store backed by a single SQLite file.
///
/// Clones share one connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

fn insert_subject(conn: &rusqlite::Connection, p: &SubjectParams) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO subjects (subject_id, name, weekly_goal, created_at)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![p.subject_id, p.name, p.weekly_goal, p.created_at],
  )?;
  Ok(())
}

fn insert_session(conn: &rusqlite::Connection, p: &SessionParams) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO sessions (session_id, subject_id, duration, date, note, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    rusqlite::params![
      p.session_id,
      p.subject_id,
      p.duration,
      p.date,
      p.note,
      p.created_at,
    ],
  )?;
  Ok(())
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    debug!(path = %path.display(), "opened sqlite study store");
    Ok(store)
  }

  /// Open a throwaway in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_row(&self, sql: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id_str])?))
      .await?;
    Ok(changed > 0)
  }
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for SqliteStore {
  type Error = crate::Error;

  // ── Whole collections ─────────────────────────────────────────────────────

  async fn load_subjects(&self) -> Result<Vec<Subject>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBJECT_COLUMNS} FROM subjects
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSubject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubject::into_subject).collect()
  }

  async fn save_subjects(&self, subjects: Vec<Subject>) -> Result<()> {
    let params: Vec<SubjectParams> = subjects.iter().map(SubjectParams::from).collect();
    debug!(count = params.len(), "replacing subjects");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM subjects", [])?;
        for p in &params {
          insert_subject(&tx, p)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn load_sessions(&self) -> Result<Vec<StudySession>> {
    let raws: Vec<RawSession> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SESSION_COLUMNS} FROM sessions
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSession::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSession::into_session).collect()
  }

  async fn save_sessions(&self, sessions: Vec<StudySession>) -> Result<()> {
    let params: Vec<SessionParams> = sessions.iter().map(SessionParams::from).collect();
    debug!(count = params.len(), "replacing sessions");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM sessions", [])?;
        for p in &params {
          insert_session(&tx, p)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn get_subject(&self, id: Uuid) -> Result<Option<Subject>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE subject_id = ?1"),
              rusqlite::params![id_str],
              RawSubject::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn add_subject(&self, input: NewSubject) -> Result<Subject> {
    let subject = input.build(Utc::now())?;
    let params = SubjectParams::from(&subject);

    self
      .conn
      .call(move |conn| {
        insert_subject(conn, &params)?;
        Ok(())
      })
      .await?;

    debug!(subject_id = %subject.subject_id, "added subject");
    Ok(subject)
  }

  async fn delete_subject(&self, id: Uuid) -> Result<bool> {
    self
      .delete_row("DELETE FROM subjects WHERE subject_id = ?1", id)
      .await
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn add_session(&self, input: NewSession) -> Result<StudySession> {
    let subject_id = input.subject_id;
    let session = input.build(Utc::now())?;
    let params = SessionParams::from(&session);

    // Existence check and insert share one transaction on the database
    // thread, so a concurrent delete cannot interleave.
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists = tx
          .query_row(
            "SELECT 1 FROM subjects WHERE subject_id = ?1",
            rusqlite::params![params.subject_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(false);
        }
        insert_session(&tx, &params)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(studylog_core::Error::SubjectNotFound(subject_id).into());
    }

    debug!(session_id = %session.session_id, %subject_id, "added session");
    Ok(session)
  }

  async fn delete_session(&self, id: Uuid) -> Result<bool> {
    self
      .delete_row("DELETE FROM sessions WHERE session_id = ?1", id)
      .await
  }
}
