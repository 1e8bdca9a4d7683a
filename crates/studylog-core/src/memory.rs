//! [`MemoryStore`], a process-local [`StudyStore`].
//!
//! Holds everything in memory for the lifetime of the process; nothing
//! survives a restart. Useful for tests and for running without a database.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
  Error, Result,
  session::{NewSession, StudySession},
  store::StudyStore,
  subject::{NewSubject, Subject},
};

/// Both collections are kept newest first by `created_at`, matching what
/// `load_*` promise.
#[derive(Debug, Default)]
pub struct MemoryStore {
  subjects: RwLock<Vec<Subject>>,
  sessions: RwLock<Vec<StudySession>>,
}

// Writers only ever swap or splice whole records; poisoning is ignored.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
  lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
  lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl StudyStore for MemoryStore {
  type Error = Error;

  // ── Whole collections ─────────────────────────────────────────────────────

  async fn load_subjects(&self) -> Result<Vec<Subject>> {
    let subjects = read(&self.subjects).clone();
    debug!(count = subjects.len(), "loaded subjects from memory");
    Ok(subjects)
  }

  async fn save_subjects(&self, mut subjects: Vec<Subject>) -> Result<()> {
    debug!(count = subjects.len(), "saving subjects to memory");
    subjects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    *write(&self.subjects) = subjects;
    Ok(())
  }

  async fn load_sessions(&self) -> Result<Vec<StudySession>> {
    let sessions = read(&self.sessions).clone();
    debug!(count = sessions.len(), "loaded sessions from memory");
    Ok(sessions)
  }

  async fn save_sessions(&self, mut sessions: Vec<StudySession>) -> Result<()> {
    debug!(count = sessions.len(), "saving sessions to memory");
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    *write(&self.sessions) = sessions;
    Ok(())
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn get_subject(&self, id: Uuid) -> Result<Option<Subject>> {
    Ok(read(&self.subjects).iter().find(|s| s.subject_id == id).cloned())
  }

  async fn add_subject(&self, input: NewSubject) -> Result<Subject> {
    let subject = input.build(Utc::now())?;
    write(&self.subjects).insert(0, subject.clone());
    debug!(subject_id = %subject.subject_id, "added subject");
    Ok(subject)
  }

  async fn delete_subject(&self, id: Uuid) -> Result<bool> {
    let mut subjects = write(&self.subjects);
    let before = subjects.len();
    subjects.retain(|s| s.subject_id != id);
    Ok(subjects.len() != before)
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn add_session(&self, input: NewSession) -> Result<StudySession> {
    let subject_id = input.subject_id;
    let session = input.build(Utc::now())?;

    // Subjects stay read-locked until the session is in.
    let subjects = read(&self.subjects);
    if !subjects.iter().any(|s| s.subject_id == subject_id) {
      return Err(Error::SubjectNotFound(subject_id));
    }
    write(&self.sessions).insert(0, session.clone());
    drop(subjects);

    debug!(session_id = %session.session_id, %subject_id, "added session");
    Ok(session)
  }

  async fn delete_session(&self, id: Uuid) -> Result<bool> {
    let mut sessions = write(&self.sessions);
    let before = sessions.len();
    sessions.retain(|s| s.session_id != id);
    Ok(sessions.len() != before)
  }
}
