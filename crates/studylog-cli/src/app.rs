//! Application state and key handling for the interactive view.

use std::{collections::HashMap, sync::Arc};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use studylog_core::{progress::SubjectProgress, session::StudySession};
use uuid::Uuid;

use crate::{cards, client::ApiClient};

// ─── Tab ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
  Subjects,
  Sessions,
}

impl Tab {
  pub fn index(self) -> usize {
    match self {
      Tab::Subjects => 0,
      Tab::Sessions => 1,
    }
  }

  fn toggle(self) -> Self {
    match self {
      Tab::Subjects => Tab::Sessions,
      Tab::Sessions => Tab::Subjects,
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App {
  pub tab: Tab,

  /// This week's figures, one per subject, as last fetched.
  pub progress: Vec<SubjectProgress>,

  /// All sessions, newest first.
  pub sessions: Vec<StudySession>,

  /// Subject names for labelling sessions.
  pub names: HashMap<Uuid, String>,

  pub subject_cursor: usize,
  pub session_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      tab: Tab::Subjects,
      progress: Vec::new(),
      sessions: Vec::new(),
      names: HashMap::new(),
      subject_cursor: 0,
      session_cursor: 0,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Refetch progress and sessions. Progress is recomputed by the server on
  /// every fetch, so this is also how the view picks up a new week.
  pub async fn reload(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    let fetched = tokio::try_join!(self.client.progress(), self.client.list_sessions());
    match fetched {
      Ok((progress, sessions)) => {
        self.names = cards::subject_names(progress.iter().map(|p| &p.subject));
        self.progress = progress;
        self.sessions = sessions;
        self.clamp_cursors();
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  fn clamp_cursors(&mut self) {
    self.subject_cursor = self.subject_cursor.min(self.progress.len().saturating_sub(1));
    self.session_cursor = self.session_cursor.min(self.sessions.len().saturating_sub(1));
  }

  fn len(&self) -> usize {
    match self.tab {
      Tab::Subjects => self.progress.len(),
      Tab::Sessions => self.sessions.len(),
    }
  }

  fn cursor_mut(&mut self) -> &mut usize {
    match self.tab {
      Tab::Subjects => &mut self.subject_cursor,
      Tab::Sessions => &mut self.session_cursor,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.kind != KeyEventKind::Press {
      return Ok(true);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return Ok(false),

      KeyCode::Tab | KeyCode::BackTab => self.tab = self.tab.toggle(),
      KeyCode::Char('1') => self.tab = Tab::Subjects,
      KeyCode::Char('2') => self.tab = Tab::Sessions,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.len();
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
          *cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
      }

      KeyCode::Char('d') | KeyCode::Delete => self.delete_selected().await,

      // A failed refresh leaves the old data on screen with the error shown.
      KeyCode::Char('r') => {
        let _ = self.reload().await;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn delete_selected(&mut self) {
    let outcome = match self.tab {
      Tab::Subjects => {
        let Some(p) = self.progress.get(self.subject_cursor) else {
          return;
        };
        let (id, name) = (p.subject.subject_id, p.subject.name.clone());
        self
          .client
          .delete_subject(id)
          .await
          .map(|()| format!("Deleted {name}"))
      }
      Tab::Sessions => {
        let Some(s) = self.sessions.get(self.session_cursor) else {
          return;
        };
        let label = format!(
          "{} session of {}",
          cards::duration_label(s.duration),
          cards::subject_name(&self.names, s.subject_id),
        );
        self
          .client
          .delete_session(s.session_id)
          .await
          .map(|()| format!("Deleted {label}"))
      }
    };

    match outcome {
      Ok(msg) => {
        if self.reload().await.is_ok() {
          self.status_msg = msg;
        }
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }
}
