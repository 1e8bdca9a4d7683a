//! `studylog`, the terminal client for the studylog server.
//!
//! # Usage
//!
//! ```
//! studylog                                   # interactive view
//! studylog subjects
//! studylog add-subject Mathematics 5
//! studylog add-session math 45 --note "integrals"
//! studylog --url http://localhost:5232 sessions
//! ```

mod app;
mod cards;
mod client;
mod pick;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use studylog_core::{session::NewSession, subject::NewSubject};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "studylog", about = "Track study time against weekly goals")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the studylog server (default: http://localhost:5232).
  #[arg(long, env = "STUDYLOG_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Interactive view (the default).
  Tui,
  /// Show this week's progress for every subject.
  Subjects,
  /// List logged study sessions, newest first.
  Sessions,
  /// Add a subject with a weekly goal in hours.
  AddSubject {
    name:        String,
    weekly_goal: f64,
  },
  /// Log a study session against a subject (name, partial name or id).
  AddSession {
    subject:  String,
    /// Minutes studied.
    duration: u32,
    #[arg(short, long, default_value = "")]
    note:     String,
  },
  /// Delete a subject. Its sessions are kept.
  RmSubject { id: Uuid },
  /// Delete a session.
  RmSession { id: Uuid },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

const DEFAULT_URL: &str = "http://localhost:5232";

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };
  let client = ApiClient::new(api_config)?;

  let command = args.command.unwrap_or(Command::Tui);
  if !matches!(command, Command::Tui) {
    // The TUI owns the terminal, so only one-shot commands log.
    tracing_subscriber::fmt()
      .with_writer(io::stderr)
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::WARN.into())
          .from_env_lossy(),
      )
      .init();
  }

  match command {
    Command::Tui => run_tui(client).await,
    Command::Subjects => print_subjects(&client).await,
    Command::Sessions => print_sessions(&client).await,
    Command::AddSubject { name, weekly_goal } => {
      let input = NewSubject::new(name, weekly_goal);
      input.validate()?;
      let subject = client.add_subject(&input).await?;
      println!("Added {} ({})", subject.name, subject.subject_id);
      Ok(())
    }
    Command::AddSession { subject, duration, note } => {
      let subjects = client.list_subjects().await?;
      let chosen = pick::pick_subject(&subjects, &subject)?;
      debug!(subject_id = %chosen.subject_id, query = %subject, "picked subject");

      let mut input = NewSession::new(chosen.subject_id, duration);
      input.note = note;
      input.validate(Utc::now())?;
      let session = client.add_session(&input).await?;
      println!(
        "Logged {} for {} ({})",
        cards::duration_label(session.duration),
        chosen.name,
        session.session_id,
      );
      Ok(())
    }
    Command::RmSubject { id } => {
      client.delete_subject(id).await?;
      println!("Deleted subject {id}");
      Ok(())
    }
    Command::RmSession { id } => {
      client.delete_session(id).await?;
      println!("Deleted session {id}");
      Ok(())
    }
  }
}

// ─── One-shot commands ────────────────────────────────────────────────────────

async fn print_subjects(client: &ApiClient) -> Result<()> {
  let progress = client.progress().await?;
  if progress.is_empty() {
    println!("No subjects yet. Add one with `studylog add-subject <name> <hours>`.");
    return Ok(());
  }
  for p in &progress {
    println!("{}\n", cards::subject_card(p));
  }
  Ok(())
}

async fn print_sessions(client: &ApiClient) -> Result<()> {
  let (subjects, sessions) =
    tokio::try_join!(client.list_subjects(), client.list_sessions())?;
  if sessions.is_empty() {
    println!("No sessions yet. Start tracking your progress.");
    return Ok(());
  }
  let names = cards::subject_names(&subjects);
  let now = Local::now();
  for session in &sessions {
    println!("{}\n", cards::session_card(session, &names, &now));
  }
  Ok(())
}

// ─── Interactive view ─────────────────────────────────────────────────────────

async fn run_tui(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = match app.reload().await {
    Ok(()) => run_event_loop(&mut terminal, &mut app).await,
    Err(e) => Err(e),
  };

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
