//! Plain-text rendering of subject and session cards.
//!
//! Shared by the one-shot subcommands and the TUI so both show the same
//! figures and wording.

use std::{collections::HashMap, fmt::Display};

use chrono::{DateTime, TimeZone, Utc};
use studylog_core::{progress::SubjectProgress, session::StudySession, subject::Subject};
use uuid::Uuid;

/// Label for sessions whose subject has been deleted.
pub const UNKNOWN_SUBJECT: &str = "Unknown subject";

/// `"2.5h / 5h this week"`.
pub fn hours_line(hours_this_week: f64, weekly_goal: f64) -> String {
  format!("{hours_this_week:.1}h / {weekly_goal}h this week")
}

/// A fixed-width bar with `percentage` of its cells filled.
pub fn progress_bar(percentage: i64, width: usize) -> String {
  let filled = width * percentage.clamp(0, 100) as usize / 100;
  format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `"Today"` when `date` falls on the same calendar day as `now` in `now`'s
/// zone, otherwise `dd.mm.yyyy`.
pub fn date_label<Tz>(date: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let local = date.with_timezone(&now.timezone());
  if local.date_naive() == now.date_naive() {
    "Today".to_string()
  } else {
    local.format("%d.%m.%Y").to_string()
  }
}

/// `"60 min"`.
pub fn duration_label(minutes: u32) -> String { format!("{minutes} min") }

/// Subject names keyed by id, for labelling sessions.
pub fn subject_names<'a>(
  subjects: impl IntoIterator<Item = &'a Subject>,
) -> HashMap<Uuid, String> {
  subjects
    .into_iter()
    .map(|s| (s.subject_id, s.name.clone()))
    .collect()
}

pub fn subject_name(names: &HashMap<Uuid, String>, id: Uuid) -> &str {
  names.get(&id).map(String::as_str).unwrap_or(UNKNOWN_SUBJECT)
}

const BAR_WIDTH: usize = 30;

/// A multi-line card for one subject's weekly progress.
pub fn subject_card(p: &SubjectProgress) -> String {
  format!(
    "{}  ({})\n  {}  {:>3}%\n  {}",
    p.subject.name,
    p.subject.subject_id,
    hours_line(p.hours_this_week, p.subject.weekly_goal),
    p.percentage,
    progress_bar(p.percentage, BAR_WIDTH),
  )
}

/// A multi-line card for one session.
pub fn session_card<Tz>(
  session: &StudySession,
  names: &HashMap<Uuid, String>,
  now: &DateTime<Tz>,
) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let mut card = format!(
    "{}  ({})\n  {}  {}",
    subject_name(names, session.subject_id),
    session.session_id,
    date_label(session.date, now),
    duration_label(session.duration),
  );
  if !session.note.is_empty() {
    card.push_str("\n  ");
    card.push_str(&session.note);
  }
  card
}
