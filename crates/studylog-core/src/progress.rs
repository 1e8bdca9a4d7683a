//! Weekly progress: how much of each subject's weekly goal has been studied.
//!
//! A week runs from Sunday at local midnight, inclusive, with no upper bound:
//! every session dated on or after the most recent week start counts towards
//! the current week. "Local" is the time zone of the reference instant, so
//! callers pick the user's zone by choosing what `now` they pass in.
//!
//! Everything here is a pure function of its inputs. Callers take a snapshot
//! of the sessions before calling in.

use chrono::{
  DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone,
  Utc,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{session::StudySession, subject::Subject};

// ─── Week boundaries ─────────────────────────────────────────────────────────

/// Longest stretch of non-existent local time we step over when midnight
/// falls into a DST gap.
const MAX_GAP_STEPS: u32 = 24 * 4;
const GAP_STEP_MINUTES: i64 = 15;

/// The start of the week containing `now`: the most recent Sunday at local
/// midnight in `now`'s time zone. A `now` of exactly Sunday 00:00:00 is its own
/// week start.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
  let today = now.date_naive();
  let back = i64::from(today.weekday().num_days_from_sunday());
  let sunday = today - Duration::days(back);
  local_midnight(&now.timezone(), sunday)
}

/// Resolve `date` 00:00 in `tz`. An ambiguous midnight resolves to the earlier
/// instant; a skipped one to the first valid instant after it.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
  let midnight = date.and_time(NaiveTime::MIN);
  let mut candidate = midnight;
  for _ in 0..MAX_GAP_STEPS {
    match tz.from_local_datetime(&candidate) {
      LocalResult::Single(dt) => return dt,
      LocalResult::Ambiguous(earliest, _) => return earliest,
      LocalResult::None => candidate += Duration::minutes(GAP_STEP_MINUTES),
    }
  }
  tz.from_utc_datetime(&midnight)
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Total minutes studied for `subject_id` in the week containing `now`.
///
/// Sessions for other subjects, and sessions dated before the week start, are
/// ignored. Future-dated sessions are counted.
pub fn weekly_minutes<Tz: TimeZone>(
  sessions: &[StudySession],
  subject_id: Uuid,
  now: &DateTime<Tz>,
) -> u64 {
  let start = week_start(now).with_timezone(&Utc);
  sessions
    .iter()
    .filter(|s| s.subject_id == subject_id && s.date >= start)
    .map(|s| u64::from(s.duration))
    .sum()
}

/// [`weekly_minutes`] expressed in (fractional) hours.
pub fn weekly_hours<Tz: TimeZone>(
  sessions: &[StudySession],
  subject_id: Uuid,
  now: &DateTime<Tz>,
) -> f64 {
  weekly_minutes(sessions, subject_id, now) as f64 / 60.0
}

/// Share of `weekly_goal` covered by `hours_this_week`, as a whole percentage
/// rounded half-up and capped at 100.
///
/// A goal that is zero, negative or not finite has no meaningful percentage and
/// reports `0`.
pub fn completion_percentage(hours_this_week: f64, weekly_goal: f64) -> i64 {
  if !weekly_goal.is_finite() || weekly_goal <= 0.0 {
    return 0;
  }
  let raw = (hours_this_week / weekly_goal * 100.0 + 0.5).floor();
  (raw as i64).min(100)
}

// ─── Per-subject view ────────────────────────────────────────────────────────

/// The computed weekly figures for one subject. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
  pub subject:           Subject,
  /// Inclusive lower bound of the week these figures cover.
  pub week_start:        DateTime<Utc>,
  pub minutes_this_week: u64,
  pub hours_this_week:   f64,
  pub percentage:        i64,
}

impl SubjectProgress {
  pub fn compute<Tz: TimeZone>(
    subject: &Subject,
    sessions: &[StudySession],
    now: &DateTime<Tz>,
  ) -> Self {
    let minutes = weekly_minutes(sessions, subject.subject_id, now);
    let hours = minutes as f64 / 60.0;
    Self {
      subject:           subject.clone(),
      week_start:        week_start(now).with_timezone(&Utc),
      minutes_this_week: minutes,
      hours_this_week:   hours,
      percentage:        completion_percentage(hours, subject.weekly_goal),
    }
  }
}

/// Progress for every subject, in the order given.
///
/// Sessions whose subject is not in `subjects` (orphans left behind by a
/// deletion) contribute to nothing.
pub fn weekly_progress<Tz: TimeZone>(
  subjects: &[Subject],
  sessions: &[StudySession],
  now: &DateTime<Tz>,
) -> Vec<SubjectProgress> {
  subjects
    .iter()
    .map(|subject| SubjectProgress::compute(subject, sessions, now))
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::FixedOffset;

  use super::*;

  fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
  }

  fn session(subject_id: Uuid, duration: u32, date: DateTime<Utc>) -> StudySession {
    StudySession {
      session_id: Uuid::new_v4(),
      subject_id,
      duration,
      date,
      note: String::new(),
      created_at: date,
    }
  }

  fn subject(name: &str, weekly_goal: f64) -> Subject {
    Subject {
      subject_id: Uuid::new_v4(),
      name: name.into(),
      weekly_goal,
      created_at: utc(2024, 6, 1, 9, 0),
    }
  }

  // 2024-06-09 is a Sunday; 2024-06-12 the following Wednesday.

  #[test]
  fn week_start_is_previous_sunday_midnight() {
    let now = utc(2024, 6, 12, 15, 30);
    assert_eq!(week_start(&now), utc(2024, 6, 9, 0, 0));
  }

  #[test]
  fn week_start_on_saturday_night_stays_in_week() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 23, 59, 59).unwrap();
    assert_eq!(week_start(&now), utc(2024, 6, 9, 0, 0));
  }

  #[test]
  fn sunday_midnight_is_its_own_week_start() {
    let now = utc(2024, 6, 9, 0, 0);
    assert_eq!(week_start(&now), now);
  }

  #[test]
  fn week_start_uses_the_zone_of_now() {
    // Sunday 05:00 in UTC+9 is still Saturday in UTC.
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tokyo.with_ymd_and_hms(2024, 6, 9, 5, 0, 0).unwrap();
    let start = week_start(&now);
    assert_eq!(start, tokyo.with_ymd_and_hms(2024, 6, 9, 0, 0, 0).unwrap());
    assert_eq!(start.with_timezone(&Utc), utc(2024, 6, 8, 15, 0));
  }

  #[test]
  fn skipped_midnight_starts_week_at_first_valid_instant() {
    use chrono_tz::America::Sao_Paulo;

    // Clocks jumped from 00:00 to 01:00 on Sunday 2018-11-04.
    let now = Sao_Paulo.with_ymd_and_hms(2018, 11, 7, 12, 0, 0).unwrap();
    let start = week_start(&now);
    assert_eq!(start, Sao_Paulo.with_ymd_and_hms(2018, 11, 4, 1, 0, 0).unwrap());
    assert_eq!(start.with_timezone(&Utc), utc(2018, 11, 4, 3, 0));

    let math = Uuid::new_v4();
    let sessions = vec![
      session(math, 40, utc(2018, 11, 4, 3, 0)),  // 01:00 Sunday, local
      session(math, 20, utc(2018, 11, 4, 2, 30)), // 23:30 Saturday, local
    ];
    assert_eq!(weekly_minutes(&sessions, math, &now), 40);
  }

  #[test]
  fn repeated_midnight_starts_week_at_earlier_instant() {
    use chrono_tz::America::Havana;

    // Clocks fell back from 01:00 to 00:00 on Sunday 2019-11-03, so midnight
    // happened at 04:00 UTC and again at 05:00 UTC.
    let now = Havana.with_ymd_and_hms(2019, 11, 6, 12, 0, 0).unwrap();
    let start = week_start(&now);
    assert_eq!(start.with_timezone(&Utc), utc(2019, 11, 3, 4, 0));

    let math = Uuid::new_v4();
    let sessions = vec![
      session(math, 15, utc(2019, 11, 3, 4, 30)), // first 00:30
      session(math, 25, utc(2019, 11, 3, 3, 59)), // Saturday 23:59
    ];
    assert_eq!(weekly_minutes(&sessions, math, &now), 15);
  }

  #[test]
  fn sessions_before_week_start_are_excluded() {
    let math = Uuid::new_v4();
    let now = utc(2024, 6, 12, 12, 0);
    let sessions = vec![
      session(math, 60, utc(2024, 6, 10, 18, 0)), // this Monday
      session(math, 30, utc(2024, 6, 8, 18, 0)),  // last Saturday
    ];
    assert_eq!(weekly_minutes(&sessions, math, &now), 60);
  }

  #[test]
  fn other_subjects_are_excluded() {
    let math = Uuid::new_v4();
    let physics = Uuid::new_v4();
    let now = utc(2024, 6, 12, 12, 0);
    let sessions = vec![
      session(math, 45, utc(2024, 6, 11, 8, 0)),
      session(physics, 90, utc(2024, 6, 11, 9, 0)),
      session(math, 15, utc(2024, 6, 12, 7, 0)),
    ];
    assert_eq!(weekly_minutes(&sessions, math, &now), 60);
    assert_eq!(weekly_minutes(&sessions, physics, &now), 90);
  }

  #[test]
  fn session_at_week_start_is_included() {
    let math = Uuid::new_v4();
    let now = utc(2024, 6, 9, 0, 0);
    let sessions = vec![
      session(math, 20, now),
      session(math, 40, now - Duration::seconds(1)),
    ];
    assert_eq!(weekly_minutes(&sessions, math, &now), 20);
  }

  #[test]
  fn future_dated_sessions_count() {
    let math = Uuid::new_v4();
    let now = utc(2024, 6, 12, 12, 0);
    let sessions = vec![session(math, 30, utc(2024, 6, 20, 12, 0))];
    assert_eq!(weekly_minutes(&sessions, math, &now), 30);
  }

  #[test]
  fn local_week_boundary_decides_inclusion() {
    let math = Uuid::new_v4();
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tokyo.with_ymd_and_hms(2024, 6, 9, 5, 0, 0).unwrap();
    let sessions = vec![
      session(math, 25, utc(2024, 6, 8, 16, 0)), // Sunday 01:00 in Tokyo
      session(math, 50, utc(2024, 6, 8, 14, 0)), // Saturday 23:00 in Tokyo
    ];
    assert_eq!(weekly_minutes(&sessions, math, &now), 25);
  }

  #[test]
  fn no_sessions_means_zero() {
    let history = Uuid::new_v4();
    let now = utc(2024, 6, 12, 12, 0);
    assert_eq!(weekly_minutes(&[], history, &now), 0);
    assert_eq!(weekly_hours(&[], history, &now), 0.0);
    assert_eq!(completion_percentage(0.0, 3.0), 0);
  }

  #[test]
  fn hours_are_minutes_over_sixty() {
    let math = Uuid::new_v4();
    let now = utc(2024, 6, 12, 12, 0);
    let sessions = vec![
      session(math, 100, utc(2024, 6, 10, 8, 0)),
      session(math, 50, utc(2024, 6, 11, 8, 0)),
    ];
    let minutes = weekly_minutes(&sessions, math, &now);
    assert_eq!(weekly_hours(&sessions, math, &now), minutes as f64 / 60.0);
    assert_eq!(weekly_hours(&sessions, math, &now), 2.5);
    // Same inputs, same answer.
    assert_eq!(
      weekly_hours(&sessions, math, &now),
      weekly_hours(&sessions, math, &now)
    );
  }

  #[test]
  fn percentage_of_half_goal() {
    assert_eq!(completion_percentage(150.0 / 60.0, 5.0), 50);
  }

  #[test]
  fn percentage_is_capped_at_one_hundred() {
    assert_eq!(completion_percentage(400.0 / 60.0, 2.0), 100);
    assert_eq!(completion_percentage(2.0, 2.0), 100);
  }

  #[test]
  fn percentage_rounds_half_up() {
    // 1h of 8h is exactly 12.5%.
    assert_eq!(completion_percentage(1.0, 8.0), 13);
    // 1h of 3h is 33.33…%.
    assert_eq!(completion_percentage(1.0, 3.0), 33);
    // 2h of 3h is 66.66…%.
    assert_eq!(completion_percentage(2.0, 3.0), 67);
  }

  #[test]
  fn percentage_is_monotonic_in_hours() {
    let goal = 7.0;
    let mut last = completion_percentage(0.0, goal);
    for minutes in (0..=900).step_by(5) {
      let p = completion_percentage(f64::from(minutes) / 60.0, goal);
      assert!(p >= last, "{minutes} min dropped from {last} to {p}");
      assert!((0..=100).contains(&p));
      last = p;
    }
    assert_eq!(last, 100);
  }

  #[test]
  fn invalid_goal_reports_zero() {
    assert_eq!(completion_percentage(3.0, 0.0), 0);
    assert_eq!(completion_percentage(3.0, -2.0), 0);
    assert_eq!(completion_percentage(3.0, f64::NAN), 0);
  }

  #[test]
  fn weekly_progress_skips_orphaned_sessions() {
    let math = subject("Mathematics", 5.0);
    let history = subject("History", 2.0);
    let deleted = Uuid::new_v4();
    let now = utc(2024, 6, 12, 12, 0);
    let sessions = vec![
      session(math.subject_id, 150, utc(2024, 6, 10, 8, 0)),
      session(deleted, 600, utc(2024, 6, 10, 9, 0)),
    ];

    let progress = weekly_progress(&[math.clone(), history.clone()], &sessions, &now);
    assert_eq!(progress.len(), 2);

    assert_eq!(progress[0].subject, math);
    assert_eq!(progress[0].minutes_this_week, 150);
    assert_eq!(progress[0].hours_this_week, 2.5);
    assert_eq!(progress[0].percentage, 50);
    assert_eq!(progress[0].week_start, utc(2024, 6, 9, 0, 0));

    assert_eq!(progress[1].subject, history);
    assert_eq!(progress[1].minutes_this_week, 0);
    assert_eq!(progress[1].percentage, 0);

    let total: u64 = progress.iter().map(|p| p.minutes_this_week).sum();
    assert_eq!(total, 150);
  }
}
