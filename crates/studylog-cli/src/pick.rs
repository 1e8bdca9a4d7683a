//! Choosing a subject from what the user typed on the command line.

use anyhow::{Result, anyhow, bail};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use studylog_core::subject::Subject;
use uuid::Uuid;

/// Resolve `query` to one subject: by id, then by exact (case-insensitive)
/// name, then by the single best fuzzy match. Ties are reported as ambiguous.
pub fn pick_subject<'a>(subjects: &'a [Subject], query: &str) -> Result<&'a Subject> {
  let query = query.trim();
  if query.is_empty() {
    bail!("please select a subject");
  }

  if let Ok(id) = Uuid::parse_str(query) {
    return subjects
      .iter()
      .find(|s| s.subject_id == id)
      .ok_or_else(|| anyhow!("no subject with id {id}"));
  }

  if let Some(exact) = subjects.iter().find(|s| s.name.eq_ignore_ascii_case(query)) {
    return Ok(exact);
  }

  let matcher = SkimMatcherV2::default();
  let mut scored: Vec<(i64, &Subject)> = subjects
    .iter()
    .filter_map(|s| matcher.fuzzy_match(&s.name, query).map(|score| (score, s)))
    .collect();
  scored.sort_by(|a, b| b.0.cmp(&a.0));

  match scored.as_slice() {
    [] => bail!("no subject matches {query:?}"),
    [(_, only)] => Ok(*only),
    [(best, subject), (next, _), ..] if best > next => Ok(*subject),
    _ => {
      let names: Vec<&str> = scored.iter().map(|(_, s)| s.name.as_str()).collect();
      bail!("{query:?} matches several subjects: {}", names.join(", "))
    }
  }
}
