//! Sessions tab, newest first.

use chrono::Local;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{app::App, cards};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Sessions ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.sessions.is_empty() {
    super::draw_empty(f, area, block, &[
      "No sessions yet.",
      "Start tracking your progress with `studylog add-session`.",
    ]);
    return;
  }

  let now = Local::now();
  let items: Vec<ListItem> = app
    .sessions
    .iter()
    .map(|s| {
      let name = cards::subject_name(&app.names, s.subject_id);
      let name_style = if name == cards::UNKNOWN_SUBJECT {
        Style::default()
          .fg(Color::DarkGray)
          .add_modifier(Modifier::ITALIC)
      } else {
        Style::default().add_modifier(Modifier::BOLD)
      };

      let mut lines = vec![
        Line::from(vec![
          Span::styled(name.to_string(), name_style),
          Span::styled(
            format!("  {}", cards::date_label(s.date, &now)),
            Style::default().fg(Color::Gray),
          ),
        ]),
        Line::from(Span::styled(
          format!("  {}", cards::duration_label(s.duration)),
          Style::default().fg(Color::Cyan),
        )),
      ];
      if !s.note.is_empty() {
        lines.push(Line::from(Span::styled(
          format!("  {}", s.note),
          Style::default().fg(Color::Gray),
        )));
      }
      lines.push(Line::raw(""));
      ListItem::new(lines)
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.session_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
      .highlight_symbol("▌"),
    area,
    &mut state,
  );
}
