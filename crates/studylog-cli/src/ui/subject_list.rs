//! Subjects tab: one card per subject with this week's progress.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{app::App, cards};

const BAR_WIDTH: usize = 24;

fn bar_color(percentage: i64) -> Color {
  match percentage {
    100.. => Color::Green,
    50..=99 => Color::Yellow,
    _ => Color::Blue,
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" This week ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.progress.is_empty() {
    super::draw_empty(f, area, block, &[
      "No subjects yet.",
      "Add one with `studylog add-subject <name> <hours>`.",
    ]);
    return;
  }

  let items: Vec<ListItem> = app
    .progress
    .iter()
    .map(|p| {
      ListItem::new(vec![
        Line::from(Span::styled(
          p.subject.name.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
          Span::raw("  "),
          Span::styled(
            cards::progress_bar(p.percentage, BAR_WIDTH),
            Style::default().fg(bar_color(p.percentage)),
          ),
          Span::raw(format!(" {:>3}%", p.percentage)),
        ]),
        Line::from(Span::styled(
          format!(
            "  {}",
            cards::hours_line(p.hours_this_week, p.subject.weekly_goal)
          ),
          Style::default().fg(Color::Gray),
        )),
        Line::raw(""),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.subject_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
      .highlight_symbol("▌"),
    area,
    &mut state,
  );
}
