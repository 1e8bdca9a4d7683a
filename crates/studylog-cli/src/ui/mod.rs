//! TUI rendering.

pub mod session_list;
pub mod subject_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph, Tabs},
};

use crate::app::{App, Tab};

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0]);
  draw_tabs(f, rows[1], app);
  match app.tab {
    Tab::Subjects => subject_list::draw(f, rows[2], app),
    Tab::Sessions => session_list::draw(f, rows[2], app),
  }
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%a %d.%m.%Y").to_string();

  let left = Span::styled(
    " studylog",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);
  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let titles = vec![
    format!("Subjects ({})", app.progress.len()),
    format!("Sessions ({})", app.sessions.len()),
  ];
  let tabs = Tabs::new(titles)
    .select(app.tab.index())
    .style(Style::default().fg(Color::DarkGray))
    .highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )
    .block(Block::default());
  f.render_widget(tabs, area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let hints = "Tab switch  ↑↓/jk move  d delete  r refresh  q quit";
  let status = if app.status_msg.is_empty() {
    hints
  } else {
    app.status_msg.as_str()
  };

  let mode = match app.tab {
    Tab::Subjects => "SUBJECTS",
    Tab::Sessions => "SESSIONS",
  };
  let line = Line::from(vec![
    Span::styled(
      format!(" {mode} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

/// Placeholder text for an empty list.
fn draw_empty(f: &mut Frame, area: Rect, block: Block, lines: &[&str]) {
  let inner = block.inner(area);
  f.render_widget(block, area);
  let text: Vec<Line> = lines
    .iter()
    .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::DarkGray))))
    .collect();
  f.render_widget(Paragraph::new(text), inner);
}
