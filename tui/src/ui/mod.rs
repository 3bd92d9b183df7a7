//! Rendering
//!
//! Stateless draw functions over the [`App`] state. The terminal view
//! takes over the whole screen while a session is open, mirroring the
//! product's full-screen terminal modal; otherwise the screen is a tab
//! bar, the active screen and a status line.

pub mod dashboard;
pub mod servers;
pub mod terminal;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{App, Tab};
use crate::theme;

/// Render one frame
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        area,
    );

    if app.terminal_open {
        terminal::draw(frame, app, area);
        return;
    }

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    draw_tabs(frame, app, rows[0]);
    match app.tab {
        Tab::Terminal => servers::draw(frame, app, rows[1]),
        Tab::Dashboard => dashboard::draw(frame, app, rows[1]),
    }
    draw_status(frame, app, rows[2]);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let index = match app.tab {
        Tab::Terminal => 0,
        Tab::Dashboard => 1,
    };
    let tabs = Tabs::new(vec![" Terminal ", " Dashboard "])
        .select(index)
        .style(Style::default().fg(theme::MUTED).bg(theme::PANEL))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.status, app.loading) {
        (Some(message), _) => message.clone(),
        (None, true) => "Loading servers…".to_string(),
        (None, false) => match app.tab {
            Tab::Terminal => "Enter connect · ↑↓ select · Tab dashboard · r refresh · q quit".to_string(),
            Tab::Dashboard => "↑↓ watch server · Tab terminal · r refresh · q quit".to_string(),
        },
    };

    let style = if app.status.is_some() {
        Style::default().fg(theme::WARN_AMBER)
    } else {
        Style::default().fg(theme::MUTED)
    };
    frame.render_widget(Paragraph::new(Line::raw(text)).style(style), area);
}
