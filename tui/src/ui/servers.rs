//! Server List
//!
//! The connect screen: one row per registered server with its status,
//! environment and OS. Shared with the dashboard's left column.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use pulse_core::{Environment, Server};

use crate::app::App;
use crate::theme;

/// Full-width server list for the terminal tab
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    draw_list(frame, app, area, "Servers · connect to a shell");
}

/// Server list constrained to `area`, with a custom title
pub fn draw_list(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::BACKGROUND));

    if app.servers.is_empty() {
        let message = if app.loading {
            "Loading servers…"
        } else {
            "No servers registered"
        };
        let empty = Paragraph::new(Line::styled(message, Style::default().fg(theme::MUTED)))
            .block(block)
            .centered();
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.servers.iter().map(|s| server_row(s)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme::PANEL).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn server_row(server: &Server) -> ListItem<'_> {
    let (dot, dot_color) = if server.is_online() {
        ("● ", theme::ONLINE_GREEN)
    } else {
        ("○ ", theme::MUTED)
    };

    let mut spans = vec![
        Span::styled(dot, Style::default().fg(dot_color)),
        Span::styled(
            server.hostname.as_str(),
            Style::default().fg(theme::FOREGROUND),
        ),
        Span::styled(
            format!("  {}", environment_label(server.environment)),
            Style::default().fg(environment_color(server.environment)),
        ),
    ];
    if let Some(os) = &server.os {
        spans.push(Span::styled(
            format!("  {os}"),
            Style::default().fg(theme::MUTED),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn environment_label(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "prod",
        Environment::Staging => "staging",
        Environment::Development => "dev",
    }
}

fn environment_color(environment: Environment) -> ratatui::style::Color {
    match environment {
        Environment::Production => theme::ERROR_RED,
        Environment::Staging => theme::WARN_AMBER,
        Environment::Development => theme::ONLINE_GREEN,
    }
}
