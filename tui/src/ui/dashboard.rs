//! Dashboard
//!
//! Fleet overview tiles plus live telemetry for the selected server.
//! The snapshot pane repaints as pushes arrive on the realtime channel.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use pulse_core::StatsOverview;

use crate::app::App;
use crate::theme;

/// Render the dashboard tab
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Percentage(34), Constraint::Min(0)]).split(area);

    super::servers::draw_list(frame, app, columns[0], "Servers · watch telemetry");

    let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(columns[1]);
    draw_overview(frame, app.overview.as_ref(), rows[0]);
    draw_snapshot(frame, app, rows[1]);
}

fn draw_overview(frame: &mut Frame, overview: Option<&StatsOverview>, area: Rect) {
    let block = Block::default()
        .title("Fleet")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(overview) = overview else {
        frame.render_widget(
            Paragraph::new(Line::styled("No overview yet", Style::default().fg(theme::MUTED))),
            inner,
        );
        return;
    };

    let tiles: [(&str, String, Color); 6] = [
        (
            "online",
            overview.online_servers.to_string(),
            theme::ONLINE_GREEN,
        ),
        ("offline", overview.offline_servers.to_string(), theme::MUTED),
        (
            "critical",
            overview.critical_events.to_string(),
            theme::ERROR_RED,
        ),
        (
            "containers",
            overview.running_containers.to_string(),
            theme::ACCENT,
        ),
        (
            "avg cpu",
            format!("{:.0}%", overview.avg_cpu_percent),
            theme::FOREGROUND,
        ),
        (
            "avg mem",
            format!("{:.0}%", overview.avg_memory_percent),
            theme::FOREGROUND,
        ),
    ];

    let cells = Layout::horizontal([Constraint::Ratio(1, 6); 6]).split(inner);
    for ((label, value, color), cell) in tiles.into_iter().zip(cells.iter()) {
        let tile = Text::from(vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(theme::MUTED))),
        ]);
        frame.render_widget(Paragraph::new(tile).centered(), *cell);
    }
}

fn draw_snapshot(frame: &mut Frame, app: &App, area: Rect) {
    let hostname = app
        .servers
        .get(app.selected)
        .map_or("server", |s| s.hostname.as_str());
    let block = Block::default()
        .title(format!("{hostname} · live"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(snapshot) = &app.snapshot else {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Waiting for telemetry…",
                Style::default().fg(theme::MUTED),
            )),
            inner,
        );
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    draw_gauge(frame, "cpu ", snapshot.cpu_percent, rows[0]);
    draw_gauge(frame, "mem ", snapshot.memory_percent, rows[1]);
    draw_gauge(frame, "disk", snapshot.disk_percent, rows[2]);

    let meta = Line::from(vec![
        Span::styled(
            format!("up {}", format_uptime(snapshot.uptime_seconds)),
            Style::default().fg(theme::FOREGROUND),
        ),
        Span::styled(
            format!(
                " · {} cores · {} containers",
                snapshot.cpu_cores, snapshot.container_count
            ),
            Style::default().fg(theme::MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(meta), rows[4]);
}

fn draw_gauge(frame: &mut Frame, label: &str, percent: f64, area: Rect) {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let color = if percent >= 90.0 {
        theme::ERROR_RED
    } else if percent >= 75.0 {
        theme::WARN_AMBER
    } else {
        theme::ONLINE_GREEN
    };

    let gauge = Gauge::default()
        .label(format!("{label} {percent:.1}%"))
        .ratio(ratio)
        .gauge_style(Style::default().fg(color).bg(theme::PANEL));
    frame.render_widget(gauge, area);
}

/// Compact uptime: seconds -> "3d 4h" / "4h 12m" / "12m"
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uptime_picks_the_two_largest_units() {
        assert_eq!(format_uptime(45), "0m");
        assert_eq!(format_uptime(45 * 60), "45m");
        assert_eq!(format_uptime(3 * 3600 + 20 * 60), "3h 20m");
        assert_eq!(format_uptime(2 * 86_400 + 5 * 3600), "2d 5h");
    }
}
