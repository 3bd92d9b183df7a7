//! Terminal View
//!
//! Full-screen shell view: header with the session target, the decoded
//! output log, and the entry line. Output styling comes straight from
//! the core segments; the only presentation decision made here is the
//! per-kind default color for unstyled text.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use pulse_core::term::{Line, LineKind};
use pulse_core::StyleState;

use crate::app::App;
use crate::theme;

/// Render the terminal view over the whole `area`
pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(area);

    draw_header(frame, app, rows[0]);
    draw_output(frame, app, rows[1]);
    draw_entry(frame, app, rows[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let (hostname, os) = match app.controller.target() {
        Some(target) => (
            target.hostname.clone(),
            target.os.clone().unwrap_or_else(|| "--".to_string()),
        ),
        None => ("terminal".to_string(), "--".to_string()),
    };

    let state = if app.controller.is_connected() {
        Span::styled("Connected", Style::default().fg(theme::ONLINE_GREEN))
    } else {
        Span::styled("Disconnected", Style::default().fg(theme::WARN_AMBER))
    };

    let header = Text::from(vec![
        TextLine::from(vec![
            Span::styled(
                hostname,
                Style::default()
                    .fg(theme::FOREGROUND)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   Enter send · ↑↓ history · Ctrl+L clear · Esc close",
                Style::default().fg(theme::MUTED),
            ),
        ]),
        TextLine::from(vec![state, Span::styled(format!(" • {os}"), Style::default().fg(theme::MUTED))]),
    ]);

    frame.render_widget(
        Paragraph::new(header).style(Style::default().bg(theme::PANEL)),
        area,
    );
}

fn draw_output(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::NONE)
        .style(Style::default().bg(theme::BACKGROUND));
    let inner = block.inner(area);

    let mut lines: Vec<TextLine> = Vec::new();
    for line in app.controller.lines() {
        lines.extend(visual_lines(line));
    }

    let total = lines.len() as u16;
    let max_from_bottom = total.saturating_sub(inner.height);
    if app.scroll_from_bottom > max_from_bottom {
        app.scroll_from_bottom = max_from_bottom;
    }
    let scroll = max_from_bottom - app.scroll_from_bottom;

    let output = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(output, area);
}

fn draw_entry(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::PANEL));

    let entry = TextLine::from(vec![
        Span::styled(
            "$ ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.controller.entry(), Style::default().fg(theme::FOREGROUND)),
        Span::styled("▌", Style::default().fg(theme::ACCENT)),
    ]);

    frame.render_widget(Paragraph::new(entry).block(block), area);
}

/// Expand one log line into renderable rows, splitting embedded
/// newlines; spans never carry a `\n`.
fn visual_lines(line: &Line) -> Vec<TextLine<'_>> {
    let mut out = Vec::new();
    let mut current: Vec<Span> = Vec::new();

    for segment in &line.segments {
        let style = segment_style(line.kind, &segment.style);
        for (i, part) in segment.text.split('\n').enumerate() {
            if i > 0 {
                out.push(TextLine::from(std::mem::take(&mut current)));
            }
            if !part.is_empty() {
                current.push(Span::styled(part, style));
            }
        }
    }

    out.push(TextLine::from(current));
    out
}

/// Map a core style to a ratatui style, falling back to the kind's
/// default foreground when the segment carries none.
fn segment_style(kind: LineKind, style: &StyleState) -> Style {
    let default_fg = match kind {
        LineKind::System => theme::MUTED,
        LineKind::Input | LineKind::Output => theme::FOREGROUND,
    };

    let mut out = Style::default().fg(
        style
            .fg
            .map_or(default_fg, theme::terminal_color),
    );
    if let Some(bg) = style.bg {
        out = out.bg(theme::terminal_color(bg));
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.dim {
        out = out.add_modifier(Modifier::DIM);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::Segment;

    fn output_line(segments: Vec<Segment>) -> Line {
        Line {
            id: 0,
            kind: LineKind::Output,
            segments,
        }
    }

    #[test]
    fn embedded_newlines_become_separate_rows() {
        let line = output_line(vec![Segment::plain("one\ntwo\nthree")]);
        let rows = visual_lines(&line);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].spans[0].content, "one");
        assert_eq!(rows[2].spans[0].content, "three");
    }

    #[test]
    fn a_line_without_newlines_is_one_row() {
        let line = output_line(vec![Segment::plain("ls"), Segment::plain(" -la")]);
        let rows = visual_lines(&line);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spans.len(), 2);
    }

    #[test]
    fn unstyled_system_text_falls_back_to_muted() {
        let style = segment_style(LineKind::System, &StyleState::default());
        assert_eq!(style.fg, Some(theme::MUTED));
    }
}
