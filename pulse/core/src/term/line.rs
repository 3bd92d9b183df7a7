//! Output Log
//!
//! Append-only sequence of rendered terminal lines. Lines are immutable
//! once created; the only destructive operation is an explicit clear,
//! which reseeds the log with a single system line.

use std::collections::VecDeque;

use crate::ansi::{Rgb, Segment, StyleState};

/// Muted gray used for system notices
pub const SYSTEM_GRAY: Rgb = Rgb::new(0x9c, 0xa3, 0xaf);

/// Default bound on retained lines
pub const DEFAULT_MAX_LINES: usize = 2000;

/// Role of a line, controlling its default presentation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Client-generated notice (connection state, clears)
    System,
    /// Echo of a submitted command
    Input,
    /// Output received from the remote shell
    Output,
}

/// One logical row of terminal output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Unique, monotonically increasing id for list rendering
    pub id: u64,
    /// Role of the line
    pub kind: LineKind,
    /// Styled text runs composing the line
    pub segments: Vec<Segment>,
}

/// Append-only log of terminal lines with a drop-oldest bound
///
/// Capacity is bounded so long sessions cannot grow without limit; the
/// source product kept an unbounded list.
#[derive(Debug)]
pub struct OutputLog {
    lines: VecDeque<Line>,
    next_id: u64,
    max_lines: usize,
    scroll_pending: bool,
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputLog {
    /// Create an empty log with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_lines(DEFAULT_MAX_LINES)
    }

    /// Create an empty log retaining at most `max_lines` lines
    #[must_use]
    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            next_id: 0,
            max_lines: max_lines.max(1),
            scroll_pending: false,
        }
    }

    /// Append a line built from `segments`
    ///
    /// Segments whose trimmed text is empty are dropped first; if that
    /// empties the batch no line is appended at all. Returns whether a
    /// line was appended. A successful append raises the scroll signal.
    pub fn append(&mut self, segments: Vec<Segment>, kind: LineKind) -> bool {
        let segments: Vec<Segment> = segments
            .into_iter()
            .filter(|s| !s.text.trim().is_empty())
            .collect();
        if segments.is_empty() {
            return false;
        }

        self.push_line(segments, kind);
        true
    }

    /// Append a single-segment system notice in the given color
    pub fn push_system(&mut self, text: &str, color: Rgb) {
        self.push_line(
            vec![Segment::new(text, StyleState::colored(color))],
            LineKind::System,
        );
    }

    /// Discard everything and reseed with one system line
    pub fn clear(&mut self) {
        self.lines.clear();
        self.push_system("Terminal cleared", SYSTEM_GRAY);
    }

    /// Take the pending scroll-to-end signal, resetting it
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    /// Retained lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Number of retained lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the log holds no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push_line(&mut self, segments: Vec<Segment>, kind: LineKind) {
        let line = Line {
            id: self.next_id,
            kind,
            segments,
        };
        self.next_id += 1;

        if self.lines.len() == self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        self.scroll_pending = true;
    }
}
