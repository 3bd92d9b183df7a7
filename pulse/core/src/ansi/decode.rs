//! Escape-Sequence Decoder
//!
//! Pure streaming decode: one raw output chunk in, a list of styled
//! segments plus the ending style state out. The caller threads the
//! returned [`StyleState`] into the next call so styling survives chunk
//! boundaries.
//!
//! Sequences with no visual text effect (bracketed-paste toggles, window
//! titles, clear-to-end-of-line, single-character cursor movement) are
//! stripped outright. SGR sequences are consumed into the style state.
//! Anything else, including a partial SGR sequence cut at a chunk
//! boundary, passes through as plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::style::StyleState;

/// Control sequences removed before styling: bracketed paste mode,
/// window-title sets, clear-to-end-of-line and cursor movement with an
/// optional repeat count.
static STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[\?2004[hl]|\x1b\]0;[^\x07]*\x07|\x1b\[\d*[ABCDEFGJKST]")
        .expect("strip pattern is valid")
});

/// SGR sequences: `ESC [ <params> m` with semicolon-separated integers.
static SGR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("sgr pattern is valid"));

/// A contiguous run of text rendered with a single style
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The visible text
    pub text: String,
    /// Style in effect when the text was emitted
    pub style: StyleState,
}

impl Segment {
    /// Create a segment
    #[must_use]
    pub fn new(text: impl Into<String>, style: StyleState) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Unstyled segment
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleState::default())
    }
}

/// Decode one raw chunk into styled segments
///
/// `style` is the state in effect at the start of the chunk; the returned
/// state is the one in effect at its end. Line endings are normalized to
/// `\n` and recognized non-SGR control sequences are stripped before the
/// SGR scan. A chunk without any SGR sequence comes back as one segment
/// with the style unchanged.
#[must_use]
pub fn decode(chunk: &str, style: StyleState) -> (Vec<Segment>, StyleState) {
    let normalized = chunk.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned = STRIP_RE.replace_all(&normalized, "");

    let mut style = style;
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut saw_sgr = false;

    for m in SGR_RE.find_iter(&cleaned) {
        saw_sgr = true;
        if m.start() > cursor {
            segments.push(Segment::new(&cleaned[cursor..m.start()], style.clone()));
        }
        style.apply_all(&parse_params(m.as_str()));
        cursor = m.end();
    }

    if !saw_sgr {
        return (vec![Segment::new(cleaned.into_owned(), style.clone())], style);
    }

    if cursor < cleaned.len() {
        segments.push(Segment::new(&cleaned[cursor..], style.clone()));
    }

    (segments, style)
}

/// Extract the parameter codes from a matched `ESC [ ... m` sequence.
/// An empty list and empty list entries both read as 0.
fn parse_params(sequence: &str) -> Vec<u16> {
    let params = &sequence[2..sequence.len() - 1];
    params
        .split(';')
        .map(|p| p.parse().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::palette;
    use pretty_assertions::assert_eq;

    fn texts(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn error_prefix_splits_into_styled_and_default_segments() {
        let (segments, _) = decode("\x1b[1;31mERROR\x1b[0m: disk full", StyleState::default());

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "ERROR");
        assert!(segments[0].style.bold);
        assert_eq!(segments[0].style.fg, palette::foreground(31));
        assert_eq!(segments[1].text, ": disk full");
        assert!(segments[1].style.is_default());
    }

    #[test]
    fn window_title_sequence_is_fully_stripped() {
        let (segments, _) = decode("\x1b]0;my-title\x07hello", StyleState::default());
        assert_eq!(segments, vec![Segment::plain("hello")]);
    }

    #[test]
    fn segment_texts_cover_the_cleaned_chunk_exactly() {
        let chunk = "a\r\nb\rc\x1b[K\x1b[2Jd\x1b[32mgreen\x1b[0m tail\x1b[?2004h";
        let (segments, _) = decode(chunk, StyleState::default());

        assert_eq!(texts(&segments), "a\nb\ncdgreen tail");
    }

    #[test]
    fn chunk_without_sgr_is_one_unchanged_segment() {
        let style = StyleState::colored(palette::foreground(34).unwrap());
        let (segments, out) = decode("plain text", style.clone());

        assert_eq!(segments, vec![Segment::new("plain text", style.clone())]);
        assert_eq!(out, style);
    }

    #[test]
    fn style_threads_across_chunks() {
        let (_, carried) = decode("\x1b[1;36m", StyleState::default());
        let (segments, _) = decode("still cyan", carried);

        assert_eq!(segments.len(), 1);
        assert!(segments[0].style.bold);
        assert_eq!(segments[0].style.fg, palette::foreground(36));
    }

    #[test]
    fn pure_control_chunk_yields_no_text() {
        let (segments, _) = decode("\x1b[?2004l\x1b[K\x1b[3A\x1b[31m\x1b[0m", StyleState::default());
        assert_eq!(texts(&segments), "");
    }

    #[test]
    fn empty_params_read_as_reset() {
        let (segments, out) = decode("\x1b[31mred\x1b[mplain", StyleState::default());

        assert_eq!(segments[0].style.fg, palette::foreground(31));
        assert!(segments[1].style.is_default());
        assert!(out.is_default());
    }

    #[test]
    fn cursor_movement_with_repeat_prefix_is_stripped() {
        let (segments, _) = decode("\x1b[10Bafter", StyleState::default());
        assert_eq!(segments, vec![Segment::plain("after")]);
    }

    #[test]
    fn partial_sequence_passes_through_as_text() {
        let (segments, out) = decode("cut \x1b[3", StyleState::default());
        assert_eq!(texts(&segments), "cut \x1b[3");
        assert!(out.is_default());
    }

    #[test]
    fn carriage_returns_normalize_before_stripping() {
        let (segments, _) = decode("one\r\ntwo\rthree", StyleState::default());
        assert_eq!(texts(&segments), "one\ntwo\nthree");
    }
}
