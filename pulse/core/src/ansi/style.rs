//! Style State
//!
//! The style accumulator for SGR sequences. A `StyleState` carries the
//! attributes in effect at a point in the output stream; folding SGR
//! parameter codes into it one at a time produces the style for the text
//! that follows.

use serde::{Deserialize, Serialize};

use super::palette;

/// A 24-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from individual channels
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Active text attributes at a point in the stream
///
/// An empty state (no color, no flags) is the default rendering style.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleState {
    /// Foreground color, unset = default
    pub fg: Option<Rgb>,
    /// Background color, unset = default
    pub bg: Option<Rgb>,
    /// Bold weight
    pub bold: bool,
    /// Faint rendering
    pub dim: bool,
    /// Italic slant
    pub italic: bool,
    /// Underline decoration
    pub underline: bool,
}

impl StyleState {
    /// State with only a foreground color set
    #[must_use]
    pub fn colored(fg: Rgb) -> Self {
        Self {
            fg: Some(fg),
            ..Self::default()
        }
    }

    /// Whether every attribute is absent
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Fold one SGR parameter code into the state
    ///
    /// Code 0 clears everything. Codes outside the supported set are
    /// ignored without error.
    pub fn apply(&mut self, code: u16) {
        match code {
            0 => *self = Self::default(),
            1 => self.bold = true,
            2 => self.dim = true,
            3 => self.italic = true,
            4 => self.underline = true,
            22 => {
                self.bold = false;
                self.dim = false;
            }
            23 => self.italic = false,
            24 => self.underline = false,
            30..=37 | 90..=97 => self.fg = palette::foreground(code),
            40..=47 => self.bg = palette::background(code),
            39 => self.fg = None,
            49 => self.bg = None,
            _ => {}
        }
    }

    /// Fold a parameter list left to right
    pub fn apply_all(&mut self, codes: &[u16]) {
        for &code in codes {
            self.apply(code);
        }
    }
}
