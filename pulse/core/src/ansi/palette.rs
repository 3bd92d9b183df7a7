//! Indexed Color Palette
//!
//! Fixed 16-entry palette backing the SGR indexed-color codes. The values
//! come from the product's terminal theme. The background entries at
//! 40-47 reuse the normal-intensity foreground values, so backgrounds
//! render in the same hues as 30-37.

use super::style::Rgb;

const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
const RED: Rgb = Rgb::new(0xe0, 0x6c, 0x75);
const GREEN: Rgb = Rgb::new(0x98, 0xc3, 0x79);
const YELLOW: Rgb = Rgb::new(0xe5, 0xc0, 0x7b);
const BLUE: Rgb = Rgb::new(0x61, 0xaf, 0xef);
const MAGENTA: Rgb = Rgb::new(0xc6, 0x78, 0xdd);
const CYAN: Rgb = Rgb::new(0x56, 0xb6, 0xc2);
const WHITE: Rgb = Rgb::new(0xab, 0xb2, 0xbf);
const BRIGHT_BLACK: Rgb = Rgb::new(0x5c, 0x63, 0x70);
const BRIGHT_WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Foreground color for SGR codes 30-37 and 90-97
///
/// The bright range reuses the normal hues except for black and white,
/// matching the source theme.
#[must_use]
pub fn foreground(code: u16) -> Option<Rgb> {
    match code {
        30 => Some(BLACK),
        31 | 91 => Some(RED),
        32 | 92 => Some(GREEN),
        33 | 93 => Some(YELLOW),
        34 | 94 => Some(BLUE),
        35 | 95 => Some(MAGENTA),
        36 | 96 => Some(CYAN),
        37 => Some(WHITE),
        90 => Some(BRIGHT_BLACK),
        97 => Some(BRIGHT_WHITE),
        _ => None,
    }
}

/// Background color for SGR codes 40-47
#[must_use]
pub fn background(code: u16) -> Option<Rgb> {
    match code {
        40..=47 => foreground(code - 10),
        _ => None,
    }
}
