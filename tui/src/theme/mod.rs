//! Theme and Colors
//!
//! The ServerPulse dark palette. Chrome colors match the product's
//! slate/cyan look; terminal output colors come from the core palette
//! and are mapped here into ratatui colors.

use ratatui::style::Color;

use pulse_core::Rgb;

// ============================================================================
// Chrome
// ============================================================================

/// App background - near-black navy
pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0e, 0x1a);

/// Panel background - slate
pub const PANEL: Color = Color::Rgb(0x0f, 0x17, 0x2a);

/// Borders and separators
pub const BORDER: Color = Color::Rgb(0x1e, 0x29, 0x3b);

/// Primary text
pub const FOREGROUND: Color = Color::Rgb(0xe5, 0xe7, 0xeb);

/// Secondary / muted text
pub const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);

/// Accent - the prompt cyan
pub const ACCENT: Color = Color::Rgb(0x22, 0xd3, 0xee);

// ============================================================================
// Status
// ============================================================================

/// Online / healthy
pub const ONLINE_GREEN: Color = Color::Rgb(0x98, 0xc3, 0x79);

/// Errors and critical states
pub const ERROR_RED: Color = Color::Rgb(0xe0, 0x6c, 0x75);

/// Warnings and degraded states
pub const WARN_AMBER: Color = Color::Rgb(0xe5, 0xc0, 0x7b);

/// Map a core terminal color into a ratatui color
#[must_use]
pub fn terminal_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
