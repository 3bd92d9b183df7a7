//! ANSI Escape-Sequence Processing
//!
//! Converts raw terminal output arriving over the wire into styled text
//! segments. The decoder is a pure function over (chunk, style state);
//! the style state is the only context carried between chunks.
//!
//! - [`decode`]: chunk -> segments + ending style
//! - [`StyleState`]: the SGR attribute accumulator
//! - [`palette`]: the fixed 16-entry indexed color table

pub mod decode;
pub mod palette;
pub mod style;

pub use decode::{decode, Segment};
pub use style::{Rgb, StyleState};
