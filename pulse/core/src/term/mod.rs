//! Terminal View State
//!
//! The data side of the interactive terminal: the append-only output
//! log, the submitted-command history and the controller gluing them to
//! a transport session.

pub mod controller;
pub mod history;
pub mod line;

pub use controller::{SessionTarget, TerminalController};
pub use history::{BrowseResult, CommandHistory};
pub use line::{Line, LineKind, OutputLog};
