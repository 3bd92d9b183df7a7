//! ServerPulse TUI - terminal client for ServerPulse
//!
//! Full-screen terminal UI over [`pulse_core`]: a server list that opens
//! remote shell sessions, and a dashboard fed by the realtime telemetry
//! channel.
//!
//! # Architecture
//!
//! - **App**: event loop and state; converts key events to core calls
//! - **Ui**: stateless draw functions over App state
//! - **Theme**: the product's dark palette

pub mod app;
pub mod theme;
pub mod ui;

pub use app::App;
