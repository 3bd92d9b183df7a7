//! Pulse Core - Headless ServerPulse Client
//!
//! This crate is the UI-independent core of the ServerPulse client. It
//! owns the protocol side of the product - the ANSI terminal stream
//! processor, the two streaming channels and the REST surface - and can
//! drive a TUI, a native GUI, or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surface (tui)                       │
//! │        key events ↓                   ↑ lines / snapshots     │
//! └────────────────────┼──────────────────┼───────────────────────┘
//!                      │                  │
//! ┌────────────────────┼──────────────────┼───────────────────────┐
//! │                 PULSE CORE            │                       │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │ TerminalController                                     │   │
//! │  │  ┌───────────┐ ┌────────────┐ ┌──────────────────────┐ │   │
//! │  │  │ OutputLog │ │  History   │ │ StyleState + decode  │ │   │
//! │  │  └───────────┘ └────────────┘ └──────────────────────┘ │   │
//! │  └───────────▲───────────────────────────────────────────┘   │
//! │              │ SessionEvent                                   │
//! │  ┌───────────┴────────┐  ┌──────────────────────┐            │
//! │  │   TerminalSocket   │  │ TelemetrySubscription │            │
//! │  └───────────▲────────┘  └──────────▲───────────┘            │
//! │              │ ws (terminal)        │ ws (realtime)          │
//! │  ┌───────────┴──────────────────────┴───────────┐            │
//! │  │              ApiClient (REST)                 │            │
//! │  └──────────────────────────────────────────────┘            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`TerminalController`]: one terminal view's log, history and session
//! - [`ansi::decode`]: raw output chunk -> styled segments
//! - [`TerminalSocket`]: duplex shell connection for one session id
//! - [`TelemetrySubscription`]: supervised snapshot push channel
//! - [`ApiClient`]: REST endpoints, including terminal session creation
//!
//! # Module Overview
//!
//! - [`ansi`]: escape-sequence decoding and style state
//! - [`term`]: output log, command history, terminal controller
//! - [`transport`]: WebSocket channels and wire envelopes
//! - [`api`]: REST client
//! - [`model`]: wire data model
//! - [`config`]: environment-driven configuration
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any
//! other UI framework. It's pure client logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ansi;
pub mod api;
pub mod config;
pub mod model;
pub mod term;
pub mod transport;

pub use ansi::{decode, Rgb, Segment, StyleState};
pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, RealtimeConfig};
pub use model::{
    Container, Environment, MetricInterval, Server, ServerMetric, ServerSnapshot, ServerStatus,
    StatsOverview, TerminalSessionInfo,
};
pub use term::{Line, LineKind, OutputLog, SessionTarget, TerminalController};
pub use transport::{SessionEvent, TelemetrySubscription, TerminalSocket, TransportError};
