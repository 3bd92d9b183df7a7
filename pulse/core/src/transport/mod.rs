//! Streaming Transport Layer
//!
//! The client's two WebSocket channels:
//! - [`TerminalSocket`]: duplex shell I/O scoped to one terminal session
//! - [`TelemetrySubscription`]: supervised push channel for server
//!   snapshots
//!
//! Both channels follow the same shape: the connection is owned by
//! spawned reader/writer tasks, and the owning view consumes events
//! through an mpsc channel. They differ in lifecycle: a terminal socket
//! is single-shot (a closed session is finished), while the telemetry
//! channel reconnects and resubscribes with bounded backoff.

pub mod envelope;
pub mod realtime;
pub mod terminal;

use thiserror::Error;

pub use envelope::{RealtimeEnvelope, TerminalEnvelope};
pub use realtime::TelemetrySubscription;
pub use terminal::{SessionEvent, TerminalSocket};

/// Errors from the streaming channels
#[derive(Debug, Error)]
pub enum TransportError {
    /// Opening the connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// The connection is gone
    #[error("connection closed")]
    ConnectionClosed,
    /// An outbound message could not be delivered
    #[error("send failed: {0}")]
    SendFailed(String),
    /// Operation not valid in the current state
    #[error("invalid transport state: {0}")]
    InvalidState(String),
}
