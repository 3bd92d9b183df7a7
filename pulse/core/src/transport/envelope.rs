//! Wire Envelopes
//!
//! Typed JSON messages exchanged over the streaming channels. Both
//! channels use internally tagged envelopes; anything that fails to
//! parse, or parses to a tag the receiver does not expect, is dropped
//! with a diagnostic log and no user-visible effect.

use serde::{Deserialize, Serialize};

/// Messages on the terminal channel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TerminalEnvelope {
    /// Raw shell output, possibly containing ANSI sequences
    #[serde(rename = "terminal:output")]
    Output {
        /// The raw text
        data: String,
    },
    /// A submitted command, newline-terminated
    #[serde(rename = "terminal:input")]
    Input {
        /// The command text
        data: String,
    },
}

/// Messages on the realtime telemetry channel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RealtimeEnvelope {
    /// Announce interest in one server (sent once, on open)
    #[serde(rename = "SUBSCRIBE_SERVER")]
    Subscribe {
        /// The server to watch
        #[serde(rename = "serverId")]
        server_id: u64,
    },
    /// Periodic telemetry snapshot
    ///
    /// The payload shape belongs to the backend; it is passed through
    /// to the subscriber unmodified.
    #[serde(rename = "SERVER_SNAPSHOT")]
    Snapshot {
        /// Opaque snapshot payload
        data: serde_json::Value,
    },
}
