//! Realtime Telemetry Subscription
//!
//! Push channel for server snapshots. On connect the subscription
//! announces interest in one server id; the backend then streams
//! `SERVER_SNAPSHOT` envelopes, whose payloads are forwarded untouched
//! to the subscriber's channel.
//!
//! Unlike the terminal socket, this channel is supervised: a dropped
//! connection is reopened with exponential backoff and the subscription
//! is replayed, up to a bounded number of consecutive failures. The
//! subscription ends when the handle is dropped or the subscriber's
//! receiver goes away.

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use futures::{SinkExt, StreamExt};

use crate::config::RealtimeConfig;

use super::envelope::RealtimeEnvelope;
use super::TransportError;

/// Handle to a running telemetry subscription
///
/// Dropping the handle stops the supervisor task.
#[derive(Debug)]
pub struct TelemetrySubscription {
    server_id: u64,
    task: JoinHandle<()>,
}

impl TelemetrySubscription {
    /// Start watching `server_id` through the realtime endpoint
    ///
    /// Snapshot payloads arrive on `tx` in the order the backend sends
    /// them.
    #[must_use]
    pub fn spawn(
        endpoint: String,
        server_id: u64,
        config: RealtimeConfig,
        tx: mpsc::Sender<serde_json::Value>,
    ) -> Self {
        let task = tokio::spawn(supervise(endpoint, server_id, config, tx));
        Self { server_id, task }
    }

    /// The watched server id
    #[must_use]
    pub fn server_id(&self) -> u64 {
        self.server_id
    }

    /// Stop the subscription
    pub fn close(&self) {
        self.task.abort();
    }
}

impl Drop for TelemetrySubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Connect, subscribe, pump; reconnect on loss with bounded backoff.
async fn supervise(
    endpoint: String,
    server_id: u64,
    config: RealtimeConfig,
    tx: mpsc::Sender<serde_json::Value>,
) {
    let mut failures: u32 = 0;

    loop {
        if tx.is_closed() {
            return;
        }

        match connect_async(endpoint.as_str()).await {
            Ok((ws, _response)) => {
                tracing::debug!(server_id, "realtime channel connected");
                failures = 0;
                match pump(ws, server_id, &tx).await {
                    Ok(()) => tracing::debug!(server_id, "realtime channel closed"),
                    Err(e) => tracing::warn!(server_id, error = %e, "realtime channel error"),
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(
                    server_id,
                    error = %e,
                    attempt = failures,
                    "realtime connect failed"
                );
                if failures >= config.max_attempts {
                    tracing::warn!(server_id, "realtime subscription giving up");
                    return;
                }
            }
        }

        if tx.is_closed() {
            return;
        }
        tokio::time::sleep(config.delay_for_attempt(failures.max(1))).await;
    }
}

/// Send the subscribe envelope, then forward snapshots until the
/// connection ends.
async fn pump(
    mut ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    server_id: u64,
    tx: &mpsc::Sender<serde_json::Value>,
) -> Result<(), TransportError> {
    let subscribe = serde_json::to_string(&RealtimeEnvelope::Subscribe { server_id })
        .map_err(|e| TransportError::SendFailed(e.to_string()))?;
    ws.send(Message::Text(subscribe))
        .await
        .map_err(|e| TransportError::SendFailed(e.to_string()))?;

    while let Some(frame) = ws.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<RealtimeEnvelope>(&text) {
                Ok(RealtimeEnvelope::Snapshot { data }) => {
                    if tx.send(data).await.is_err() {
                        // Subscriber is gone; nothing left to do.
                        return Ok(());
                    }
                }
                Ok(RealtimeEnvelope::Subscribe { .. }) => {}
                Err(e) => {
                    tracing::debug!(server_id, error = %e, "dropping malformed realtime message");
                }
            },
            Ok(Message::Close(_)) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(TransportError::ConnectionFailed(e.to_string())),
        }
    }

    Ok(())
}
