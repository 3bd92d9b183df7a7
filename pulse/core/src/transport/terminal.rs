//! Terminal Socket
//!
//! One duplex WebSocket connection scoped to a single terminal session.
//! The socket is split on connect: a reader task turns inbound envelopes
//! into [`SessionEvent`]s on an mpsc channel, a writer task drains an
//! outbound queue into `terminal:input` envelopes. The handle owns the
//! outbound sender; dropping or closing it ends the writer, which closes
//! the connection.
//!
//! A terminal socket never reconnects. Once `Closed` has been delivered
//! the instance is finished; reopening a shell requires a new
//! backend-created session and a new socket.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::envelope::TerminalEnvelope;
use super::TransportError;

/// Capacity of the event and outbound queues
const CHANNEL_CAPACITY: usize = 100;

/// Lifecycle and data events observed on a terminal session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The connection is established
    Opened,
    /// Raw output arrived from the remote shell
    Output(String),
    /// The transport reported an error; the connection may still close
    /// separately
    Error(String),
    /// The connection is gone, locally or remotely
    Closed,
}

/// Handle to one live terminal connection
#[derive(Debug)]
pub struct TerminalSocket {
    session_id: String,
    input_tx: mpsc::Sender<String>,
    connected: Arc<AtomicBool>,
}

impl TerminalSocket {
    /// Open the socket for `session_id` at the absolute `url`
    ///
    /// Returns the handle and the event stream. `SessionEvent::Opened`
    /// is already queued when this returns.
    pub async fn connect(
        url: &str,
        session_id: impl Into<String>,
    ) -> Result<(Self, mpsc::Receiver<SessionEvent>), TransportError> {
        let session_id = session_id.into();

        let (ws, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        let (mut ws_tx, mut ws_rx) = ws.split();

        let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(CHANNEL_CAPACITY);
        let (input_tx, mut input_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);

        let connected = Arc::new(AtomicBool::new(true));
        event_tx
            .send(SessionEvent::Opened)
            .await
            .map_err(|_| TransportError::InvalidState("event receiver dropped".to_string()))?;

        // Reader: wire frames -> session events
        let reader_connected = Arc::clone(&connected);
        let reader_session = session_id.clone();
        tokio::spawn(async move {
            while let Some(frame) = ws_rx.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<TerminalEnvelope>(&text) {
                            Ok(TerminalEnvelope::Output { data }) => {
                                if event_tx.send(SessionEvent::Output(data)).await.is_err() {
                                    break;
                                }
                            }
                            Ok(TerminalEnvelope::Input { .. }) => {
                                tracing::debug!(
                                    session = %reader_session,
                                    "dropping unexpected input envelope from server"
                                );
                            }
                            Err(e) => {
                                tracing::debug!(
                                    session = %reader_session,
                                    error = %e,
                                    "dropping malformed terminal message"
                                );
                            }
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        let _ = event_tx.send(SessionEvent::Error(e.to_string())).await;
                        break;
                    }
                }
            }

            reader_connected.store(false, Ordering::SeqCst);
            let _ = event_tx.send(SessionEvent::Closed).await;
            tracing::debug!(session = %reader_session, "terminal session ended");
        });

        // Writer: outbound queue -> input envelopes
        let writer_session = session_id.clone();
        tokio::spawn(async move {
            while let Some(data) = input_rx.recv().await {
                let envelope = TerminalEnvelope::Input { data };
                let json = match serde_json::to_string(&envelope) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!(session = %writer_session, error = %e, "encode failed");
                        continue;
                    }
                };
                if let Err(e) = ws_tx.send(Message::Text(json)).await {
                    tracing::warn!(session = %writer_session, error = %e, "terminal send failed");
                    break;
                }
            }
            let _ = ws_tx.close().await;
        });

        Ok((
            Self {
                session_id,
                input_tx,
                connected,
            },
            event_rx,
        ))
    }

    /// Backend-assigned session id
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether the connection is still up
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Queue one command for the remote shell
    ///
    /// `data` is sent as-is; callers append the trailing newline.
    pub async fn send_input(&self, data: String) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::InvalidState("session closed".to_string()));
        }
        self.input_tx
            .send(data)
            .await
            .map_err(|_| TransportError::SendFailed("writer task gone".to_string()))
    }

    /// Tear the connection down
    ///
    /// Marks the handle closed immediately and releases the outbound
    /// queue; the writer task completes the close handshake in the
    /// background.
    pub fn close(self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}
