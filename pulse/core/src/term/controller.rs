//! Terminal Controller
//!
//! Owns everything one terminal view needs: the output log, the command
//! history, the text-entry buffer, the carried style state and at most
//! one live transport session. The hosting view forwards key events and
//! pumps transport events; all protocol behavior lives here.

use tokio::sync::mpsc;

use crate::ansi::{decode, Rgb, Segment, StyleState};
use crate::transport::{SessionEvent, TerminalSocket, TransportError};

use super::history::{BrowseResult, CommandHistory};
use super::line::{Line, LineKind, OutputLog, SYSTEM_GRAY};

/// Prompt accent (the `$ ` prefix on echoed commands)
pub const PROMPT_ACCENT: Rgb = Rgb::new(0x22, 0xd3, 0xee);
/// System notice: session established
pub const CONNECTED_GREEN: Rgb = Rgb::new(0x98, 0xc3, 0x79);
/// System notice: transport error
pub const ERROR_RED: Rgb = Rgb::new(0xe0, 0x6c, 0x75);
/// System notice: session ended
pub const DISCONNECT_AMBER: Rgb = Rgb::new(0xe5, 0xc0, 0x7b);

/// The server a session is attached to, for header display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTarget {
    /// Server id
    pub server_id: u64,
    /// Hostname shown in the view header
    pub hostname: String,
    /// OS label shown next to the hostname
    pub os: Option<String>,
}

/// State and behavior of one terminal view
#[derive(Debug, Default)]
pub struct TerminalController {
    log: OutputLog,
    history: CommandHistory,
    entry: String,
    style: StyleState,
    socket: Option<TerminalSocket>,
    events: Option<mpsc::Receiver<SessionEvent>>,
    target: Option<SessionTarget>,
}

impl TerminalController {
    /// Create a controller with an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a freshly connected socket to this view
    ///
    /// Refused while an unclosed session is held; the old session must
    /// end (or be detached) first. On success a "Connecting" notice is
    /// appended and the style state starts fresh.
    pub fn attach(
        &mut self,
        socket: TerminalSocket,
        events: mpsc::Receiver<SessionEvent>,
        target: SessionTarget,
    ) -> Result<(), TransportError> {
        if self.socket.as_ref().is_some_and(TerminalSocket::is_open) {
            return Err(TransportError::InvalidState(
                "a terminal session is already active".to_string(),
            ));
        }

        self.style = StyleState::default();
        self.log.push_system("Connecting to server...", SYSTEM_GRAY);
        self.socket = Some(socket);
        self.events = Some(events);
        self.target = Some(target);
        Ok(())
    }

    /// Tear down the owned session, if any
    ///
    /// Dropping the event receiver first guarantees no late events are
    /// folded after this returns.
    pub fn detach(&mut self) {
        self.events = None;
        if let Some(socket) = self.socket.take() {
            socket.close();
        }
        self.target = None;
    }

    /// Whether a live session is attached
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.socket.as_ref().is_some_and(TerminalSocket::is_open)
    }

    /// Server of the current (or last) session
    #[must_use]
    pub fn target(&self) -> Option<&SessionTarget> {
        self.target.as_ref()
    }

    /// Drain pending transport events and fold them into the view state
    ///
    /// Returns whether anything was folded.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        // Collect first: folding needs &mut self.
        let mut drained = Vec::new();
        if let Some(events) = self.events.as_mut() {
            while let Ok(event) = events.try_recv() {
                drained.push(event);
            }
        }
        for event in drained {
            self.handle_event(event);
            changed = true;
        }
        changed
    }

    /// Fold one transport event into the view state
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Opened => {
                self.log
                    .push_system("Connected to terminal session", CONNECTED_GREEN);
            }
            SessionEvent::Output(data) => {
                let (segments, style) = decode(&data, std::mem::take(&mut self.style));
                self.style = style;
                self.log.append(segments, LineKind::Output);
            }
            SessionEvent::Error(message) => {
                tracing::warn!(error = %message, "terminal transport error");
                self.log.push_system("Connection error", ERROR_RED);
            }
            SessionEvent::Closed => {
                self.log
                    .push_system("Disconnected from terminal", DISCONNECT_AMBER);
                self.socket = None;
                self.events = None;
            }
        }
    }

    /// Submit the entry buffer as a command
    ///
    /// A blank buffer or a missing session makes this a no-op. Otherwise
    /// the raw text goes to the history, an echo line goes to the log,
    /// and the newline-terminated command goes to the transport.
    pub async fn submit(&mut self) -> Result<(), TransportError> {
        if self.entry.trim().is_empty() {
            return Ok(());
        }
        let Some(socket) = self.socket.as_ref().filter(|s| s.is_open()) else {
            return Ok(());
        };

        let raw = self.entry.clone();
        self.history.push(raw.clone());

        let prompt_style = StyleState {
            bold: true,
            ..StyleState::colored(PROMPT_ACCENT)
        };
        self.log.append(
            vec![Segment::new("$ ", prompt_style), Segment::plain(raw.clone())],
            LineKind::Input,
        );

        socket.send_input(format!("{raw}\n")).await?;
        self.entry.clear();
        Ok(())
    }

    /// Discard the log and reseed it with a clear notice
    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Recall the previous (older) command into the entry buffer
    pub fn history_back(&mut self) {
        match self.history.back() {
            BrowseResult::Recall(command) => self.entry = command,
            BrowseResult::ClearBuffer => self.entry.clear(),
            BrowseResult::Unchanged => {}
        }
    }

    /// Recall the next (newer) command into the entry buffer
    pub fn history_forward(&mut self) {
        match self.history.forward() {
            BrowseResult::Recall(command) => self.entry = command,
            BrowseResult::ClearBuffer => self.entry.clear(),
            BrowseResult::Unchanged => {}
        }
    }

    /// Current entry buffer
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Append one character to the entry buffer
    pub fn push_char(&mut self, c: char) {
        self.entry.push(c);
    }

    /// Remove the last character of the entry buffer
    pub fn backspace(&mut self) {
        self.entry.pop();
    }

    /// Replace the entry buffer
    pub fn set_entry(&mut self, text: String) {
        self.entry = text;
    }

    /// Rendered lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.log.lines()
    }

    /// Submitted-command history
    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Take the pending scroll-to-end signal
    pub fn take_scroll_request(&mut self) -> bool {
        self.log.take_scroll_request()
    }
}
