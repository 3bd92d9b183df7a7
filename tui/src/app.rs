//! Main Application
//!
//! The App is a thin display client over pulse-core:
//! 1. Converts key events into controller calls and API requests
//! 2. Pumps transport events into the terminal controller
//! 3. Forwards telemetry snapshots into dashboard state
//! 4. Renders from core state every frame
//!
//! No protocol logic lives here; everything the wire does is owned by
//! the core crate.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use pulse_core::config::RealtimeConfig;
use pulse_core::term::SessionTarget;
use pulse_core::transport::TerminalSocket;
use pulse_core::{
    ApiClient, ClientConfig, Server, ServerSnapshot, StatsOverview, TelemetrySubscription,
    TerminalController,
};

use crate::ui;

/// How often transport channels are drained
const PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// How often REST-backed data refreshes
const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Top-level screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Server list + remote shell
    Terminal,
    /// Fleet overview + live per-server telemetry
    Dashboard,
}

impl Tab {
    /// The other tab
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Terminal => Self::Dashboard,
            Self::Dashboard => Self::Terminal,
        }
    }
}

/// Main application state
pub struct App {
    running: bool,
    pub(crate) tab: Tab,
    config: ClientConfig,
    api: ApiClient,

    // === Server list ===
    pub(crate) servers: Vec<Server>,
    pub(crate) selected: usize,
    pub(crate) loading: bool,
    pub(crate) status: Option<String>,

    // === Terminal view ===
    pub(crate) controller: TerminalController,
    pub(crate) terminal_open: bool,
    pub(crate) scroll_from_bottom: u16,

    // === Dashboard ===
    pub(crate) overview: Option<StatsOverview>,
    pub(crate) snapshot: Option<ServerSnapshot>,
    telemetry: Option<TelemetrySubscription>,
    snapshot_rx: Option<mpsc::Receiver<serde_json::Value>>,
}

impl App {
    /// Create the app for the configured backend
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let api = ApiClient::new(config.clone());
        Self {
            running: true,
            tab: Tab::Terminal,
            config,
            api,
            servers: Vec::new(),
            selected: 0,
            loading: false,
            status: None,
            controller: TerminalController::new(),
            terminal_open: false,
            scroll_from_bottom: 0,
            overview: None,
            snapshot: None,
            telemetry: None,
            snapshot_rx: None,
        }
    }

    /// Run the event loop until quit
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.refresh_servers().await;
        self.refresh_overview().await;

        let mut events = EventStream::new();
        let mut pump = tokio::time::interval(PUMP_INTERVAL);
        let mut refresh = tokio::time::interval(REFRESH_INTERVAL);
        // Intervals fire immediately on first tick; the initial loads
        // above already covered that.
        pump.tick().await;
        refresh.tick().await;

        while self.running {
            terminal.draw(|frame| ui::draw(frame, &mut self))?;

            tokio::select! {
                maybe_event = events.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.on_event(event).await;
                    }
                }
                _ = pump.tick() => self.pump(),
                _ = refresh.tick() => {
                    self.refresh_servers().await;
                    if self.tab == Tab::Dashboard {
                        self.refresh_overview().await;
                    }
                }
            }
        }

        self.controller.detach();
        Ok(())
    }

    /// Drain transport channels into view state
    fn pump(&mut self) {
        self.controller.pump();
        if self.controller.take_scroll_request() {
            self.scroll_from_bottom = 0;
        }

        if let Some(rx) = self.snapshot_rx.as_mut() {
            while let Ok(value) = rx.try_recv() {
                match serde_json::from_value::<ServerSnapshot>(value) {
                    Ok(snapshot) => self.snapshot = Some(snapshot),
                    Err(e) => tracing::debug!(error = %e, "ignoring malformed snapshot"),
                }
            }
        }
    }

    async fn on_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.on_key(key).await;
            }
        }
    }

    async fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        if self.terminal_open {
            self.on_terminal_key(key).await;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab => self.switch_tab().await,
            KeyCode::Up => self.move_selection(-1).await,
            KeyCode::Down => self.move_selection(1).await,
            KeyCode::Enter if self.tab == Tab::Terminal => self.connect_selected().await,
            KeyCode::Char('r') => {
                self.refresh_servers().await;
                self.refresh_overview().await;
            }
            _ => {}
        }
    }

    /// Keys while the terminal view is open
    async fn on_terminal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.controller.detach();
                self.terminal_open = false;
            }
            KeyCode::Enter => {
                if let Err(e) = self.controller.submit().await {
                    self.status = Some(format!("Send failed: {e}"));
                }
            }
            KeyCode::Up => self.controller.history_back(),
            KeyCode::Down => self.controller.history_forward(),
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.clear();
            }
            KeyCode::Backspace => self.controller.backspace(),
            KeyCode::PageUp => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(10);
            }
            KeyCode::PageDown => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(10);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.push_char(c);
            }
            _ => {}
        }
    }

    async fn switch_tab(&mut self) {
        self.tab = self.tab.toggled();
        match self.tab {
            Tab::Dashboard => {
                self.refresh_overview().await;
                self.watch_selected_server().await;
            }
            Tab::Terminal => self.drop_subscription(),
        }
    }

    async fn move_selection(&mut self, delta: isize) {
        if self.servers.is_empty() {
            return;
        }
        let len = self.servers.len() as isize;
        let next = (self.selected as isize + delta).rem_euclid(len);
        self.selected = next as usize;

        if self.tab == Tab::Dashboard {
            self.watch_selected_server().await;
        }
    }

    /// Open a shell on the selected server
    async fn connect_selected(&mut self) {
        let Some(server) = self.servers.get(self.selected).cloned() else {
            return;
        };
        if !server.is_online() {
            self.status = Some(format!("{} is offline", server.hostname));
            return;
        }

        let info = match self.api.start_terminal_session(server.id).await {
            Ok(info) => info,
            Err(e) => {
                self.status = Some(format!("Session start failed: {e}"));
                return;
            }
        };

        let url = self.config.ws_endpoint(&info.ws_url);
        match TerminalSocket::connect(&url, info.session_id).await {
            Ok((socket, events)) => {
                let target = SessionTarget {
                    server_id: server.id,
                    hostname: server.hostname.clone(),
                    os: server.os.clone(),
                };
                match self.controller.attach(socket, events, target) {
                    Ok(()) => {
                        self.terminal_open = true;
                        self.scroll_from_bottom = 0;
                        self.status = None;
                    }
                    Err(e) => self.status = Some(format!("Attach failed: {e}")),
                }
            }
            Err(e) => self.status = Some(format!("Connect failed: {e}")),
        }
    }

    /// (Re)subscribe the dashboard to the selected server's telemetry
    ///
    /// Seeds the snapshot from REST so the gauges paint before the
    /// first push arrives.
    async fn watch_selected_server(&mut self) {
        let Some(server) = self.servers.get(self.selected) else {
            return;
        };
        let server_id = server.id;

        if self
            .telemetry
            .as_ref()
            .is_some_and(|t| t.server_id() == server_id)
        {
            return;
        }

        self.snapshot = match self.api.server_overview(server_id).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::debug!(server_id, error = %e, "overview fetch failed");
                None
            }
        };

        let (tx, rx) = mpsc::channel(16);
        self.telemetry = Some(TelemetrySubscription::spawn(
            self.config.realtime_endpoint(),
            server_id,
            RealtimeConfig::default(),
            tx,
        ));
        self.snapshot_rx = Some(rx);
    }

    fn drop_subscription(&mut self) {
        self.telemetry = None;
        self.snapshot_rx = None;
        self.snapshot = None;
    }

    async fn refresh_servers(&mut self) {
        self.loading = true;
        match self.api.servers().await {
            Ok(servers) => {
                self.servers = servers;
                if self.selected >= self.servers.len() {
                    self.selected = 0;
                }
            }
            Err(e) => self.status = Some(format!("Server fetch failed: {e}")),
        }
        self.loading = false;
    }

    async fn refresh_overview(&mut self) {
        match self.api.stats_overview().await {
            Ok(overview) => self.overview = Some(overview),
            Err(e) => tracing::debug!(error = %e, "overview refresh failed"),
        }
    }
}
