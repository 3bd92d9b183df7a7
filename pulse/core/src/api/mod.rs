//! REST API Client
//!
//! Thin wrapper over the ServerPulse HTTP API. Every response body wraps
//! its payload in a `data` envelope; the wrapper unwraps it and hands
//! back typed models. A bearer token, when configured, is attached to
//! every request.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::model::{
    ApiEnvelope, Container, MetricInterval, Server, ServerMetric, ServerSnapshot, StatsOverview,
    TerminalSessionInfo,
};

/// Errors from the REST API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the body could not be read
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The backend answered with a non-success status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// ServerPulse HTTP API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client for the configured backend
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// The configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// All registered servers
    pub async fn servers(&self) -> Result<Vec<Server>, ApiError> {
        self.get("/api/v1/stats/servers").await
    }

    /// Fleet-wide dashboard aggregates
    pub async fn stats_overview(&self) -> Result<StatsOverview, ApiError> {
        self.get("/api/v1/stats/overview").await
    }

    /// Latest snapshot for one server
    pub async fn server_overview(&self, server_id: u64) -> Result<ServerSnapshot, ApiError> {
        self.get(&format!("/api/v1/stats/servers/{server_id}/overview"))
            .await
    }

    /// Containers reported by one server
    pub async fn server_containers(&self, server_id: u64) -> Result<Vec<Container>, ApiError> {
        self.get(&format!("/api/v1/stats/servers/{server_id}/containers"))
            .await
    }

    /// Aggregated metrics for one server
    pub async fn server_metrics(
        &self,
        server_id: u64,
        interval: MetricInterval,
    ) -> Result<Vec<ServerMetric>, ApiError> {
        self.get(&format!(
            "/api/v1/stats/servers/{server_id}/metrics?interval={}",
            interval.as_str()
        ))
        .await
    }

    /// Start a terminal session on a server
    ///
    /// The returned `ws_url` is relative; join it with the configured
    /// WebSocket base to open the terminal socket.
    pub async fn start_terminal_session(
        &self,
        server_id: u64,
    ) -> Result<TerminalSessionInfo, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct StartSession {
            server_id: u64,
        }

        self.post("/api/v1/terminal/session", &StartSession { server_id })
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }
}
