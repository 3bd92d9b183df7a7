//! Client Configuration
//!
//! Environment-driven configuration for the REST API and the two
//! streaming channels.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection endpoints and credentials for the ServerPulse backend
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API (no trailing slash)
    pub api_url: String,
    /// Base URL of the WebSocket endpoints (no trailing slash)
    pub ws_url: String,
    /// Bearer token for authenticated requests, if any
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000".to_string(),
            ws_url: "ws://localhost:4000".to_string(),
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `PULSE_API_URL`: REST base URL
    /// - `PULSE_WS_URL`: WebSocket base URL
    /// - `PULSE_AUTH_TOKEN`: bearer token
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("PULSE_API_URL").unwrap_or(defaults.api_url),
            ws_url: std::env::var("PULSE_WS_URL").unwrap_or(defaults.ws_url),
            auth_token: std::env::var("PULSE_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// Absolute WebSocket URL for a backend-supplied relative path
    #[must_use]
    pub fn ws_endpoint(&self, relative: &str) -> String {
        format!("{}{}", self.ws_url, relative)
    }

    /// Absolute URL of the realtime telemetry endpoint
    #[must_use]
    pub fn realtime_endpoint(&self) -> String {
        self.ws_endpoint("/ws/realtime")
    }
}

/// Reconnect policy for the realtime telemetry channel
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Consecutive connection failures tolerated before giving up
    pub max_attempts: u32,
    /// Delay before the first reconnect attempt
    pub backoff_base: Duration,
    /// Upper bound on the exponential backoff delay
    pub backoff_max: Duration,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_base: Duration::from_millis(500),
            backoff_max: Duration::from_secs(15),
        }
    }
}

impl RealtimeConfig {
    /// Backoff delay for the given consecutive-failure count (1-based)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        let delay = self.backoff_base.saturating_mul(1u32 << shift);
        delay.min(self.backoff_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ws_endpoint_joins_relative_path() {
        let config = ClientConfig {
            ws_url: "ws://pulse.example:4000".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.ws_endpoint("/ws/terminal/s-1"),
            "ws://pulse.example:4000/ws/terminal/s-1"
        );
        assert_eq!(
            config.realtime_endpoint(),
            "ws://pulse.example:4000/ws/realtime"
        );
    }

    #[test]
    fn backoff_grows_exponentially_and_caps() {
        let config = RealtimeConfig::default();
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(10), Duration::from_secs(15));
    }
}
