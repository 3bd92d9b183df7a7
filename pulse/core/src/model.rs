//! Data Model
//!
//! Serde types for the ServerPulse REST and realtime wire formats.
//! Field names follow the backend's camelCase JSON except where the
//! backend itself uses snake_case (the terminal session response).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every REST response body
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// The actual payload
    pub data: T,
}

/// Deployment environment of a monitored server
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production workload
    Production,
    /// Staging / pre-production
    Staging,
    /// Development machine
    Development,
}

/// Agent-reported liveness of a server
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Agent is reporting
    Online,
    /// Agent has gone quiet
    Offline,
}

/// A monitored server
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Numeric server id
    pub id: u64,
    /// Stable UUID assigned at registration
    pub uuid: String,
    /// Display name
    pub name: String,
    /// Hostname reported by the agent
    pub hostname: String,
    /// Deployment environment
    pub environment: Environment,
    /// Operating system label
    #[serde(default)]
    pub os: Option<String>,
    /// CPU architecture
    #[serde(default)]
    pub arch: Option<String>,
    /// Version of the reporting agent
    #[serde(default)]
    pub agent_version: Option<String>,
    /// Current liveness
    #[serde(default)]
    pub status: Option<ServerStatus>,
    /// Last time the agent checked in
    #[serde(default)]
    pub last_seen_at: Option<DateTime<Utc>>,
    /// Latest snapshot, when the backend embeds one
    #[serde(default)]
    pub snapshot: Option<ServerSnapshot>,
}

impl Server {
    /// Whether the server can accept a terminal session
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status == Some(ServerStatus::Online)
    }
}

/// Point-in-time telemetry for one server
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSnapshot {
    /// Snapshot row id
    pub id: u64,
    /// Owning server id
    pub server_id: u64,
    /// Seconds since boot
    pub uptime_seconds: u64,
    /// Logical CPU count
    pub cpu_cores: u32,
    /// CPU utilization, 0-100
    pub cpu_percent: f64,
    /// Total memory in MB
    #[serde(rename = "memoryTotalMB")]
    pub memory_total_mb: f64,
    /// Used memory in MB
    #[serde(rename = "memoryUsedMB")]
    pub memory_used_mb: f64,
    /// Memory utilization, 0-100
    pub memory_percent: f64,
    /// Total disk in GB
    #[serde(rename = "diskTotalGB")]
    pub disk_total_gb: f64,
    /// Used disk in GB
    #[serde(rename = "diskUsedGB")]
    pub disk_used_gb: f64,
    /// Disk utilization, 0-100
    pub disk_percent: f64,
    /// Containers visible to the agent
    pub container_count: u32,
    /// When the snapshot was taken
    pub updated_at: DateTime<Utc>,
}

/// Aggregated metric row for one server
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetric {
    /// Metric row id
    pub id: u64,
    /// Owning server id
    pub server_id: u64,
    /// Aggregation interval
    pub interval: MetricInterval,
    /// Average CPU over the window, 0-100
    pub cpu_avg: f64,
    /// Average memory over the window, 0-100
    pub memory_avg: f64,
    /// Average disk over the window, 0-100
    pub disk_avg: f64,
    /// Window start
    pub from_time: DateTime<Utc>,
    /// Window end
    pub to_time: DateTime<Utc>,
}

/// Aggregation interval for server metrics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricInterval {
    /// One-minute buckets
    #[serde(rename = "1m")]
    OneMinute,
    /// Five-minute buckets
    #[serde(rename = "5m")]
    FiveMinutes,
    /// One-hour buckets
    #[default]
    #[serde(rename = "1h")]
    OneHour,
}

impl MetricInterval {
    /// Wire representation, used in query strings
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::OneHour => "1h",
        }
    }
}

/// A container reported by a server's agent
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Numeric row id
    pub id: u64,
    /// Runtime container id
    pub container_id: String,
    /// Container name
    pub name: String,
    /// Image reference
    pub image: String,
    /// Runtime state ("running", "exited", ...)
    pub state: String,
    /// Human-readable status line
    pub status: String,
    /// CPU utilization, 0-100
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    /// Memory usage in MB
    #[serde(default, rename = "memoryUsageMB")]
    pub memory_usage_mb: Option<f64>,
    /// Memory limit in MB
    #[serde(default, rename = "memoryLimitMB")]
    pub memory_limit_mb: Option<f64>,
    /// Last time the agent saw this container
    #[serde(default)]
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// Fleet-wide dashboard aggregates
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    /// Servers currently online
    pub online_servers: u32,
    /// Servers currently offline
    pub offline_servers: u32,
    /// Critical events in the recent window
    pub critical_events: u32,
    /// Running containers across the fleet
    pub running_containers: u32,
    /// Fleet-average CPU utilization, 0-100
    pub avg_cpu_percent: f64,
    /// Fleet-average memory utilization, 0-100
    pub avg_memory_percent: f64,
}

/// Response of the terminal session endpoint
///
/// The backend answers in snake_case here; `ws_url` is a path relative
/// to the configured WebSocket base.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerminalSessionInfo {
    /// Backend-assigned session id
    pub session_id: String,
    /// Relative WebSocket path for the session
    pub ws_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn server_deserializes_camel_case() {
        let json = r#"{
            "id": 3,
            "uuid": "a-b-c",
            "name": "web-1",
            "hostname": "web-1.internal",
            "environment": "production",
            "os": "Ubuntu 24.04",
            "agentVersion": "1.4.2",
            "status": "online",
            "lastSeenAt": "2025-11-02T10:00:00Z"
        }"#;

        let server: Server = serde_json::from_str(json).unwrap();
        assert_eq!(server.id, 3);
        assert_eq!(server.environment, Environment::Production);
        assert_eq!(server.agent_version.as_deref(), Some("1.4.2"));
        assert!(server.is_online());
        assert!(server.snapshot.is_none());
    }

    #[test]
    fn snapshot_unit_suffixes_keep_backend_casing() {
        let json = r#"{
            "id": 1,
            "serverId": 3,
            "uptimeSeconds": 86400,
            "cpuCores": 8,
            "cpuPercent": 12.5,
            "memoryTotalMB": 32000.0,
            "memoryUsedMB": 9500.0,
            "memoryPercent": 29.7,
            "diskTotalGB": 500.0,
            "diskUsedGB": 120.0,
            "diskPercent": 24.0,
            "containerCount": 12,
            "updatedAt": "2025-11-02T10:00:00Z"
        }"#;

        let snapshot: ServerSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.memory_total_mb, 32000.0);
        assert_eq!(snapshot.container_count, 12);
    }

    #[test]
    fn metric_interval_round_trips() {
        assert_eq!(
            serde_json::to_string(&MetricInterval::FiveMinutes).unwrap(),
            "\"5m\""
        );
        let parsed: MetricInterval = serde_json::from_str("\"1h\"").unwrap();
        assert_eq!(parsed, MetricInterval::OneHour);
    }

    #[test]
    fn terminal_session_response_is_snake_case() {
        let json = r#"{"data":{"session_id":"s-42","ws_url":"/ws/terminal/s-42"}}"#;
        let envelope: ApiEnvelope<TerminalSessionInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.session_id, "s-42");
        assert_eq!(envelope.data.ws_url, "/ws/terminal/s-42");
    }
}
