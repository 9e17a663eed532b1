//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file. Every
//! field has a default, so an absent file yields the stock bridge on
//! `127.0.0.1:8766` with a 15 second outbound timeout.

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind address, inbound limits).
    pub listener: ListenerConfig,

    /// Outbound HTTP client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address. Must be a loopback address.
    pub bind_address: String,

    /// Optional cap on relay requests in flight at once.
    /// Requests beyond the cap wait for a slot; `None` means unbounded.
    pub max_in_flight: Option<usize>,

    /// Optional cap on inbound envelope size in bytes; `None` reads the
    /// full declared Content-Length.
    pub max_body_size: Option<usize>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8766".to_string(),
            max_in_flight: None,
            max_body_size: None,
        }
    }
}

/// Outbound call configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Total deadline for one outbound call, in seconds.
    pub timeout_secs: u64,

    /// Maximum number of redirects followed before giving up.
    pub max_redirects: usize,

    /// User-Agent sent when the envelope does not set one.
    pub user_agent: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_redirects: 30,
            user_agent: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9766".to_string(),
        }
    }
}
