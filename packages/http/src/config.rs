//! Client configuration.
//!
//! Both structs deserialize with defaults for every optional field, so a
//! host application can load them from JSON (or any serde format):
//!
//! ```json
//! { "base_url": "https://api.example.com", "transport": { "timeout_ms": 5000 } }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Settings for a [`Client`](crate::Client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every request path is appended to.
    pub base_url: String,

    #[serde(default)]
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            transport: TransportConfig::default(),
        }
    }
}

/// Settings for the default reqwest-backed transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("https://api.example.com"));
        assert_eq!(config.transport.timeout(), Duration::from_secs(30));
        assert!(config.transport.user_agent.is_none());
    }

    #[test]
    fn transport_overrides() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "base_url": "http://localhost:8080",
                "transport": {"timeout_ms": 1500, "user_agent": "courier/0.1"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.transport.timeout(), Duration::from_millis(1500));
        assert_eq!(config.transport.user_agent.as_deref(), Some("courier/0.1"));
    }

    #[test]
    fn partial_transport_section() {
        let config: TransportConfig = serde_json::from_str(r#"{"user_agent": "x"}"#).unwrap();
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn base_url_is_required() {
        assert!(serde_json::from_str::<ClientConfig>(r#"{"transport": {}}"#).is_err());
    }
}
