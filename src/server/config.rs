//! Server configuration types
//!
//! Contains all configuration structures for the Tally server.

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Directory holding the SQLite database (default: `./data`)
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub retention: RetentionAppConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data_dir: None,
            retention: RetentionAppConfig::default(),
        }
    }
}

/// Liveness server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Retention sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionAppConfig {
    /// Enable the daily sweep task
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Age in days beyond which records are evicted
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Seconds between sweep runs (once per day)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for RetentionAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retention_days: default_retention_days(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    tally_core::DEFAULT_RETENTION_DAYS
}

fn default_sweep_interval() -> u64 {
    86_400
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.data_dir.is_none());
        assert!(config.retention.enabled);
        assert_eq!(config.retention.retention_days, 30);
        assert_eq!(config.retention.sweep_interval_secs, 86_400);
    }

    #[test]
    fn test_missing_retention_fields_fill_defaults() {
        let retention: RetentionAppConfig = serde_json::from_str("{}").unwrap();
        assert!(retention.enabled);
        assert_eq!(retention.retention_days, 30);
        assert_eq!(retention.sweep_interval_secs, 86_400);
    }

    #[test]
    fn test_retention_overrides() {
        let retention: RetentionAppConfig =
            serde_json::from_str(r#"{"enabled": false, "retention_days": 7}"#).unwrap();
        assert!(!retention.enabled);
        assert_eq!(retention.retention_days, 7);
        assert_eq!(retention.sweep_interval_secs, 86_400);
    }
}
