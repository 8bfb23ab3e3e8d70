//! Orchestrator configuration.

use herald_error::{ConfigError, HeraldResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the Herald server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// Scheduler tick cadence
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Metrics API binding
    #[serde(default)]
    pub api: ApiConfig,
    /// Instagram Graph API tuning
    #[serde(default)]
    pub instagram: InstagramConfig,
}

impl HeraldConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> HeraldResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?)
    }
}

/// Tick cadence for both schedulers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between ticks; the minute-key dedup assumes this stays at or
    /// below one minute
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

impl SchedulerConfig {
    /// Tick period as a [`Duration`].
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.tick_seconds)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
        }
    }
}

fn default_tick_seconds() -> u64 {
    60
}

/// Metrics API binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Socket address the health/metrics router listens on
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

/// Instagram Graph API tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstagramConfig {
    /// Graph API base URL
    #[serde(default = "default_graph_url")]
    pub base_url: String,
    /// Container readiness retry budget
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    /// Fixed backoff between readiness checks, in seconds
    #[serde(default = "default_poll_delay_seconds")]
    pub poll_delay_seconds: u64,
}

impl InstagramConfig {
    /// Poll delay as a [`Duration`].
    pub fn poll_delay(&self) -> Duration {
        Duration::from_secs(self.poll_delay_seconds)
    }
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            base_url: default_graph_url(),
            poll_attempts: default_poll_attempts(),
            poll_delay_seconds: default_poll_delay_seconds(),
        }
    }
}

fn default_graph_url() -> String {
    "https://graph.facebook.com/v18.0".to_string()
}

fn default_poll_attempts() -> u32 {
    10
}

fn default_poll_delay_seconds() -> u64 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let config: HeraldConfig = toml::from_str("").unwrap();
        assert_eq!(config.scheduler.tick_seconds, 60);
        assert_eq!(config.api.bind, "127.0.0.1:8787");
        assert_eq!(config.instagram.poll_attempts, 10);
    }

    #[test]
    fn partial_config_overrides_stick() {
        let config: HeraldConfig = toml::from_str(
            r#"
            [scheduler]
            tick_seconds = 30

            [instagram]
            poll_attempts = 3
            poll_delay_seconds = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.scheduler.tick_seconds, 30);
        assert_eq!(config.instagram.poll_attempts, 3);
        assert_eq!(config.api.bind, "127.0.0.1:8787");
    }
}
