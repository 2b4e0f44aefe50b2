//! Configuration management for the wordspell CLI.
//!
//! A small TOML file with three sections: where saves live, how to log, and
//! whether/where to probe the display-mode gate. Every value has a sensible
//! default so a missing file or section is never fatal; `wordspell init`
//! writes the defaults out for editing.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the sled database with progress and settings.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level: error, warn, info, debug, or trace.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; stdout is still used when it is a TTY.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// When false the probe is skipped entirely and the game always shows.
    #[serde(default)]
    pub enabled: bool,
    /// Endpoint consulted for the display-mode decision.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_gate_timeout")]
    pub timeout_seconds: u32,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_gate_timeout() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            timeout_seconds: default_gate_timeout(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("failed to read config file {}: {}", path, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| anyhow!("failed to parse config file {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file for first-time setup.
    pub async fn create_default(path: &str) -> Result<()> {
        let serialized = toml::to_string_pretty(&Config::default())?;
        fs::write(path, serialized)
            .await
            .map_err(|e| anyhow!("failed to write config file {}: {}", path, e))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => return Err(anyhow!("invalid logging.level: {}", other)),
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.gate.enabled && self.gate.url.trim().is_empty() {
            return Err(anyhow!("gate.enabled requires gate.url"));
        }
        if self.gate.timeout_seconds == 0 {
            return Err(anyhow!("gate.timeout_seconds must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");
        assert_eq!(parsed.storage.data_dir, "data");
        assert_eq!(parsed.logging.level, "info");
        assert!(!parsed.gate.enabled);
        assert_eq!(parsed.gate.timeout_seconds, 5);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").expect("parse empty");
        assert_eq!(parsed.storage.data_dir, "data");
        assert!(parsed.logging.file.is_none());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.logging.level = "noisy".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gate.enabled = true;
        assert!(config.validate().is_err(), "enabled gate needs a url");

        let mut config = Config::default();
        config.gate.enabled = true;
        config.gate.url = "https://example.com/gate".to_string();
        assert!(config.validate().is_ok());
    }
}
