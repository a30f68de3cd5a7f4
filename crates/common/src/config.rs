//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default replay settings used by the CLI.
    pub replay: ReplayDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default parameters for replaying snapshot streams offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayDefaults {
    /// Output canvas width in pixels.
    pub frame_width: u32,

    /// Output canvas height in pixels.
    pub frame_height: u32,

    /// Nominal frame rate of the recorded snapshot stream.
    pub fps: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "smilyface=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ReplayDefaults {
    fn default() -> Self {
        Self {
            frame_width: 1080,
            frame_height: 1920,
            fps: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("smilyface").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"replay":{"fps":60}}"#).unwrap();
        assert_eq!(config.replay.fps, 60);
        assert_eq!(config.replay.frame_width, 1080);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        let path = config_file_path();
        assert!(path.ends_with("smilyface/config.json"));
    }
}
