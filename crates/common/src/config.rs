//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where projects are stored.
    pub projects_dir: PathBuf,

    /// Default editor settings for new projects.
    pub editor: EditorDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default editor parameters for new projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorDefaults {
    /// Initial project duration in seconds.
    pub duration_secs: f64,

    /// Initial timeline zoom (pixels per second).
    pub zoom_px_per_sec: f64,

    /// Default aspect ratio (e.g. "16:9").
    pub aspect_ratio: String,

    /// Export frame rate.
    pub export_fps: u32,

    /// Snap threshold in display pixels.
    pub snap_threshold_px: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reelcore=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            projects_dir: dirs_default_projects(),
            editor: EditorDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            zoom_px_per_sec: 50.0,
            aspect_ratio: "16:9".to_string(),
            export_fps: 30,
            snap_threshold_px: 10.0,
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

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
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
    base.join("reelcore").join("config.json")
}

/// Default projects directory.
fn dirs_default_projects() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("reelcore").join("projects")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.editor.export_fps, 30);
        assert!((cfg.editor.snap_threshold_px - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_roundtrip() {
        let cfg = AppConfig::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.logging.level, "info");
        assert!(!parsed.logging.json);
    }
}
