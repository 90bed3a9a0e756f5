//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clock::FrameRate;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Timeline editing defaults.
    pub editor: EditorDefaults,

    /// Caption generation defaults.
    pub captions: CaptionDefaults,

    /// Scene camera-motion defaults.
    pub motion: MotionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default timeline editing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Frame rate for new projects.
    pub fps: FrameRate,

    /// Maximum undo (and redo) depth.
    pub history_limit: usize,

    /// Snap distance in timeline pixels, converted to frames at the current zoom.
    pub snap_threshold_px: f64,

    /// Timeline pixels per second at zoom 1.0.
    pub px_per_second: f64,

    /// Whether delete closes the gap by shifting later clips.
    pub ripple_delete: bool,
}

/// Default caption generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionDefaults {
    /// Maximum words per generated cue, clamped to `[2, 10]`.
    pub words_per_caption: u32,

    /// Shift applied to generated cues, clamped to `[-500, 1500]` ms.
    pub subtitle_delay_ms: i64,

    /// Number of visual lanes used when packing overlapping cues.
    pub lane_count: usize,
}

/// Default scene camera-motion overlay parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionDefaults {
    /// Motion preset name (`gentle_zoom`, `up_down`, `left_right`, `focus_smooth`, `random`).
    pub preset: String,
    pub motion_speed_percent: f64,
    pub focus_x_percent: f64,
    pub focus_y_percent: f64,
    pub focus_drift_percent: f64,
    pub focus_zoom_percent: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reelcut_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            fps: FrameRate::Fps30,
            history_limit: 50,
            snap_threshold_px: 8.0,
            px_per_second: 42.0,
            ripple_delete: false,
        }
    }
}

impl Default for CaptionDefaults {
    fn default() -> Self {
        Self {
            words_per_caption: 5,
            subtitle_delay_ms: 180,
            lane_count: 3,
        }
    }
}

impl Default for MotionDefaults {
    fn default() -> Self {
        Self {
            preset: "gentle_zoom".to_string(),
            motion_speed_percent: 135.0,
            focus_x_percent: 50.0,
            focus_y_percent: 50.0,
            focus_drift_percent: 6.0,
            focus_zoom_percent: 9.0,
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
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
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
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("reelcut").join("config.json")
}
