//! Configuration management for the video overlay
//!
//! This module handles loading and managing configuration from config files
//! and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::utils::error::{IntoOverlayError, OverlayError, Result};

/// Storage key the playback position has always been written under
pub const DEFAULT_STORAGE_KEY: &str = "videoPlayerCurrentTime";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Control surface behaviour
    pub controls: ControlsConfig,

    /// Position persistence
    pub storage: StorageConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Control surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Seconds skipped by the forward and rewind buttons
    pub seek_step_secs: f64,

    /// Pointer inactivity before the controls hide, in milliseconds
    pub hide_delay_ms: u64,

    /// Rendered width of the scrub tooltip label
    pub tooltip_label_width_px: f64,

    /// Fixed horizontal nudge applied to the tooltip position
    pub tooltip_offset_px: f64,

    /// Element id of the container that goes fullscreen
    pub container_id: String,
}

/// Position persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the playback position is stored under
    pub key: String,

    /// Backing file for the file store (None = user config directory)
    pub path: Option<PathBuf>,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: 10.0,
            hide_delay_ms: 3000,
            tooltip_label_width_px: 50.0,
            tooltip_offset_px: 5.0,
            container_id: "video-container".to_string(),
        }
    }
}

impl ControlsConfig {
    /// Inactivity delay as a Duration
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Validate control values
    pub fn validate(&self) -> Result<()> {
        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            return Err(OverlayError::Config("Seek step must be a positive number of seconds".to_string()));
        }

        if self.hide_delay_ms == 0 {
            return Err(OverlayError::Config("Hide delay must be non-zero".to_string()));
        }

        if !self.tooltip_label_width_px.is_finite() || self.tooltip_label_width_px < 0.0 {
            return Err(OverlayError::Config("Tooltip label width must be non-negative".to_string()));
        }

        if !self.tooltip_offset_px.is_finite() {
            return Err(OverlayError::Config("Tooltip offset must be finite".to_string()));
        }

        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            path: None,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/video-overlay/config.toml on Linux)
    /// 3. User config file (~/.config/video-overlay/config.toml on Linux)
    /// 4. Explicit config file, if given
    /// 5. Environment variables (VIDEO_OVERLAY_* prefix)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config.merge_from_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config.merge_from_file(&user_path)?;
            }
        }

        if let Some(path) = explicit {
            config.merge_from_file(path)?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| OverlayError::Config("Cannot determine user config path".to_string()))?;

        self.save_to(&path)
    }

    /// Save configuration to an arbitrary path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).config_err("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).config_err("Failed to serialize config")?;
        std::fs::write(path, toml).config_err("Failed to write config file")?;

        Ok(())
    }

    /// Merge configuration from a TOML file
    ///
    /// Values present in the file override the current ones; anything the
    /// file leaves out keeps its current value.
    pub fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).config_err("Failed to read config file")?;
        let overlay: toml::Table = toml::from_str(&contents).config_err("Failed to parse config file")?;

        let mut merged = toml::Value::try_from(&*self).config_err("Failed to serialize config")?;
        merge_values(&mut merged, toml::Value::Table(overlay));

        *self = merged.try_into().config_err("Failed to parse config file")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(step) = std::env::var("VIDEO_OVERLAY_SEEK_STEP") {
            self.controls.seek_step_secs = step.parse()
                .map_err(|_| OverlayError::Config("Invalid VIDEO_OVERLAY_SEEK_STEP".to_string()))?;
        }

        if let Ok(delay) = std::env::var("VIDEO_OVERLAY_HIDE_DELAY_MS") {
            self.controls.hide_delay_ms = delay.parse()
                .map_err(|_| OverlayError::Config("Invalid VIDEO_OVERLAY_HIDE_DELAY_MS".to_string()))?;
        }

        if let Ok(key) = std::env::var("VIDEO_OVERLAY_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Ok(log_level) = std::env::var("VIDEO_OVERLAY_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.controls.validate()?;

        if self.storage.key.is_empty() {
            return Err(OverlayError::Config("Storage key must not be empty".to_string()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(OverlayError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level,
                valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/video-overlay/config.toml"));

        #[cfg(target_os = "windows")]
        return std::env::var("PROGRAMDATA").ok()
            .map(|p| PathBuf::from(p).join("VideoOverlay").join("config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from("/Library/Application Support/VideoOverlay/config.toml"));

        #[allow(unreachable_code)]
        None
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("video-overlay").join("config.toml"))
    }
}

/// Deep-merge `overlay` into `base`; tables merge per key, anything else replaces
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
