//! Utility module for the video overlay
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Configuration management
//! - Time label formatting and clamping helpers

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, ControlsConfig, StorageConfig, GeneralConfig};
pub use error::{OverlayError, Result};

/// Initialize the application configuration
///
/// Loads configuration from defaults, the system and user configuration
/// files, an optional explicit file and environment variables.
pub fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    Config::load(explicit)
}

/// Format a playback position in seconds for the time labels
///
/// Produces `MM:SS`, truncating fractional seconds. Minutes are not folded
/// into hours, so an hour renders as `60:00`. Inputs that are not a finite,
/// non-negative number render as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let total_secs = seconds.floor() as u64;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}", minutes, seconds)
}

/// Clamp a value between min and max
///
/// # Arguments
///
/// * `value` - Value to clamp
/// * `min` - Minimum value
/// * `max` - Maximum value
///
/// # Returns
///
/// The clamped value
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
