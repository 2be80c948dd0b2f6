//! Error types for the video overlay
//!
//! The controller itself never surfaces errors to the embedding page: port
//! failures are logged and degrade to no-ops. These types describe what went
//! wrong inside the ports and the configuration layer.

use thiserror::Error;

/// Main error type for the video overlay
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Fullscreen API errors
    #[error("Fullscreen error: {0}")]
    Fullscreen(String),

    /// Media resource errors (e.g. a rejected play request)
    #[error("Media error: {0}")]
    Media(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results in the video overlay
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Extension trait for converting other errors to OverlayError
pub trait IntoOverlayError<T> {
    /// Convert this error into an OverlayError with the given context
    fn storage_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoOverlayError<T> for std::result::Result<T, E> {
    fn storage_err(self, context: &str) -> Result<T> {
        self.map_err(|e| OverlayError::Storage(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| OverlayError::Config(format!("{}: {}", context, e)))
    }
}
