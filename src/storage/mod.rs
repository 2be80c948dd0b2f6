//! Position persistence
//!
//! The playback position survives page loads through an origin-scoped
//! key-value store. The store itself is a port so tests and hosts can swap
//! in their own backend; [`PositionStore`] layers the single-key position
//! format on top of it.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::utils::error::Result;
use log::{debug, warn};

/// Durable string key-value storage with synchronous access
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Saved playback position, stored as a decimal string of seconds
pub struct PositionStore {
    /// Backend
    store: Box<dyn KeyValueStore>,

    /// Key the position lives under
    key: String,
}

impl PositionStore {
    /// Create a position store over `store` using `key`
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key the position lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the saved position
    ///
    /// Anything other than a finite, non-negative number means no saved position.
    /// The key is left in place after a successful read.
    pub fn load(&self) -> Option<f64> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read saved position: {}", e);
                return None;
            }
        };

        match raw.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Some(seconds),
            _ => {
                debug!("Ignoring unusable saved position {:?}", raw);
                None
            }
        }
    }

    /// Write the position, last writer wins
    ///
    /// Storage failures are logged and otherwise ignored.
    pub fn save(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            debug!("Not saving non-finite position {}", seconds);
            return;
        }

        let value = seconds.to_string();
        match self.store.set(&self.key, &value) {
            Ok(()) => debug!("Saved position {}s", value),
            Err(e) => warn!("Could not save position: {}", e),
        }
    }
}
