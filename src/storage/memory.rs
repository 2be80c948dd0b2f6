//! In-memory key-value store
//!
//! Clones share the same map, so a host (or a test) can keep a handle and
//! observe what the controller wrote.

use crate::storage::KeyValueStore;
use crate::utils::error::{OverlayError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared in-memory store
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Rc::default(),
            available: true,
        }
    }

    /// A store that fails every access, like storage disabled by the browser
    pub fn unavailable() -> Self {
        Self {
            entries: Rc::default(),
            available: false,
        }
    }

    /// Peek at a stored value without going through the port
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(OverlayError::Storage("storage is unavailable".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
