//! In-process fullscreen host
//!
//! Tracks which element is fullscreen and queues a change notification on
//! every transition, including ones the user triggers outside the controls
//! (Escape key, browser chrome). Clones share state.

use crate::fullscreen::{FullscreenHost, FullscreenVendor};
use crate::utils::error::{OverlayError, Result};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct State {
    vendors: Vec<FullscreenVendor>,
    active: Option<String>,
    refuse_requests: bool,
    pending_changes: usize,
}

/// Simulated document fullscreen capability
#[derive(Debug, Clone)]
pub struct SimulatedFullscreen {
    state: Rc<RefCell<State>>,
}

impl SimulatedFullscreen {
    /// Host exposing only the standard API
    pub fn new() -> Self {
        Self::with_vendors(&[FullscreenVendor::Standard])
    }

    /// Host exposing exactly `vendors`
    pub fn with_vendors(vendors: &[FullscreenVendor]) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                vendors: vendors.to_vec(),
                ..State::default()
            })),
        }
    }

    /// Refuse subsequent requests (no user gesture, permissions policy)
    pub fn set_refuse_requests(&self, refuse: bool) {
        self.state.borrow_mut().refuse_requests = refuse;
    }

    /// Leave fullscreen without going through the controls
    pub fn exit_externally(&self) {
        let mut state = self.state.borrow_mut();
        if state.active.take().is_some() {
            state.pending_changes += 1;
        }
    }

    /// Id of the fullscreen element
    pub fn active_element(&self) -> Option<String> {
        self.state.borrow().active.clone()
    }

    /// Drain queued change notifications, returning how many fired
    pub fn take_changes(&self) -> usize {
        std::mem::take(&mut self.state.borrow_mut().pending_changes)
    }

    fn check_vendor(&self, vendor: FullscreenVendor) -> Result<()> {
        if self.supports(vendor) {
            Ok(())
        } else {
            Err(OverlayError::Fullscreen(format!(
                "{} is not available",
                vendor.request_method()
            )))
        }
    }
}

impl Default for SimulatedFullscreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FullscreenHost for SimulatedFullscreen {
    fn supports(&self, vendor: FullscreenVendor) -> bool {
        self.state.borrow().vendors.contains(&vendor)
    }

    fn request(&mut self, vendor: FullscreenVendor, element_id: &str) -> Result<()> {
        self.check_vendor(vendor)?;

        let mut state = self.state.borrow_mut();
        if state.refuse_requests {
            return Err(OverlayError::Fullscreen("request denied".to_string()));
        }

        if state.active.as_deref() != Some(element_id) {
            state.active = Some(element_id.to_string());
            state.pending_changes += 1;
        }
        Ok(())
    }

    fn exit(&mut self, vendor: FullscreenVendor) -> Result<()> {
        self.check_vendor(vendor)?;

        let mut state = self.state.borrow_mut();
        if state.active.take().is_some() {
            state.pending_changes += 1;
        }
        Ok(())
    }

    fn fullscreen_element(&self, vendor: FullscreenVendor) -> Option<String> {
        if self.supports(vendor) {
            self.state.borrow().active.clone()
        } else {
            None
        }
    }
}
