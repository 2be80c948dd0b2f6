//! Auto-hide of the controls on pointer inactivity
//!
//! Two states. Pointer movement inside the container shows the controls and
//! re-arms the timer; the timer expiring or the pointer leaving hides them.
//! Events are handled one at a time, so re-arming never races the expiry.

use std::time::{Duration, Instant};
use log::debug;

/// Controls visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsVisibility {
    Visible,
    Hidden,
}

/// Inactivity timer driving [`ControlsVisibility`]
#[derive(Debug, Clone)]
pub struct AutoHide {
    state: ControlsVisibility,
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoHide {
    /// Start visible with the timer armed from `now`
    pub fn new(now: Instant, delay: Duration) -> Self {
        Self {
            state: ControlsVisibility::Visible,
            delay,
            deadline: Some(now + delay),
        }
    }

    /// Current state
    pub fn state(&self) -> ControlsVisibility {
        self.state
    }

    /// Whether the controls are shown
    pub fn is_visible(&self) -> bool {
        self.state == ControlsVisibility::Visible
    }

    /// When the pending hide fires, if one is pending
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Pointer moved inside the container: show and re-arm
    pub fn pointer_moved(&mut self, now: Instant) {
        self.state = ControlsVisibility::Visible;
        self.deadline = Some(now + self.delay);
    }

    /// Pointer left the container: hide immediately and disarm
    pub fn pointer_left(&mut self) {
        self.state = ControlsVisibility::Hidden;
        self.deadline = None;
    }

    /// Fire the timer if it has expired; returns whether the state changed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let changed = self.state != ControlsVisibility::Hidden;
                self.state = ControlsVisibility::Hidden;
                if changed {
                    debug!("Hiding controls after {:?} of inactivity", self.delay);
                }
                changed
            }
            _ => false,
        }
    }
}
