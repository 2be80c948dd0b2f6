//! Playback controller module
//!
//! This module ties a media resource, the control surface, position
//! persistence and fullscreen together, and holds the pieces of logic the
//! controller is built from:
//! - time/position mapping for seeking, progress and the scrub tooltip
//! - the auto-hide state machine and the clock that drives it

mod clock;
mod controller;
pub mod timeline;
mod visibility;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{PlaybackController, PlaybackControllerBuilder, SharedMedia};
pub use visibility::{AutoHide, ControlsVisibility};
