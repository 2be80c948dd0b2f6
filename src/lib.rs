//! Custom playback controls for a media element
//!
//! A [`player::PlaybackController`] wraps one media resource and owns the
//! overlay around it: play/pause, ten-second skips, a click-to-seek progress
//! track with a scrub tooltip, volume with hover-reveal, fullscreen, time
//! labels, auto-hiding on pointer inactivity and resuming where the viewer
//! left off. The browser pieces it depends on (the media element, storage,
//! the fullscreen API, the clock) are ports, so the controller runs the same
//! against a real host or against the simulated ones shipped here.

pub mod controls;
pub mod fullscreen;
pub mod media;
pub mod player;
pub mod storage;
pub mod utils;

pub use controls::{ControlEvent, ControlSurface};
pub use media::{MediaEvent, MediaResource};
pub use player::{PlaybackController, PlaybackControllerBuilder, SharedMedia};
pub use utils::error::{OverlayError, Result};
