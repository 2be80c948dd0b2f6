//! Media resource port
//!
//! The controller never owns the media element; the host page does. This
//! module describes the slice of the element the controller drives and the
//! lifecycle notifications it reacts to.

mod simulated;

pub use simulated::SimulatedMedia;

use crate::utils::error::Result;

/// Media-playable resource driven by the controller
pub trait MediaResource {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Total length in seconds, NaN until metadata has loaded
    fn duration(&self) -> f64;

    /// Whether playback is paused
    fn paused(&self) -> bool;

    /// Request playback start
    ///
    /// Hosts may reject the request (autoplay policy, no source).
    fn play(&mut self) -> Result<()>;

    /// Request playback stop
    fn pause(&mut self);

    /// Whether audio is muted
    fn muted(&self) -> bool;

    /// Set the muted flag without touching the volume
    fn set_muted(&mut self, muted: bool);

    /// Volume level (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set the volume level
    fn set_volume(&mut self, volume: f64);

    /// Duration, if metadata has loaded and it is usable for arithmetic
    fn known_duration(&self) -> Option<f64> {
        let duration = self.duration();
        if duration.is_finite() && duration >= 0.0 {
            Some(duration)
        } else {
            None
        }
    }
}

/// Lifecycle notification emitted by a media resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// Playback started or resumed
    Play,

    /// Playback paused
    Pause,

    /// End of media reached
    Ended,

    /// Playback position changed
    TimeUpdate,

    /// Duration became known
    LoadedMetadata,
}

impl MediaEvent {
    /// Every event the controller listens for
    pub const ALL: [MediaEvent; 5] = [
        MediaEvent::Play,
        MediaEvent::Pause,
        MediaEvent::Ended,
        MediaEvent::TimeUpdate,
        MediaEvent::LoadedMetadata,
    ];

    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::Ended => "ended",
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::LoadedMetadata => "loadedmetadata",
        }
    }

    /// Parse a DOM event name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|event| event.name() == name)
    }
}
