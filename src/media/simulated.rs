//! In-process media resource
//!
//! Behaves like a browser media element without decoding anything: time
//! advances only when the host calls [`SimulatedMedia::advance`], and every
//! state change queues the notification a real element would dispatch. The
//! host drains the queue and hands the events to the controller, which
//! mirrors the browser's run-to-completion event loop.

use crate::media::{MediaEvent, MediaResource};
use crate::utils::error::{OverlayError, Result};
use std::collections::VecDeque;
use log::debug;

/// Simulated media element
#[derive(Debug)]
pub struct SimulatedMedia {
    /// Length reported once metadata is loaded
    length: f64,

    /// Whether metadata has loaded
    metadata_loaded: bool,

    /// Current position in seconds
    current_time: f64,

    /// Paused state
    paused: bool,

    /// Muted state
    muted: bool,

    /// Volume level (0.0 to 1.0)
    volume: f64,

    /// Reject play requests (autoplay policy)
    reject_play: bool,

    /// Notifications not yet dispatched
    pending: VecDeque<MediaEvent>,
}

impl SimulatedMedia {
    /// Create a paused element whose metadata reports `length` seconds once loaded
    pub fn new(length: f64) -> Self {
        Self {
            length,
            metadata_loaded: false,
            current_time: 0.0,
            paused: true,
            muted: false,
            volume: 1.0,
            reject_play: false,
            pending: VecDeque::new(),
        }
    }

    /// Make the duration known and queue `loadedmetadata`
    pub fn load_metadata(&mut self) {
        if self.metadata_loaded {
            return;
        }
        self.metadata_loaded = true;
        self.current_time = self.current_time.min(self.length);
        self.pending.push_back(MediaEvent::LoadedMetadata);
    }

    /// Reject subsequent play requests
    pub fn set_reject_play(&mut self, reject: bool) {
        self.reject_play = reject;
    }

    /// Advance playback by `seconds` of wall time
    ///
    /// Reaching the end pauses the element and queues `timeupdate`, `pause`
    /// and `ended`, in the order a browser dispatches them.
    pub fn advance(&mut self, seconds: f64) {
        if self.paused || !self.metadata_loaded || seconds <= 0.0 {
            return;
        }

        self.current_time += seconds;
        if self.current_time >= self.length {
            self.current_time = self.length;
            self.paused = true;
            self.pending.push_back(MediaEvent::TimeUpdate);
            self.pending.push_back(MediaEvent::Pause);
            self.pending.push_back(MediaEvent::Ended);
        } else {
            self.pending.push_back(MediaEvent::TimeUpdate);
        }
    }

    /// Whether playback sits at the end of the media
    pub fn is_ended(&self) -> bool {
        self.metadata_loaded && self.current_time >= self.length
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<MediaEvent> {
        self.pending.drain(..).collect()
    }

    /// Whether notifications are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl MediaResource for SimulatedMedia {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            debug!("Ignoring non-finite seek target {}", seconds);
            return;
        }

        let upper = if self.metadata_loaded { self.length } else { f64::INFINITY };
        self.current_time = seconds.clamp(0.0, upper);
        self.pending.push_back(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        if self.metadata_loaded {
            self.length
        } else {
            f64::NAN
        }
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) -> Result<()> {
        if self.reject_play {
            return Err(OverlayError::Media("play() request was rejected".to_string()));
        }

        if !self.paused {
            return Ok(());
        }

        if self.is_ended() {
            self.current_time = 0.0;
            self.pending.push_back(MediaEvent::TimeUpdate);
        }

        self.paused = false;
        self.pending.push_back(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.pending.push_back(MediaEvent::Pause);
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}
