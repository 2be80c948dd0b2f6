//! Integration test utilities for the video overlay
//!
//! This module provides a harness that stands in for the browser page:
//! - a simulated media element whose notifications are pumped into the controller
//! - shared in-memory storage that outlives a controller, like a page reload
//! - a manual clock for the inactivity timer
//! - a simulated fullscreen document

use anyhow::Result;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

use video_overlay::controls::{ControlEvent, ControlSurface};
use video_overlay::fullscreen::{FullscreenVendor, SimulatedFullscreen};
use video_overlay::media::{MediaResource, SimulatedMedia};
use video_overlay::player::{ManualClock, PlaybackController};
use video_overlay::storage::{FileStore, KeyValueStore, MemoryStore};
use video_overlay::utils::config::{ControlsConfig, DEFAULT_STORAGE_KEY};

/// Page hosting one controller
pub struct Harness {
    pub media: Rc<RefCell<SimulatedMedia>>,
    pub store: MemoryStore,
    pub clock: ManualClock,
    pub fullscreen: SimulatedFullscreen,
    pub controller: PlaybackController,
    length: f64,
    config: ControlsConfig,
}

impl Harness {
    /// Page with a video of `length` seconds whose metadata has not loaded yet
    pub fn new(length: f64) -> Result<Self> {
        Self::with_parts(length, MemoryStore::new(), SimulatedFullscreen::new(), ControlsConfig::default())
    }

    /// Page with a video whose metadata has loaded
    pub fn loaded(length: f64) -> Result<Self> {
        let mut harness = Self::new(length)?;
        harness.load_metadata();
        Ok(harness)
    }

    /// Page built from explicit parts
    pub fn with_parts(
        length: f64,
        store: MemoryStore,
        fullscreen: SimulatedFullscreen,
        config: ControlsConfig,
    ) -> Result<Self> {
        let media = Rc::new(RefCell::new(SimulatedMedia::new(length)));
        let clock = ManualClock::new();

        let controller = PlaybackController::builder(media.clone())
            .with_config(config.clone())
            .with_storage(Box::new(store.clone()))
            .with_fullscreen_host(Box::new(fullscreen.clone()))
            .with_clock(Box::new(clock.clone()))
            .build()?;

        let mut harness = Self {
            media,
            store,
            clock,
            fullscreen,
            controller,
            length,
            config,
        };
        harness.pump();
        Ok(harness)
    }

    /// Reload the page: fresh media element and controller, same storage
    pub fn reload(self) -> Result<Self> {
        Self::with_parts(self.length, self.store, self.fullscreen, self.config)
    }

    /// Deliver queued media and fullscreen notifications
    pub fn pump(&mut self) {
        loop {
            let events = self.media.borrow_mut().take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.controller.handle_media_event(event);
            }
        }

        for _ in 0..self.fullscreen.take_changes() {
            self.controller.handle_control_event(ControlEvent::FullscreenChange);
        }
    }

    /// Make the duration known
    pub fn load_metadata(&mut self) {
        self.media.borrow_mut().load_metadata();
        self.pump();
    }

    /// Send a user input event and deliver whatever it caused
    pub fn control(&mut self, event: ControlEvent) {
        self.controller.handle_control_event(event);
        self.pump();
    }

    /// Let the media play for `seconds`
    pub fn play_for(&mut self, seconds: f64) {
        self.media.borrow_mut().advance(seconds);
        self.pump();
    }

    /// Let wall time pass for the inactivity timer
    pub fn wait(&mut self, by: Duration) {
        self.clock.advance(by);
        self.controller.tick();
    }

    /// Seek the media from outside the controls
    pub fn set_current_time(&mut self, seconds: f64) {
        self.media.borrow_mut().set_current_time(seconds);
        self.pump();
    }

    pub fn current_time(&self) -> f64 {
        self.media.borrow().current_time()
    }

    pub fn paused(&self) -> bool {
        self.media.borrow().paused()
    }

    pub fn muted(&self) -> bool {
        self.media.borrow().muted()
    }

    pub fn volume(&self) -> f64 {
        self.media.borrow().volume()
    }

    pub fn surface(&self) -> &ControlSurface {
        self.controller.surface()
    }

    /// Raw value under the position key
    pub fn saved_position(&self) -> Option<String> {
        self.store.value(DEFAULT_STORAGE_KEY)
    }

    /// Write the position key directly, as an earlier page would have
    pub fn seed_position(&mut self, value: &str) -> Result<()> {
        self.store.set(DEFAULT_STORAGE_KEY, value)?;
        Ok(())
    }
}

/// Fullscreen document exposing only the given vendor APIs
pub fn fullscreen_with(vendors: &[FullscreenVendor]) -> SimulatedFullscreen {
    SimulatedFullscreen::with_vendors(vendors)
}

/// Test fixture for tests that touch the filesystem
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty temporary directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Open a file store inside the fixture
    pub fn file_store(&self, name: &str) -> Result<FileStore> {
        Ok(FileStore::open(self.path().join(name))?)
    }
}
