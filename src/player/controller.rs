//! Playback controller implementation
//!
//! Wires one media resource to the control surface. All behaviour is a
//! reaction to an event: media lifecycle notifications come in through
//! [`PlaybackController::handle_media_event`], user input through
//! [`PlaybackController::handle_control_event`] and the inactivity timer
//! through [`PlaybackController::tick`]. Each handler runs to completion
//! before the host dispatches the next event.

use crate::controls::{ControlEvent, ControlEventKind, ControlSurface, FullscreenIcon, PlayIcon, VolumeIcon};
use crate::fullscreen::{FullscreenAdapter, FullscreenHost};
use crate::media::{MediaEvent, MediaResource};
use crate::player::clock::{Clock, SystemClock};
use crate::player::timeline;
use crate::player::visibility::{AutoHide, ControlsVisibility};
use crate::storage::{KeyValueStore, MemoryStore, PositionStore};
use crate::utils::config::{Config, ControlsConfig, DEFAULT_STORAGE_KEY};
use crate::utils::error::Result;
use crate::utils::{clamp, format_time};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;
use log::{debug, info, warn};

/// Media resource shared between the host page and the controller
pub type SharedMedia = Rc<RefCell<dyn MediaResource>>;

type MediaHandler = fn(&mut PlaybackController);
type ControlHandler = fn(&mut PlaybackController, ControlEvent);

/// Builder for [`PlaybackController`]
pub struct PlaybackControllerBuilder {
    media: SharedMedia,
    config: ControlsConfig,
    storage_key: String,
    store: Option<Box<dyn KeyValueStore>>,
    fullscreen_host: Option<Box<dyn FullscreenHost>>,
    clock: Option<Box<dyn Clock>>,
}

impl PlaybackControllerBuilder {
    /// Start a builder around `media`
    pub fn new(media: SharedMedia) -> Self {
        Self {
            media,
            config: ControlsConfig::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            store: None,
            fullscreen_host: None,
            clock: None,
        }
    }

    /// Take control settings and the storage key from an application config
    pub fn with_app_config(mut self, config: &Config) -> Self {
        self.config = config.controls.clone();
        self.storage_key = config.storage.key.clone();
        self
    }

    /// Set control configuration
    pub fn with_config(mut self, config: ControlsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key the position is stored under
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the position storage backend (default: in-memory)
    pub fn with_storage(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the document fullscreen capability (default: none, button inert)
    pub fn with_fullscreen_host(mut self, host: Box<dyn FullscreenHost>) -> Self {
        self.fullscreen_host = Some(host);
        self
    }

    /// Set the clock driving the inactivity timer (default: system clock)
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the controller
    pub fn build(self) -> Result<PlaybackController> {
        PlaybackController::new_with_builder(self)
    }
}

/// Custom controls for one media resource
pub struct PlaybackController {
    media: SharedMedia,
    positions: PositionStore,
    fullscreen: FullscreenAdapter,
    clock: Box<dyn Clock>,
    config: ControlsConfig,
    surface: ControlSurface,
    auto_hide: AutoHide,
    media_handlers: HashMap<MediaEvent, MediaHandler>,
    control_handlers: HashMap<ControlEventKind, ControlHandler>,
}

impl PlaybackController {
    /// Start building a controller around `media`
    pub fn builder(media: SharedMedia) -> PlaybackControllerBuilder {
        PlaybackControllerBuilder::new(media)
    }

    /// Controller with default configuration, in-memory storage and no fullscreen
    pub fn new(media: SharedMedia) -> Result<Self> {
        PlaybackControllerBuilder::new(media).build()
    }

    fn new_with_builder(builder: PlaybackControllerBuilder) -> Result<Self> {
        builder.config.validate()?;

        let surface = {
            let media = builder.media.borrow();
            ControlSurface::build(
                builder.config.seek_step_secs,
                media.paused(),
                media.muted(),
                media.volume(),
            )
        };

        let store = builder.store.unwrap_or_else(|| Box::new(MemoryStore::new()));
        let fullscreen = match builder.fullscreen_host {
            Some(host) => FullscreenAdapter::detect(host),
            None => FullscreenAdapter::unsupported(),
        };
        let clock = builder.clock.unwrap_or_else(|| Box::new(SystemClock));
        let auto_hide = AutoHide::new(clock.now(), builder.config.hide_delay());

        let mut controller = Self {
            media: builder.media,
            positions: PositionStore::new(store, builder.storage_key),
            fullscreen,
            clock,
            config: builder.config,
            surface,
            auto_hide,
            media_handlers: Self::media_bindings().into_iter().collect(),
            control_handlers: Self::control_bindings().into_iter().collect(),
        };

        controller.surface.fullscreen_available = controller.fullscreen.is_supported();
        controller.refresh_fullscreen_icon();
        controller.restore_position();
        controller.refresh_duration_label();
        controller.refresh_progress();

        info!(
            "Playback controls ready (seek step {}s, hide after {}ms)",
            controller.config.seek_step_secs, controller.config.hide_delay_ms
        );

        Ok(controller)
    }

    fn media_bindings() -> [(MediaEvent, MediaHandler); 5] {
        [
            (MediaEvent::Play, Self::on_play),
            (MediaEvent::Pause, Self::on_pause),
            (MediaEvent::Ended, Self::on_ended),
            (MediaEvent::TimeUpdate, Self::on_time_update),
            (MediaEvent::LoadedMetadata, Self::on_loaded_metadata),
        ]
    }

    fn control_bindings() -> [(ControlEventKind, ControlHandler); 17] {
        use ControlEventKind as K;
        [
            (K::PlayPauseClick, |c, _| c.toggle_play_pause()),
            (K::ForwardClick, |c, _| c.seek_forward()),
            (K::RewindClick, |c, _| c.seek_backward()),
            (K::ProgressClick, |c, event| {
                if let ControlEvent::ProgressClick { offset_x, track_width } = event {
                    c.seek_from_click(offset_x, track_width);
                }
            }),
            (K::ProgressHover, |c, event| {
                if let ControlEvent::ProgressHover { track_width } = event {
                    c.show_tooltip(track_width);
                }
            }),
            (K::ProgressLeave, |c, _| c.surface.tooltip.visible = false),
            (K::VolumeInput, |c, event| {
                if let ControlEvent::VolumeInput { value } = event {
                    c.set_volume(value);
                }
            }),
            (K::MuteClick, |c, _| c.toggle_mute()),
            (K::MuteButtonEnter, |c, _| c.surface.volume_slider.hovering_button = true),
            (K::MuteButtonLeave, |c, _| c.surface.volume_slider.hovering_button = false),
            (K::VolumeSliderEnter, |c, _| c.surface.volume_slider.hovering_slider = true),
            (K::VolumeSliderLeave, |c, _| c.surface.volume_slider.hovering_slider = false),
            (K::FullscreenClick, |c, _| c.toggle_fullscreen()),
            (K::FullscreenChange, |c, _| c.refresh_fullscreen_icon()),
            (K::ContainerPointerMove, |c, _| c.pointer_moved()),
            (K::ContainerPointerLeave, |c, _| c.pointer_left()),
            (K::PageUnload, |c, _| c.save_position()),
        ]
    }

    /// Dispatch a media lifecycle notification
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if let Some(handler) = self.media_handlers.get(&event).copied() {
            debug!("Media event: {}", event.name());
            handler(self);
        }
    }

    /// Dispatch a media notification by DOM name; unknown names are ignored
    pub fn handle_media_event_named(&mut self, name: &str) -> bool {
        match MediaEvent::from_name(name) {
            Some(event) => {
                self.handle_media_event(event);
                true
            }
            None => false,
        }
    }

    /// Dispatch a user input event
    pub fn handle_control_event(&mut self, event: ControlEvent) {
        if let Some(handler) = self.control_handlers.get(&event.kind()).copied() {
            debug!("Control event: {:?}", event);
            handler(self, event);
        }
    }

    /// Fire the inactivity timer if it has expired; returns whether visibility changed
    pub fn tick(&mut self) -> bool {
        let changed = self.auto_hide.poll(self.clock.now());
        if changed {
            self.surface.visible = self.auto_hide.is_visible();
        }
        changed
    }

    /// When the inactivity timer fires next, if armed
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.auto_hide.deadline()
    }

    /// Request playback start
    pub fn play(&mut self) {
        if let Err(e) = self.media.borrow_mut().play() {
            warn!("Play request failed: {}", e);
        }
    }

    /// Request playback stop
    pub fn pause(&mut self) {
        self.media.borrow_mut().pause();
    }

    /// Play if paused, pause otherwise
    pub fn toggle_play_pause(&mut self) {
        let paused = self.media.borrow().paused();
        if paused {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Skip forward by the configured step
    pub fn seek_forward(&mut self) {
        self.seek_by(self.config.seek_step_secs);
    }

    /// Skip back by the configured step
    pub fn seek_backward(&mut self) {
        self.seek_by(-self.config.seek_step_secs);
    }

    /// Move the position by `delta` seconds, clamped to the media bounds
    pub fn seek_by(&mut self, delta: f64) {
        let mut media = self.media.borrow_mut();
        let target = timeline::seek_target(media.current_time(), delta, media.known_duration());
        debug!("Seeking by {}s to {}s", delta, target);
        media.set_current_time(target);
    }

    /// Seek to the point of the track that was clicked
    ///
    /// Does nothing while the duration is unknown.
    pub fn seek_from_click(&mut self, offset_x: f64, track_width: f64) {
        let mut media = self.media.borrow_mut();
        match timeline::click_target(offset_x, track_width, media.known_duration()) {
            Some(target) => {
                debug!("Track click at {}/{}px, seeking to {}s", offset_x, track_width, target);
                media.set_current_time(target);
            }
            None => debug!("Ignoring track click, duration or track width unknown"),
        }
    }

    /// Set the volume from the slider
    pub fn set_volume(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let volume = clamp(value, 0.0, 1.0);
        self.media.borrow_mut().set_volume(volume);
        self.surface.volume_slider.value = volume;
        self.refresh_volume_icon();
    }

    /// Flip the muted flag, leaving the volume alone
    pub fn toggle_mute(&mut self) {
        {
            let mut media = self.media.borrow_mut();
            let muted = !media.muted();
            media.set_muted(muted);
        }
        self.refresh_volume_icon();
    }

    /// Enter or leave fullscreen on the container
    ///
    /// The icon follows the document's change notification, not this call.
    pub fn toggle_fullscreen(&mut self) {
        let container_id = self.config.container_id.clone();
        if !self.fullscreen.toggle(&container_id) {
            debug!("Fullscreen toggle had no effect");
        }
    }

    /// Persist the current position
    pub fn save_position(&mut self) {
        let current = self.media.borrow().current_time();
        self.positions.save(current);
    }

    /// Visual state
    pub fn surface(&self) -> &ControlSurface {
        &self.surface
    }

    /// Auto-hide state
    pub fn visibility(&self) -> ControlsVisibility {
        self.auto_hide.state()
    }

    /// Fullscreen change notification the host should forward, if any
    pub fn fullscreen_change_event(&self) -> Option<&'static str> {
        self.fullscreen.change_event()
    }

    /// Control configuration in use
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    fn restore_position(&mut self) {
        if let Some(saved) = self.positions.load() {
            info!("Resuming at {}s", saved);
            self.media.borrow_mut().set_current_time(saved);
        }
    }

    fn on_play(&mut self) {
        self.refresh_play_icon();
    }

    fn on_pause(&mut self) {
        self.refresh_play_icon();
        self.save_position();
    }

    fn on_ended(&mut self) {
        self.refresh_play_icon();
        self.positions.save(0.0);
    }

    fn on_time_update(&mut self) {
        self.refresh_progress();
    }

    fn on_loaded_metadata(&mut self) {
        self.refresh_duration_label();
        self.refresh_progress();
    }

    fn pointer_moved(&mut self) {
        self.auto_hide.pointer_moved(self.clock.now());
        self.surface.visible = true;
    }

    fn pointer_left(&mut self) {
        self.auto_hide.pointer_left();
        self.surface.visible = false;
    }

    fn show_tooltip(&mut self, track_width: f64) {
        self.surface.tooltip.visible = true;
        self.surface.tooltip.track_width = track_width;
        self.refresh_tooltip();
    }

    fn refresh_play_icon(&mut self) {
        self.surface.play_icon = PlayIcon::for_paused(self.media.borrow().paused());
    }

    fn refresh_volume_icon(&mut self) {
        self.surface.volume_icon = VolumeIcon::for_muted(self.media.borrow().muted());
    }

    fn refresh_fullscreen_icon(&mut self) {
        self.surface.fullscreen_icon = FullscreenIcon::for_active(self.fullscreen.is_active());
    }

    fn refresh_duration_label(&mut self) {
        if let Some(duration) = self.media.borrow().known_duration() {
            self.surface.duration_label = format_time(duration);
        }
    }

    fn refresh_progress(&mut self) {
        let (current, duration) = self.timeline_snapshot();
        self.surface.progress_percent = timeline::progress_ratio(current, duration) * 100.0;
        self.surface.elapsed_label = format_time(current);

        if self.surface.tooltip.visible {
            self.refresh_tooltip();
        }
    }

    fn refresh_tooltip(&mut self) {
        let (current, duration) = self.timeline_snapshot();
        let track_width = self.surface.tooltip.track_width;
        let filled_width = timeline::progress_ratio(current, duration) * track_width;

        self.surface.tooltip.left_px = timeline::tooltip_left(
            track_width,
            filled_width,
            self.config.tooltip_label_width_px,
            self.config.tooltip_offset_px,
        );
        self.surface.tooltip.text = format_time(current);
    }

    fn timeline_snapshot(&self) -> (f64, Option<f64>) {
        let media = self.media.borrow();
        (media.current_time(), media.known_duration())
    }
}
