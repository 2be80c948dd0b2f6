//! Control events
//!
//! User input arriving from the control surface, the video container, the
//! document and the window, already reduced to the values the controller
//! needs (offsets, widths, slider values).

use crate::controls::ControlElement;

/// Input event delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Play/pause button clicked
    PlayPauseClick,

    /// Forward button clicked
    ForwardClick,

    /// Rewind button clicked
    RewindClick,

    /// Progress track clicked at `offset_x` pixels from its left edge
    ProgressClick { offset_x: f64, track_width: f64 },

    /// Pointer moving over the progress track
    ProgressHover { track_width: f64 },

    /// Pointer left the progress track
    ProgressLeave,

    /// Volume slider moved
    VolumeInput { value: f64 },

    /// Mute button clicked
    MuteClick,

    /// Pointer entered the mute button
    MuteButtonEnter,

    /// Pointer left the mute button
    MuteButtonLeave,

    /// Pointer entered the volume slider
    VolumeSliderEnter,

    /// Pointer left the volume slider
    VolumeSliderLeave,

    /// Fullscreen button clicked
    FullscreenClick,

    /// Document reported a fullscreen transition
    FullscreenChange,

    /// Pointer moved inside the video container
    ContainerPointerMove,

    /// Pointer left the video container
    ContainerPointerLeave,

    /// Page is being unloaded
    PageUnload,
}

/// Payload-free event discriminant, used as the handler table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEventKind {
    PlayPauseClick,
    ForwardClick,
    RewindClick,
    ProgressClick,
    ProgressHover,
    ProgressLeave,
    VolumeInput,
    MuteClick,
    MuteButtonEnter,
    MuteButtonLeave,
    VolumeSliderEnter,
    VolumeSliderLeave,
    FullscreenClick,
    FullscreenChange,
    ContainerPointerMove,
    ContainerPointerLeave,
    PageUnload,
}

/// Where a control event is listened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// One of the overlay's own elements
    Element(ControlElement),

    /// The element wrapping the video and the overlay
    VideoContainer,

    /// The document
    Document,

    /// The window
    Window,
}

impl ControlEvent {
    /// Table key for this event
    pub fn kind(&self) -> ControlEventKind {
        match self {
            ControlEvent::PlayPauseClick => ControlEventKind::PlayPauseClick,
            ControlEvent::ForwardClick => ControlEventKind::ForwardClick,
            ControlEvent::RewindClick => ControlEventKind::RewindClick,
            ControlEvent::ProgressClick { .. } => ControlEventKind::ProgressClick,
            ControlEvent::ProgressHover { .. } => ControlEventKind::ProgressHover,
            ControlEvent::ProgressLeave => ControlEventKind::ProgressLeave,
            ControlEvent::VolumeInput { .. } => ControlEventKind::VolumeInput,
            ControlEvent::MuteClick => ControlEventKind::MuteClick,
            ControlEvent::MuteButtonEnter => ControlEventKind::MuteButtonEnter,
            ControlEvent::MuteButtonLeave => ControlEventKind::MuteButtonLeave,
            ControlEvent::VolumeSliderEnter => ControlEventKind::VolumeSliderEnter,
            ControlEvent::VolumeSliderLeave => ControlEventKind::VolumeSliderLeave,
            ControlEvent::FullscreenClick => ControlEventKind::FullscreenClick,
            ControlEvent::FullscreenChange => ControlEventKind::FullscreenChange,
            ControlEvent::ContainerPointerMove => ControlEventKind::ContainerPointerMove,
            ControlEvent::ContainerPointerLeave => ControlEventKind::ContainerPointerLeave,
            ControlEvent::PageUnload => ControlEventKind::PageUnload,
        }
    }
}

impl ControlEventKind {
    /// Every event the controller listens for
    pub const ALL: [ControlEventKind; 17] = [
        ControlEventKind::PlayPauseClick,
        ControlEventKind::ForwardClick,
        ControlEventKind::RewindClick,
        ControlEventKind::ProgressClick,
        ControlEventKind::ProgressHover,
        ControlEventKind::ProgressLeave,
        ControlEventKind::VolumeInput,
        ControlEventKind::MuteClick,
        ControlEventKind::MuteButtonEnter,
        ControlEventKind::MuteButtonLeave,
        ControlEventKind::VolumeSliderEnter,
        ControlEventKind::VolumeSliderLeave,
        ControlEventKind::FullscreenClick,
        ControlEventKind::FullscreenChange,
        ControlEventKind::ContainerPointerMove,
        ControlEventKind::ContainerPointerLeave,
        ControlEventKind::PageUnload,
    ];

    /// Element (or global) the listener is attached to
    pub fn target(self) -> EventTarget {
        use ControlElement as E;
        match self {
            ControlEventKind::PlayPauseClick => EventTarget::Element(E::PlayPauseButton),
            ControlEventKind::ForwardClick => EventTarget::Element(E::ForwardButton),
            ControlEventKind::RewindClick => EventTarget::Element(E::RewindButton),
            ControlEventKind::ProgressClick
            | ControlEventKind::ProgressHover
            | ControlEventKind::ProgressLeave => EventTarget::Element(E::ProgressTrack),
            ControlEventKind::VolumeInput
            | ControlEventKind::VolumeSliderEnter
            | ControlEventKind::VolumeSliderLeave => EventTarget::Element(E::VolumeSlider),
            ControlEventKind::MuteClick
            | ControlEventKind::MuteButtonEnter
            | ControlEventKind::MuteButtonLeave => EventTarget::Element(E::MuteButton),
            ControlEventKind::FullscreenClick => EventTarget::Element(E::FullscreenButton),
            ControlEventKind::FullscreenChange => EventTarget::Document,
            ControlEventKind::ContainerPointerMove
            | ControlEventKind::ContainerPointerLeave => EventTarget::VideoContainer,
            ControlEventKind::PageUnload => EventTarget::Window,
        }
    }

    /// DOM event name
    ///
    /// The fullscreen change notification is reported under its standard
    /// name; hosts listen under the adapter's vendor name instead.
    pub fn dom_event(self) -> &'static str {
        match self {
            ControlEventKind::PlayPauseClick
            | ControlEventKind::ForwardClick
            | ControlEventKind::RewindClick
            | ControlEventKind::ProgressClick
            | ControlEventKind::MuteClick
            | ControlEventKind::FullscreenClick => "click",
            ControlEventKind::ProgressHover | ControlEventKind::ContainerPointerMove => "mousemove",
            ControlEventKind::MuteButtonEnter | ControlEventKind::VolumeSliderEnter => "mouseenter",
            ControlEventKind::ProgressLeave
            | ControlEventKind::MuteButtonLeave
            | ControlEventKind::VolumeSliderLeave
            | ControlEventKind::ContainerPointerLeave => "mouseleave",
            ControlEventKind::VolumeInput => "input",
            ControlEventKind::FullscreenChange => "fullscreenchange",
            ControlEventKind::PageUnload => "beforeunload",
        }
    }
}
