//! Control surface
//!
//! The overlay's visual state: which icons show, what the labels read, how
//! wide the progress fill is and where the scrub tooltip sits. The
//! controller mutates this model; a host renders it (DOM, terminal, tests).

mod events;

pub use events::{ControlEvent, ControlEventKind, EventTarget};

use crate::utils::format_time;

/// Elements of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlElement {
    Container,
    RewindButton,
    PlayPauseButton,
    ForwardButton,
    ProgressTrack,
    ProgressFill,
    ScrubTooltip,
    ElapsedLabel,
    DurationLabel,
    MuteButton,
    VolumeSlider,
    FullscreenButton,
}

/// One built element of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    /// Which element
    pub element: ControlElement,

    /// CSS class
    pub class_name: &'static str,

    /// Hover title, if any
    pub title: Option<String>,

    /// Parent element (None for the container)
    pub parent: Option<ControlElement>,
}

/// Play/pause button icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    /// Media is paused, button offers to play
    Play,

    /// Media is playing, button offers to pause
    Pause,
}

impl PlayIcon {
    /// Icon for the given paused state
    pub fn for_paused(paused: bool) -> Self {
        if paused { PlayIcon::Play } else { PlayIcon::Pause }
    }

    /// Icon font class
    pub fn class(self) -> &'static str {
        match self {
            PlayIcon::Play => "fas fa-play",
            PlayIcon::Pause => "fas fa-pause",
        }
    }
}

/// Mute button icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Unmuted,
    Muted,
}

impl VolumeIcon {
    /// Icon for the muted flag
    ///
    /// Only the flag counts; a volume of zero without muting keeps the
    /// unmuted icon.
    pub fn for_muted(muted: bool) -> Self {
        if muted { VolumeIcon::Muted } else { VolumeIcon::Unmuted }
    }

    /// Icon font class
    pub fn class(self) -> &'static str {
        match self {
            VolumeIcon::Unmuted => "fas fa-volume-up",
            VolumeIcon::Muted => "fas fa-volume-mute",
        }
    }
}

/// Fullscreen button icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenIcon {
    Expand,
    Compress,
}

impl FullscreenIcon {
    /// Icon for the fullscreen state
    pub fn for_active(active: bool) -> Self {
        if active { FullscreenIcon::Compress } else { FullscreenIcon::Expand }
    }

    /// Icon font class
    pub fn class(self) -> &'static str {
        match self {
            FullscreenIcon::Expand => "fas fa-expand",
            FullscreenIcon::Compress => "fas fa-compress",
        }
    }
}

/// Volume slider with hover-reveal
///
/// Shown while the pointer is over the mute button or the slider itself.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSlider {
    /// Slider position (0.0 to 1.0)
    pub value: f64,

    /// Pointer over the mute button
    pub hovering_button: bool,

    /// Pointer over the slider
    pub hovering_slider: bool,
}

impl VolumeSlider {
    /// Whether the slider is revealed
    pub fn visible(&self) -> bool {
        self.hovering_button || self.hovering_slider
    }
}

/// Floating time label over the progress track
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubTooltip {
    /// Pointer is over the track
    pub visible: bool,

    /// Formatted position
    pub text: String,

    /// Left edge relative to the track
    pub left_px: f64,

    /// Track width from the last hover
    pub track_width: f64,
}

/// Visual state of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSurface {
    /// Built elements, in construction order
    layout: Vec<ElementSpec>,

    /// Controls shown (opacity 1) or hidden (opacity 0)
    pub visible: bool,

    pub play_icon: PlayIcon,
    pub volume_icon: VolumeIcon,
    pub fullscreen_icon: FullscreenIcon,

    /// Fullscreen button does something on this host
    pub fullscreen_available: bool,

    pub volume_slider: VolumeSlider,

    /// Width of the progress fill in percent
    pub progress_percent: f64,

    pub tooltip: ScrubTooltip,

    pub elapsed_label: String,
    pub duration_label: String,
}

impl ControlSurface {
    /// Build the overlay
    ///
    /// # Arguments
    ///
    /// * `seek_step_secs` - Step shown in the forward/rewind titles
    /// * `paused` - Initial paused state of the media
    /// * `muted` - Initial muted flag of the media
    /// * `volume` - Initial volume of the media
    pub fn build(seek_step_secs: f64, paused: bool, muted: bool, volume: f64) -> Self {
        use ControlElement as E;

        let step = format_step(seek_step_secs);
        let node = |element, class_name, title: Option<String>, parent| ElementSpec {
            element,
            class_name,
            title,
            parent,
        };

        let layout = vec![
            node(E::Container, "video-controls", None, None),
            node(E::RewindButton, "rewind", Some(format!("Rewind {} seconds", step)), Some(E::Container)),
            node(E::PlayPauseButton, "play-pause", None, Some(E::Container)),
            node(E::ForwardButton, "forward", Some(format!("Forward {} seconds", step)), Some(E::Container)),
            node(E::ProgressTrack, "progress-bar", None, Some(E::Container)),
            node(E::ProgressFill, "progress", None, Some(E::ProgressTrack)),
            node(E::ScrubTooltip, "time-indicator", None, Some(E::ProgressTrack)),
            node(E::ElapsedLabel, "current-time", None, Some(E::Container)),
            node(E::DurationLabel, "duration", None, Some(E::Container)),
            node(E::MuteButton, "mute", Some("Mute".to_string()), Some(E::Container)),
            node(E::VolumeSlider, "volume-slider", None, Some(E::Container)),
            node(E::FullscreenButton, "fullscreen", Some("Fullscreen".to_string()), Some(E::Container)),
        ];

        Self {
            layout,
            visible: true,
            play_icon: PlayIcon::for_paused(paused),
            volume_icon: VolumeIcon::for_muted(muted),
            fullscreen_icon: FullscreenIcon::Expand,
            fullscreen_available: false,
            volume_slider: VolumeSlider {
                value: volume,
                hovering_button: false,
                hovering_slider: false,
            },
            progress_percent: 0.0,
            tooltip: ScrubTooltip {
                visible: false,
                text: format_time(0.0),
                left_px: 0.0,
                track_width: 0.0,
            },
            elapsed_label: format_time(0.0),
            duration_label: format_time(0.0),
        }
    }

    /// Built elements, in construction order
    pub fn layout(&self) -> &[ElementSpec] {
        &self.layout
    }

    /// Look up a built element
    pub fn element(&self, element: ControlElement) -> Option<&ElementSpec> {
        self.layout.iter().find(|spec| spec.element == element)
    }

    /// Container opacity
    pub fn opacity(&self) -> f64 {
        if self.visible { 1.0 } else { 0.0 }
    }

    /// One-line text rendering, used by terminal hosts
    pub fn render_line(&self) -> String {
        const BAR_WIDTH: usize = 20;

        let filled = ((self.progress_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let bar: String = "#".repeat(filled) + &"-".repeat(BAR_WIDTH - filled);

        let play = match self.play_icon {
            PlayIcon::Play => ">",
            PlayIcon::Pause => "||",
        };
        let mute = match self.volume_icon {
            VolumeIcon::Unmuted => "vol",
            VolumeIcon::Muted => "muted",
        };
        let fullscreen = match self.fullscreen_icon {
            FullscreenIcon::Expand => "",
            FullscreenIcon::Compress => " [fullscreen]",
        };
        let tooltip = if self.tooltip.visible {
            format!(" <{} @{:.0}px>", self.tooltip.text, self.tooltip.left_px)
        } else {
            String::new()
        };
        let hidden = if self.visible { "" } else { " (hidden)" };

        format!(
            "[{}] {} / {} [{}]{} {} {:.2}{}{}",
            play,
            self.elapsed_label,
            self.duration_label,
            bar,
            tooltip,
            mute,
            self.volume_slider.value,
            fullscreen,
            hidden,
        )
    }
}

fn format_step(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{}", seconds)
    }
}
