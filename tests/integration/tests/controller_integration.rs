//! Integration tests for the playback controller
//!
//! These tests drive the controller the way a page would: user input goes
//! in as control events, the simulated media element answers with its own
//! notifications and the control surface is checked afterwards.

use anyhow::Result;
use std::time::Duration;

use video_overlay::controls::{ControlEvent, FullscreenIcon, PlayIcon, VolumeIcon};
use video_overlay::fullscreen::FullscreenVendor;
use video_overlay::media::MediaResource;
use video_overlay::player::ControlsVisibility;
use video_overlay::storage::MemoryStore;
use video_overlay::utils::config::ControlsConfig;
use video_overlay_integration_tests::{fullscreen_with, Harness};

#[test]
fn test_construction_state() -> Result<()> {
    let harness = Harness::new(100.0)?;

    assert!(harness.paused());
    assert_eq!(harness.current_time(), 0.0);
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Visible);

    let surface = harness.surface();
    assert!(surface.visible);
    assert_eq!(surface.play_icon, PlayIcon::Play);
    assert_eq!(surface.elapsed_label, "00:00");
    assert_eq!(surface.duration_label, "00:00");
    assert_eq!(surface.progress_percent, 0.0);
    assert!(!surface.volume_slider.visible());

    Ok(())
}

#[test]
fn test_metadata_sets_duration_label() -> Result<()> {
    let mut harness = Harness::new(125.0)?;
    harness.load_metadata();

    assert_eq!(harness.surface().duration_label, "02:05");
    Ok(())
}

#[test]
fn test_play_pause_toggle() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::PlayPauseClick);
    assert!(!harness.paused());
    assert_eq!(harness.surface().play_icon, PlayIcon::Pause);

    harness.control(ControlEvent::PlayPauseClick);
    assert!(harness.paused());
    assert_eq!(harness.surface().play_icon, PlayIcon::Play);

    Ok(())
}

#[test]
fn test_icon_follows_external_play_and_pause() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    // Media keys: the element changes state without touching the controls
    harness.media.borrow_mut().play()?;
    harness.pump();
    assert_eq!(harness.surface().play_icon, PlayIcon::Pause);

    harness.media.borrow_mut().pause();
    harness.pump();
    assert_eq!(harness.surface().play_icon, PlayIcon::Play);

    Ok(())
}

#[test]
fn test_public_play_and_pause() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.controller.play();
    harness.pump();
    assert!(!harness.paused());

    harness.controller.play();
    harness.pump();
    assert!(!harness.paused());

    harness.controller.pause();
    harness.pump();
    assert!(harness.paused());

    Ok(())
}

#[test]
fn test_rejected_play_is_silent() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    harness.media.borrow_mut().set_reject_play(true);

    harness.control(ControlEvent::PlayPauseClick);
    assert!(harness.paused());
    assert_eq!(harness.surface().play_icon, PlayIcon::Play);

    Ok(())
}

#[test]
fn test_forward_seek_clamps_to_duration() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    harness.set_current_time(95.0);

    harness.control(ControlEvent::ForwardClick);
    assert_eq!(harness.current_time(), 100.0);

    Ok(())
}

#[test]
fn test_forward_seek_steps_ten_seconds() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    harness.set_current_time(30.0);

    harness.control(ControlEvent::ForwardClick);
    assert_eq!(harness.current_time(), 40.0);
    assert_eq!(harness.surface().elapsed_label, "00:40");
    assert_eq!(harness.surface().progress_percent, 40.0);

    Ok(())
}

#[test]
fn test_zero_length_media() -> Result<()> {
    let mut harness = Harness::loaded(0.0)?;

    harness.control(ControlEvent::ForwardClick);
    assert_eq!(harness.current_time(), 0.0);
    assert_eq!(harness.surface().progress_percent, 0.0);
    assert_eq!(harness.surface().duration_label, "00:00");

    Ok(())
}

#[test]
fn test_rewind_clamps_to_zero() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    harness.set_current_time(5.0);

    harness.control(ControlEvent::RewindClick);
    assert_eq!(harness.current_time(), 0.0);

    Ok(())
}

#[test]
fn test_forward_seek_before_metadata() -> Result<()> {
    let mut harness = Harness::new(100.0)?;

    harness.control(ControlEvent::ForwardClick);
    let current = harness.current_time();
    assert!(!current.is_nan());
    assert_eq!(current, 10.0);
    assert_eq!(harness.surface().progress_percent, 0.0);

    Ok(())
}

#[test]
fn test_click_to_seek() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::ProgressClick { offset_x: 50.0, track_width: 200.0 });
    assert_eq!(harness.current_time(), 25.0);
    assert_eq!(harness.surface().progress_percent, 25.0);

    harness.control(ControlEvent::ProgressClick { offset_x: 260.0, track_width: 200.0 });
    assert_eq!(harness.current_time(), 100.0);

    Ok(())
}

#[test]
fn test_click_to_seek_without_duration_is_ignored() -> Result<()> {
    let mut harness = Harness::new(100.0)?;
    harness.set_current_time(12.0);

    harness.control(ControlEvent::ProgressClick { offset_x: 50.0, track_width: 200.0 });
    assert_eq!(harness.current_time(), 12.0);

    Ok(())
}

#[test]
fn test_progress_follows_playback() -> Result<()> {
    let mut harness = Harness::loaded(200.0)?;

    harness.control(ControlEvent::PlayPauseClick);
    harness.play_for(50.0);

    assert_eq!(harness.surface().progress_percent, 25.0);
    assert_eq!(harness.surface().elapsed_label, "00:50");

    Ok(())
}

#[test]
fn test_scrub_tooltip() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    harness.set_current_time(50.0);

    harness.control(ControlEvent::ProgressHover { track_width: 200.0 });
    let tooltip = &harness.surface().tooltip;
    assert!(tooltip.visible);
    assert_eq!(tooltip.text, "00:50");
    // fill ends at 100px; 50px label centred there, nudged 5px right
    assert_eq!(tooltip.left_px, 80.0);

    // follows playback while shown
    harness.set_current_time(100.0);
    let tooltip = &harness.surface().tooltip;
    assert_eq!(tooltip.text, "01:40");
    assert_eq!(tooltip.left_px, 150.0);

    harness.control(ControlEvent::ProgressLeave);
    assert!(!harness.surface().tooltip.visible);

    Ok(())
}

#[test]
fn test_scrub_tooltip_clamped_at_start() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::ProgressHover { track_width: 200.0 });
    assert_eq!(harness.surface().tooltip.left_px, 0.0);
    assert_eq!(harness.surface().tooltip.text, "00:00");

    Ok(())
}

#[test]
fn test_volume_slider() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::VolumeInput { value: 0.4 });
    assert_eq!(harness.volume(), 0.4);
    assert_eq!(harness.surface().volume_slider.value, 0.4);

    harness.control(ControlEvent::VolumeInput { value: 1.7 });
    assert_eq!(harness.volume(), 1.0);

    harness.control(ControlEvent::VolumeInput { value: f64::NAN });
    assert_eq!(harness.volume(), 1.0);

    Ok(())
}

#[test]
fn test_zero_volume_keeps_unmuted_icon() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::VolumeInput { value: 0.0 });
    assert_eq!(harness.volume(), 0.0);
    assert!(!harness.muted());
    assert_eq!(harness.surface().volume_icon, VolumeIcon::Unmuted);

    Ok(())
}

#[test]
fn test_mute_toggle_is_a_pure_flip() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    harness.control(ControlEvent::VolumeInput { value: 0.6 });

    harness.control(ControlEvent::MuteClick);
    assert!(harness.muted());
    assert_eq!(harness.volume(), 0.6);
    assert_eq!(harness.surface().volume_icon, VolumeIcon::Muted);

    harness.control(ControlEvent::MuteClick);
    assert!(!harness.muted());
    assert_eq!(harness.volume(), 0.6);
    assert_eq!(harness.surface().volume_icon, VolumeIcon::Unmuted);

    Ok(())
}

#[test]
fn test_volume_slider_hover_reveal() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::MuteButtonEnter);
    assert!(harness.surface().volume_slider.visible());

    // moving from the button onto the slider keeps it revealed
    harness.control(ControlEvent::VolumeSliderEnter);
    harness.control(ControlEvent::MuteButtonLeave);
    assert!(harness.surface().volume_slider.visible());

    harness.control(ControlEvent::VolumeSliderLeave);
    assert!(!harness.surface().volume_slider.visible());

    Ok(())
}

#[test]
fn test_auto_hide_after_inactivity() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Visible);

    harness.wait(Duration::from_millis(2999));
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Visible);

    harness.wait(Duration::from_millis(1));
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Hidden);
    assert!(!harness.surface().visible);
    assert_eq!(harness.surface().opacity(), 0.0);

    Ok(())
}

#[test]
fn test_movement_resets_inactivity_clock() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.wait(Duration::from_millis(2500));
    harness.control(ControlEvent::ContainerPointerMove);
    harness.wait(Duration::from_millis(2500));
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Visible);

    harness.wait(Duration::from_millis(500));
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Hidden);

    harness.control(ControlEvent::ContainerPointerMove);
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Visible);
    assert!(harness.surface().visible);

    Ok(())
}

#[test]
fn test_pointer_leave_hides_immediately() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::ContainerPointerLeave);
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Hidden);
    assert!(!harness.surface().visible);
    assert_eq!(harness.controller.next_timer_deadline(), None);

    Ok(())
}

#[test]
fn test_configured_hide_delay() -> Result<()> {
    let config = ControlsConfig { hide_delay_ms: 500, ..ControlsConfig::default() };
    let mut harness = Harness::with_parts(
        100.0,
        MemoryStore::new(),
        fullscreen_with(&[FullscreenVendor::Standard]),
        config,
    )?;

    harness.wait(Duration::from_millis(500));
    assert_eq!(harness.controller.visibility(), ControlsVisibility::Hidden);

    Ok(())
}

#[test]
fn test_fullscreen_targets_container() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;
    assert!(harness.surface().fullscreen_available);

    harness.control(ControlEvent::FullscreenClick);
    assert_eq!(harness.fullscreen.active_element().as_deref(), Some("video-container"));
    assert_eq!(harness.surface().fullscreen_icon, FullscreenIcon::Compress);

    harness.control(ControlEvent::FullscreenClick);
    assert_eq!(harness.fullscreen.active_element(), None);
    assert_eq!(harness.surface().fullscreen_icon, FullscreenIcon::Expand);

    Ok(())
}

#[test]
fn test_fullscreen_exit_via_escape() -> Result<()> {
    let mut harness = Harness::loaded(100.0)?;

    harness.control(ControlEvent::FullscreenClick);
    assert_eq!(harness.surface().fullscreen_icon, FullscreenIcon::Compress);

    harness.fullscreen.exit_externally();
    harness.pump();
    assert_eq!(harness.surface().fullscreen_icon, FullscreenIcon::Expand);

    // the next click enters again rather than trying to leave
    harness.control(ControlEvent::FullscreenClick);
    assert_eq!(harness.surface().fullscreen_icon, FullscreenIcon::Compress);

    Ok(())
}

#[test]
fn test_fullscreen_vendor_fallback() -> Result<()> {
    let harness = Harness::with_parts(
        100.0,
        MemoryStore::new(),
        fullscreen_with(&[FullscreenVendor::Moz]),
        ControlsConfig::default(),
    )?;

    assert_eq!(harness.controller.fullscreen_change_event(), Some("mozfullscreenchange"));
    Ok(())
}

#[test]
fn test_fullscreen_unsupported_is_inert() -> Result<()> {
    let mut harness = Harness::with_parts(
        100.0,
        MemoryStore::new(),
        fullscreen_with(&[]),
        ControlsConfig::default(),
    )?;

    assert!(!harness.surface().fullscreen_available);
    harness.control(ControlEvent::FullscreenClick);
    assert_eq!(harness.fullscreen.active_element(), None);
    assert_eq!(harness.surface().fullscreen_icon, FullscreenIcon::Expand);
    assert_eq!(harness.controller.fullscreen_change_event(), None);

    Ok(())
}
