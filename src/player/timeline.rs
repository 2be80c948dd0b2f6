//! Time/position mapping
//!
//! Pure functions shared by the seek buttons, the progress track and the
//! scrub tooltip. None of them ever yields NaN for a position the media
//! element would be asked to seek to.

use crate::utils::clamp;

/// Target of a relative seek
///
/// The result is never negative and never past a known duration. With an
/// unknown duration there is no upper clamp. A non-finite current time is
/// treated as the start of the media.
pub fn seek_target(current: f64, delta: f64, duration: Option<f64>) -> f64 {
    let current = if current.is_finite() { current } else { 0.0 };
    let target = current + delta;
    let target = if target.is_finite() { target.max(0.0) } else { current.max(0.0) };

    match duration {
        Some(duration) => target.min(duration),
        None => target,
    }
}

/// Fraction of the track a click landed on, clamped to [0, 1]
///
/// None when the track has no usable width.
pub fn click_ratio(offset_x: f64, track_width: f64) -> Option<f64> {
    if !track_width.is_finite() || track_width <= 0.0 || !offset_x.is_finite() {
        return None;
    }
    Some(clamp(offset_x / track_width, 0.0, 1.0))
}

/// Position a click on the track seeks to
///
/// None when either the track width or the duration is unknown.
pub fn click_target(offset_x: f64, track_width: f64, duration: Option<f64>) -> Option<f64> {
    let ratio = click_ratio(offset_x, track_width)?;
    duration.map(|duration| ratio * duration)
}

/// Played fraction, clamped to [0, 1]; 0 while the duration is unknown or zero
pub fn progress_ratio(current: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(duration) if current.is_finite() && duration > 0.0 => clamp(current / duration, 0.0, 1.0),
        _ => 0.0,
    }
}

/// Left edge of the scrub tooltip relative to the track
///
/// Centres the label on the end of the filled portion, nudged by a fixed
/// offset, and keeps the whole label inside the track.
pub fn tooltip_left(track_width: f64, filled_width: f64, label_width: f64, offset_px: f64) -> f64 {
    let track_width = if track_width.is_finite() { track_width.max(0.0) } else { 0.0 };
    let filled_width = if filled_width.is_finite() { filled_width.max(0.0) } else { 0.0 };

    let anchor = track_width.min(filled_width) - label_width / 2.0 + offset_px;
    let max_left = (track_width - label_width).max(0.0);

    clamp(anchor, 0.0, max_left)
}
