//! Control state derived from a media snapshot
//!
//! Everything the control surface shows is computed here from the media
//! element's values; the surface itself holds no authoritative state.

use reel_media::MediaSnapshot;

use crate::time::{progress_percent, time_label};

pub const PLAY_GLYPH: &str = "▶";
pub const PAUSE_GLYPH: &str = "❚❚";
pub const UNMUTED_GLYPH: &str = "🔊";
pub const MUTED_GLYPH: &str = "🔇";
pub const FULLSCREEN_GLYPH: &str = "⛶";

/// Visual state of the controls for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub play_glyph: &'static str,
    /// Fill width percentage; `None` leaves the fill untouched
    pub fill_percent: Option<f64>,
    pub time_label: String,
    pub mute_glyph: &'static str,
    /// Volume slider position in [0, 100]
    pub volume_value: String,
}

impl ControlState {
    pub fn from_snapshot(snapshot: &MediaSnapshot) -> Self {
        Self {
            play_glyph: play_glyph(snapshot.paused),
            fill_percent: progress_percent(snapshot.current_time, snapshot.duration),
            time_label: time_label(snapshot.current_time, snapshot.duration),
            mute_glyph: mute_glyph(snapshot.muted),
            volume_value: slider_value(snapshot.volume),
        }
    }
}

pub fn play_glyph(paused: bool) -> &'static str {
    if paused { PLAY_GLYPH } else { PAUSE_GLYPH }
}

pub fn mute_glyph(muted: bool) -> &'static str {
    if muted { MUTED_GLYPH } else { UNMUTED_GLYPH }
}

/// Slider `value` attribute for a volume in [0, 1]
pub fn slider_value(volume: f64) -> String {
    format!("{}", (volume.clamp(0.0, 1.0) * 100.0).round())
}

/// CSS width value for a fill percentage
pub fn fill_width(percent: f64) -> String {
    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(paused: bool, current_time: f64, duration: f64, muted: bool) -> MediaSnapshot {
        MediaSnapshot { paused, current_time, duration, muted, volume: 1.0 }
    }

    #[test]
    fn test_paused_state() {
        let state = ControlState::from_snapshot(&snapshot(true, 0.0, f64::NAN, false));
        assert_eq!(state.play_glyph, PLAY_GLYPH);
        assert_eq!(state.fill_percent, None);
        assert_eq!(state.time_label, "0:00 / 0:00");
        assert_eq!(state.mute_glyph, UNMUTED_GLYPH);
    }

    #[test]
    fn test_playing_state() {
        let state = ControlState::from_snapshot(&snapshot(false, 30.0, 120.0, true));
        assert_eq!(state.play_glyph, PAUSE_GLYPH);
        assert_eq!(state.fill_percent, Some(25.0));
        assert_eq!(state.time_label, "0:30 / 2:00");
        assert_eq!(state.mute_glyph, MUTED_GLYPH);
        assert_eq!(state.volume_value, "100");
    }

    #[test]
    fn test_slider_value() {
        assert_eq!(slider_value(0.4), "40");
        assert_eq!(slider_value(0.0), "0");
        assert_eq!(slider_value(1.7), "100");
    }

    #[test]
    fn test_fill_width() {
        assert_eq!(fill_width(50.0), "50%");
        assert_eq!(fill_width(12.5), "12.5%");
    }
}
