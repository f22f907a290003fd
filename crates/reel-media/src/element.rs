//! Media Elements
//!
//! Playback state shared by `<video>` and `<audio>`. State changes queue
//! the DOM events a real element would fire; the page loop drains them
//! with `take_events` once the current handler has finished.

use std::time::Duration;

use reel_dom::EventType;

use crate::MediaError;

/// Network state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkState {
    #[default]
    Empty = 0,
    Idle = 1,
    Loading = 2,
    NoSource = 3,
}

/// Ready state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    #[default]
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

/// The playback values the control surface is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaSnapshot {
    pub paused: bool,
    pub current_time: f64,
    /// NaN until metadata is known
    pub duration: f64,
    pub muted: bool,
    pub volume: f64,
}

/// Base media element (shared between video/audio)
#[derive(Debug)]
pub struct HTMLMediaElement {
    // Source
    src: String,

    // State
    network_state: NetworkState,
    ready_state: ReadyState,

    // Playback
    current_time: f64,
    duration: f64,
    paused: bool,
    ended: bool,
    pub loop_: bool,
    pub playback_rate: f64,

    // Volume
    volume: f64,
    muted: bool,

    /// Events queued since the last drain
    events: Vec<EventType>,
}

impl HTMLMediaElement {
    pub fn new() -> Self {
        Self {
            src: String::new(),
            network_state: NetworkState::Empty,
            ready_state: ReadyState::HaveNothing,
            current_time: 0.0,
            duration: f64::NAN,
            paused: true,
            ended: false,
            loop_: false,
            playback_rate: 1.0,
            volume: 1.0,
            muted: false,
            events: Vec::new(),
        }
    }

    /// Create an element and start loading `src`
    pub fn with_src(src: &str) -> Self {
        let mut media = Self::new();
        media.set_src(src);
        media.events.clear();
        media
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn network_state(&self) -> NetworkState {
        self.network_state
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Current values the controls mirror
    pub fn snapshot(&self) -> MediaSnapshot {
        MediaSnapshot {
            paused: self.paused,
            current_time: self.current_time,
            duration: self.duration,
            muted: self.muted,
            volume: self.volume,
        }
    }

    /// Replace the source and run the load algorithm
    pub fn set_src(&mut self, src: &str) {
        self.src = src.to_string();
        self.load();
    }

    /// Load media: reset playback state for the current source
    pub fn load(&mut self) {
        if self.network_state != NetworkState::Empty {
            self.events.push(EventType::Emptied);
        }
        self.network_state = if self.src.is_empty() {
            NetworkState::NoSource
        } else {
            NetworkState::Loading
        };
        self.ready_state = ReadyState::HaveNothing;
        self.duration = f64::NAN;
        self.paused = true;
        self.ended = false;
        if self.current_time != 0.0 {
            self.current_time = 0.0;
            self.events.push(EventType::TimeUpdate);
        }
        tracing::trace!("Media load: {:?}", self.src);
    }

    /// Metadata arrived: duration is now known
    pub fn load_metadata(&mut self, duration: Duration) -> Result<(), MediaError> {
        if self.src.is_empty() {
            return Err(MediaError::InvalidState("no source loaded".into()));
        }
        self.duration = duration.as_secs_f64();
        self.network_state = NetworkState::Idle;
        self.ready_state = self.ready_state.max(ReadyState::HaveMetadata);
        self.events.push(EventType::LoadedMetadata);
        Ok(())
    }

    /// Play media
    pub fn play(&mut self) -> Result<(), MediaError> {
        if self.src.is_empty() {
            return Err(MediaError::NotSupported("no source to play".into()));
        }
        if !self.paused {
            return Ok(());
        }
        if self.ended {
            self.current_time = 0.0;
            self.ended = false;
        }
        self.paused = false;
        self.events.push(EventType::Play);
        Ok(())
    }

    /// Pause media
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.events.push(EventType::Pause);
    }

    /// Seek to time, clamped to the media timeline
    pub fn seek(&mut self, time: f64) -> Result<(), MediaError> {
        if !time.is_finite() {
            return Err(MediaError::InvalidState(format!("cannot seek to {time}")));
        }
        let upper = if self.duration.is_finite() { self.duration } else { f64::MAX };
        self.current_time = time.clamp(0.0, upper);
        if self.current_time < upper {
            self.ended = false;
        }
        self.events.push(EventType::TimeUpdate);
        Ok(())
    }

    /// Set volume in [0, 1]
    pub fn set_volume(&mut self, volume: f64) -> Result<(), MediaError> {
        if !volume.is_finite() {
            return Err(MediaError::InvalidState(format!("invalid volume {volume}")));
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.volume {
            self.volume = volume;
            self.events.push(EventType::VolumeChange);
        }
        Ok(())
    }

    /// Set muted flag
    pub fn set_muted(&mut self, muted: bool) {
        if muted != self.muted {
            self.muted = muted;
            self.events.push(EventType::VolumeChange);
        }
    }

    /// Run the playback clock for `dt`
    pub fn advance(&mut self, dt: Duration) {
        if self.paused || !self.duration.is_finite() || self.duration <= 0.0 {
            return;
        }
        self.current_time += dt.as_secs_f64() * self.playback_rate;
        if self.current_time < self.duration {
            self.events.push(EventType::TimeUpdate);
            return;
        }

        if self.loop_ {
            self.current_time %= self.duration;
            self.events.push(EventType::TimeUpdate);
        } else {
            self.current_time = self.duration;
            self.paused = true;
            self.ended = true;
            self.events.push(EventType::TimeUpdate);
            self.events.push(EventType::Pause);
            self.events.push(EventType::Ended);
        }
    }

    /// Check for events waiting to be dispatched
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Drain queued events in firing order
    pub fn take_events(&mut self) -> Vec<EventType> {
        std::mem::take(&mut self.events)
    }
}

impl Default for HTMLMediaElement {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(secs: u64) -> HTMLMediaElement {
        let mut media = HTMLMediaElement::with_src("reel.mp4");
        media.load_metadata(Duration::from_secs(secs)).unwrap();
        media.take_events();
        media
    }

    #[test]
    fn test_new_element() {
        let media = HTMLMediaElement::new();
        assert!(media.paused());
        assert_eq!(media.volume(), 1.0);
        assert!(media.duration().is_nan());
        assert_eq!(media.network_state(), NetworkState::Empty);
    }

    #[test]
    fn test_play_pause_events() {
        let mut media = loaded(60);
        media.play().unwrap();
        media.play().unwrap();
        media.pause();
        media.pause();

        assert_eq!(media.take_events(), vec![EventType::Play, EventType::Pause]);
        assert!(!media.has_pending_events());
    }

    #[test]
    fn test_play_without_source() {
        let mut media = HTMLMediaElement::new();
        assert!(matches!(media.play(), Err(MediaError::NotSupported(_))));
        assert!(media.paused());
    }

    #[test]
    fn test_seek_clamps() {
        let mut media = loaded(90);
        media.seek(120.0).unwrap();
        assert_eq!(media.current_time(), 90.0);
        media.seek(-4.0).unwrap();
        assert_eq!(media.current_time(), 0.0);
        assert!(media.seek(f64::NAN).is_err());
        assert_eq!(media.take_events(), vec![EventType::TimeUpdate, EventType::TimeUpdate]);
    }

    #[test]
    fn test_playback_to_end() {
        let mut media = loaded(2);
        media.play().unwrap();
        media.take_events();

        media.advance(Duration::from_millis(1500));
        assert_eq!(media.current_time(), 1.5);
        media.advance(Duration::from_secs(1));

        assert!(media.paused());
        assert!(media.ended());
        assert_eq!(media.current_time(), 2.0);
        assert_eq!(
            media.take_events(),
            vec![EventType::TimeUpdate, EventType::TimeUpdate, EventType::Pause, EventType::Ended]
        );

        // Playing again restarts from the top
        media.play().unwrap();
        assert_eq!(media.current_time(), 0.0);
    }

    #[test]
    fn test_loop_wraps() {
        let mut media = loaded(10);
        media.loop_ = true;
        media.play().unwrap();
        media.advance(Duration::from_secs(12));
        assert!(!media.paused());
        assert_eq!(media.current_time(), 2.0);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut media = loaded(10);
        media.set_volume(1.7).unwrap();
        assert_eq!(media.volume(), 1.0);
        assert!(media.take_events().is_empty());

        media.set_volume(0.25).unwrap();
        media.set_muted(true);
        assert_eq!(media.snapshot().volume, 0.25);
        assert!(media.snapshot().muted);
        assert_eq!(media.take_events(), vec![EventType::VolumeChange, EventType::VolumeChange]);
    }

    #[test]
    fn test_clearing_source_resets() {
        let mut media = loaded(30);
        media.play().unwrap();
        media.pause();
        media.take_events();

        media.set_src("");
        assert_eq!(media.network_state(), NetworkState::NoSource);
        assert!(media.duration().is_nan());
        assert_eq!(media.take_events(), vec![EventType::Emptied]);
    }

    #[test]
    fn test_reload_rewinds_with_timeupdate() {
        let mut media = loaded(120);
        media.play().unwrap();
        media.advance(Duration::from_secs(30));
        media.take_events();

        media.set_src("");
        assert_eq!(media.current_time(), 0.0);
        assert!(media.paused());
        assert_eq!(media.take_events(), vec![EventType::Emptied, EventType::TimeUpdate]);
    }
}
