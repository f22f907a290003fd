//! reel Player
//!
//! A minimal embedded media player. `MediaWidget` wraps one media element
//! with a generated controls bar (play/pause, scrubber, time label, volume,
//! fullscreen) and keeps that bar in sync with the element by reacting to
//! its events.
//!
//! # Example
//! ```rust,ignore
//! use reel_player::{MediaWidget, WidgetContext, WidgetOptions};
//!
//! let mut ctx = WidgetContext::new(&mut dom, &mut media, &mut fullscreen, &mut timers);
//! let widget = MediaWidget::create(&mut ctx, video, WidgetOptions::default())?;
//! widget.handle_event(&mut ctx, &event);
//! ```

mod context;
mod controls;
mod error;
mod options;
mod state;
mod time;
mod widget;

pub use context::{WidgetContext, WidgetTask};
pub use controls::{
    ControlSurface, CONTROLS_CLASS, FULLSCREEN_CLASS, MUTE_CLASS, PLAY_CLASS, PROGRESS_CLASS,
    PROGRESS_FILL_CLASS, TIME_CLASS, VOLUME_CLASS, VOLUME_RANGE_CLASS, WRAPPER_CLASS,
};
pub use error::PlayerError;
pub use options::{ControlKind, UnknownControl, WidgetOptions};
pub use state::{ControlState, MUTED_GLYPH, PAUSE_GLYPH, PLAY_GLYPH, UNMUTED_GLYPH};
pub use time::{format_time, progress_percent, time_label};
pub use widget::{MediaWidget, IDLE_HIDE_DELAY};
