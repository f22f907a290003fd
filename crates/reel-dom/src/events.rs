//! DOM Events
//!
//! Input, pointer, scroll and media events delivered by the page loop.

use crate::NodeId;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    // Input
    Click,
    Input,
    MouseEnter,
    MouseLeave,
    Scroll,

    // Document lifecycle
    DOMContentLoaded,

    // Media
    Play,
    Pause,
    TimeUpdate,
    LoadedMetadata,
    VolumeChange,
    Ended,
    Emptied,
}

impl EventType {
    /// Check if this event type bubbles to ancestors
    pub fn bubbles(&self) -> bool {
        matches!(self, EventType::Click | EventType::Input)
    }

    /// DOM event name
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::Input => "input",
            EventType::MouseEnter => "mouseenter",
            EventType::MouseLeave => "mouseleave",
            EventType::Scroll => "scroll",
            EventType::DOMContentLoaded => "DOMContentLoaded",
            EventType::Play => "play",
            EventType::Pause => "pause",
            EventType::TimeUpdate => "timeupdate",
            EventType::LoadedMetadata => "loadedmetadata",
            EventType::VolumeChange => "volumechange",
            EventType::Ended => "ended",
            EventType::Emptied => "emptied",
        }
    }

    /// Check if the event originates from a media element
    pub fn is_media(&self) -> bool {
        matches!(self,
            EventType::Play |
            EventType::Pause |
            EventType::TimeUpdate |
            EventType::LoadedMetadata |
            EventType::VolumeChange |
            EventType::Ended |
            EventType::Emptied
        )
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    /// Pointer position in viewport coordinates
    pub client_x: f64,
    pub client_y: f64,
    /// Control value for `input` events
    pub value: Option<String>,
    default_prevented: bool,
}

impl Event {
    /// Create an event with no pointer data
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            client_x: 0.0,
            client_y: 0.0,
            value: None,
            default_prevented: false,
        }
    }

    /// Create a click event at a viewport position
    pub fn click_at(target: NodeId, client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            ..Self::new(EventType::Click, target)
        }
    }

    /// Create a click event with no meaningful position
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    /// Create an input event carrying the control's new value
    pub fn input(target: NodeId, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(EventType::Input, target)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
