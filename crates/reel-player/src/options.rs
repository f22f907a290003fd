//! Widget options
//!
//! Resolved once at construction and never changed afterwards.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// A control the widget knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Play,
    Progress,
    Volume,
    Fullscreen,
}

impl ControlKind {
    /// Every control, in the order they appear in the controls bar
    pub const ALL: [ControlKind; 4] = [
        ControlKind::Play,
        ControlKind::Progress,
        ControlKind::Volume,
        ControlKind::Fullscreen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Play => "play",
            ControlKind::Progress => "progress",
            ControlKind::Volume => "volume",
            ControlKind::Fullscreen => "fullscreen",
        }
    }
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized control name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control: {0}")]
pub struct UnknownControl(pub String);

impl FromStr for ControlKind {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlKind::ALL.into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

/// Recognized widget options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Controls to build; unknown names are dropped when deserializing
    #[serde(deserialize_with = "controls_from_names")]
    pub controls: Vec<ControlKind>,
    /// Fade the controls out 2s after the pointer leaves a playing widget
    #[serde(alias = "hide_controls")]
    pub hide_controls_when_idle: bool,
    /// Clicking the media surface toggles playback
    #[serde(alias = "click_to_play")]
    pub click_toggle: bool,
}

impl WidgetOptions {
    /// Options with the named controls and default flags.
    ///
    /// Unknown names are skipped, duplicates collapse to the first mention.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            controls: parse_controls(names),
            ..Self::default()
        }
    }

    /// Check a control was requested
    pub fn has(&self, kind: ControlKind) -> bool {
        self.controls.contains(&kind)
    }

    pub fn with_controls(mut self, controls: &[ControlKind]) -> Self {
        self.controls = Vec::new();
        for &kind in controls {
            if !self.controls.contains(&kind) {
                self.controls.push(kind);
            }
        }
        self
    }

    pub fn hide_controls_when_idle(mut self, hide: bool) -> Self {
        self.hide_controls_when_idle = hide;
        self
    }

    pub fn click_toggle(mut self, toggle: bool) -> Self {
        self.click_toggle = toggle;
        self
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            controls: ControlKind::ALL.to_vec(),
            hide_controls_when_idle: true,
            click_toggle: true,
        }
    }
}

fn parse_controls<I, S>(names: I) -> Vec<ControlKind>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut controls = Vec::new();
    for name in names {
        match name.as_ref().parse::<ControlKind>() {
            Ok(kind) if !controls.contains(&kind) => controls.push(kind),
            Ok(_) => {}
            Err(err) => tracing::debug!("Ignoring {}", err),
        }
    }
    controls
}

fn controls_from_names<'de, D>(deserializer: D) -> Result<Vec<ControlKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(parse_controls(names))
}
