//! Page configuration
//!
//! Everything the page runtime wires up at init is described here. All
//! fields default, so an empty TOML document is a valid configuration.

use std::path::Path;
use std::time::Duration;

use reel_player::WidgetOptions;
use serde::Deserialize;

use crate::error::PageError;

/// Page runtime configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Options for every media widget on the page
    pub players: WidgetOptions,
    pub scroll: ScrollConfig,
    pub navbar: NavbarConfig,
    pub parallax: ParallaxConfig,
    pub alerts: AlertsConfig,
    pub typewriter: TypewriterConfig,
    pub glitch: GlitchConfig,
    /// Append the page stylesheet to `head` at init
    pub inject_styles: bool,
}

impl PageConfig {
    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, PageError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded page config from {}", path.display());
        Ok(config)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            players: WidgetOptions::default(),
            scroll: ScrollConfig::default(),
            navbar: NavbarConfig::default(),
            parallax: ParallaxConfig::default(),
            alerts: AlertsConfig::default(),
            typewriter: TypewriterConfig::default(),
            glitch: GlitchConfig::default(),
            inject_styles: true,
        }
    }
}

/// In-page anchor links
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub enabled: bool,
    /// Height kept clear above the scroll target (fixed navbar)
    pub anchor_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { enabled: true, anchor_offset: 80.0 }
    }
}

/// Navbar background and auto-hide
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub enabled: bool,
    /// Scroll offset past which the navbar turns solid
    pub solid_after: f64,
    /// Scroll offset past which scrolling down hides the navbar
    pub hide_after: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self { enabled: true, solid_after: 50.0, hide_after: 500.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub enabled: bool,
    /// Hero translation per pixel scrolled
    pub speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { enabled: true, speed: 0.5 }
    }
}

/// Dismissible alerts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub enabled: bool,
    pub fade_ms: u64,
}

impl AlertsConfig {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self { enabled: true, fade_ms: 300 }
    }
}

/// Hero headline typing effect
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub enabled: bool,
    pub start_delay_ms: u64,
    pub char_delay_ms: u64,
}

impl TypewriterConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self { enabled: true, start_delay_ms: 500, char_delay_ms: 30 }
    }
}

/// Logo hover glitch
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    pub enabled: bool,
    pub duration_ms: u64,
}

impl GlitchConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self { enabled: true, duration_ms: 300 }
    }
}

/// CSS seconds for an animation shorthand ("0.3s")
pub(crate) fn css_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_player::ControlKind;

    #[test]
    fn test_empty_document_is_default() {
        let config = PageConfig::from_toml_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.scroll.anchor_offset, 80.0);
        assert_eq!(config.typewriter.char_delay(), Duration::from_millis(30));
        assert!(config.inject_styles);
    }

    #[test]
    fn test_partial_sections() {
        let config = PageConfig::from_toml_str(
            r#"
            inject_styles = false

            [players]
            controls = ["play", "volume"]
            hide_controls_when_idle = false

            [navbar]
            hide_after = 800.0

            [typewriter]
            enabled = false
            "#,
        )
        .unwrap();

        assert!(!config.inject_styles);
        assert_eq!(config.players.controls, vec![ControlKind::Play, ControlKind::Volume]);
        assert!(!config.players.hide_controls_when_idle);
        assert!(config.players.click_toggle);
        assert_eq!(config.navbar.hide_after, 800.0);
        assert_eq!(config.navbar.solid_after, 50.0);
        assert!(!config.typewriter.enabled);
        assert_eq!(config.typewriter.start_delay_ms, 500);
    }

    #[test]
    fn test_invalid_toml() {
        let err = PageConfig::from_toml_str("[scroll\nanchor_offset = 1").unwrap_err();
        assert!(matches!(err, PageError::Config(_)));

        let err = PageConfig::from_toml_str("[alerts]\nfade_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PageConfig::load("/nonexistent/reel/page.toml").unwrap_err();
        assert!(matches!(err, PageError::Io(_)));
    }

    #[test]
    fn test_css_seconds() {
        assert_eq!(css_seconds(Duration::from_millis(300)), "0.3s");
        assert_eq!(css_seconds(Duration::from_secs(1)), "1s");
    }
}
