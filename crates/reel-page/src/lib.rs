//! reel Page
//!
//! Page bootstrap for the site: one media widget per video/audio element,
//! in-page anchor scrolling, navbar and hero scroll effects, dismissible
//! alerts, the shared video modal and a couple of cosmetic effects. What
//! gets wired is described by a `PageConfig`.

pub mod alerts;
pub mod config;
pub mod effects;
pub mod modal;
pub mod scroll;

mod error;
mod page;
mod viewport;

pub use config::{
    AlertsConfig, GlitchConfig, NavbarConfig, PageConfig, ParallaxConfig, ScrollConfig,
    TypewriterConfig,
};
pub use error::PageError;
pub use modal::VideoModal;
pub use page::{Page, PageSummary, PageTask};
pub use viewport::Viewport;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
