//! reel Demo - Main Entry Point
//!
//! `reel-demo [config.toml]` builds the landing page, runs a scripted visit
//! against it and logs what the page does.

mod site;

use std::time::Duration;

use anyhow::Context;
use reel_dom::NodeId;
use reel_page::{Page, PageConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PageConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => PageConfig::default(),
    };

    tracing::info!("Starting reel demo v{}", reel_page::VERSION);

    let site = site::build().context("building demo document")?;
    let mut page = Page::new(site.dom, config);
    page.init().context("initializing page")?;

    // Metadata arrives, visitor hits play and watches for a while
    let showreel = site.showreel;
    if let Some(media) = page.media_mut().get_mut(showreel) {
        media.load_metadata(Duration::from_secs(94))?;
    }
    page.pump();
    if let Some(play) = page.widget_for(showreel).and_then(|w| w.surface().play_button) {
        page.click(play);
    }
    page.advance(Duration::from_secs(12));
    report(&page, showreel);

    // Pointer wanders off, controls fade
    if let Some(wrapper) = page.widget_for(showreel).map(|w| w.wrapper()) {
        page.hover(wrapper);
        page.unhover(wrapper);
    }
    page.advance(Duration::from_secs(3));
    report(&page, showreel);

    // Fullscreen in and out
    if let Some(button) = page.widget_for(showreel).and_then(|w| w.surface().fullscreen_button) {
        page.click(button);
        tracing::info!("Fullscreen element: {:?}", page.fullscreen().fullscreen_element());
        page.click(button);
    }

    // Navigate to the work grid and open a card
    page.click(site.work_link);
    tracing::info!("Scrolled to {}", page.viewport().scroll_y());
    page.hover(site.brand);
    page.click(site.card);
    if let Some(modal) = page.modal() {
        tracing::info!("Modal open: {} (video {:?})", modal.is_open(page.dom()), modal.video_id());
    }
    page.advance(Duration::from_millis(500));
    page.click(site.modal_close);

    // Dismiss the alert and let the page settle
    page.click(site.alert_close);
    page.scroll_to(0.0);
    page.advance(Duration::from_secs(2));

    report(&page, showreel);
    tracing::info!(
        "Session finished at {:.1}s, {} alert(s) left",
        page.now().as_secs_f64(),
        page.dom().get_elements_by_class_name("alert").len()
    );
    Ok(())
}

fn report(page: &Page, media: NodeId) {
    let (Some(widget), Some(element)) = (page.widget_for(media), page.media().get(media)) else {
        return;
    };
    let surface = widget.surface();
    let dom = page.dom();
    tracing::info!(
        "Player {}: glyph {}, time {}, fill {}, controls opacity {}",
        media,
        surface.play_button.map(|b| dom.text_content(b)).unwrap_or_default(),
        dom.text_content(surface.time_label),
        surface.progress_fill.and_then(|f| dom.style(f, "width")).unwrap_or("-"),
        dom.style(surface.controls, "opacity").unwrap_or("1"),
    );
    tracing::debug!("Media state: paused={} t={:.2}", element.paused(), element.current_time());
}
