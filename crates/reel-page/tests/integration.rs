//! Integration tests - full page from document to event loop
//!
//! Builds the site layout (navbar, hero, showreel, work grid, alerts, modal)
//! and drives it through clicks, hovers, scrolling and the clock.

use std::time::Duration;

use reel_dom::{DomTree, ElementGeometry, NodeId, ScrollBehavior};
use reel_page::{Page, PageConfig, TypewriterConfig};
use reel_player::{FULLSCREEN_CLASS, PAUSE_GLYPH, PLAY_GLYPH};

struct Site {
    page: Page,
    nav_link: NodeId,
    missing_link: NodeId,
    navbar: NodeId,
    brand: NodeId,
    hero: NodeId,
    headline: NodeId,
    showreel: NodeId,
    alert: NodeId,
    alert_close: NodeId,
    card_title: NodeId,
    modal: NodeId,
    modal_close: NodeId,
    modal_player: NodeId,
}

fn site(config: PageConfig) -> Site {
    let mut dom = DomTree::new();
    let html = dom.append_element(dom.root(), "html", &[]).unwrap();
    let body = dom.append_element(html, "body", &[]).unwrap();

    let navbar = dom.append_element(body, "nav", &[("class", "navbar")]).unwrap();
    let brand = dom.append_element(navbar, "a", &[("class", "navbar-brand"), ("href", "/")]).unwrap();
    dom.set_text_content(brand, "DEX VOLKOV").unwrap();
    let nav_link = dom.append_element(navbar, "a", &[("href", "#work"), ("class", "nav-link")]).unwrap();
    let missing_link = dom.append_element(navbar, "a", &[("href", "#contact")]).unwrap();

    let alert = dom.append_element(body, "div", &[("class", "alert alert-info")]).unwrap();
    let alert_close = dom.append_element(alert, "button", &[("class", "alert-close")]).unwrap();

    let hero = dom.append_element(body, "section", &[("class", "hero")]).unwrap();
    let headline = dom.append_element(hero, "h1", &[]).unwrap();
    dom.set_text_content(headline, "Motion").unwrap();
    let showreel = dom.append_element(hero, "video", &[("src", "/static/showreel.mp4")]).unwrap();

    let work = dom.append_element(body, "section", &[("id", "work")]).unwrap();
    dom.element_mut(work).unwrap().geometry = ElementGeometry::new(0.0, 1400.0, 1280.0, 900.0);
    let card = dom.append_element(work, "div", &[("class", "video-card"), ("data-video-id", "7")]).unwrap();
    let card_title = dom.append_element(card, "h3", &[]).unwrap();

    let modal = dom.append_element(body, "div", &[("id", "video-modal"), ("class", "video-modal")]).unwrap();
    let content = dom.append_element(modal, "div", &[("class", "modal-content")]).unwrap();
    let modal_close = dom.append_element(content, "span", &[("class", "modal-close")]).unwrap();
    let modal_player = dom.append_element(content, "video", &[("id", "modal-player"), ("src", "/media/7.mp4")]).unwrap();

    Site {
        page: Page::new(dom, config),
        nav_link,
        missing_link,
        navbar,
        brand,
        hero,
        headline,
        showreel,
        alert,
        alert_close,
        card_title,
        modal,
        modal_close,
        modal_player,
    }
}

fn ready_site() -> Site {
    let mut site = site(PageConfig::default());
    site.page.init().unwrap();
    site
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_init_summary() {
    let mut site = site(PageConfig::default());
    let summary = site.page.init().unwrap();

    assert_eq!(summary.widgets, 2);
    assert_eq!(summary.anchors, 2);
    assert_eq!(summary.alerts, 1);
    assert_eq!(summary.video_cards, 1);
    assert!(summary.modal);
    assert!(summary.navbar);
    assert_eq!(summary.heroes, 1);
    assert!(summary.typewriter);
    assert!(summary.glitch);
    assert!(summary.stylesheet);

    let dom = site.page.dom();
    assert_eq!(dom.get_elements_by_tag_name("head").len(), 1);
    assert!(site.page.widget_for(site.showreel).is_some());
    assert!(site.page.widget_for(site.modal_player).is_some());
}

#[test]
fn test_disabled_sections_are_not_wired() {
    let config = PageConfig::from_toml_str(
        r#"
        inject_styles = false
        [scroll]
        enabled = false
        [typewriter]
        enabled = false
        [glitch]
        enabled = false
        [players]
        controls = ["play"]
        "#,
    )
    .unwrap();
    let mut site = site(config);
    let summary = site.page.init().unwrap();

    assert_eq!(summary.anchors, 0);
    assert!(!summary.typewriter);
    assert!(!summary.glitch);
    assert!(!summary.stylesheet);
    assert!(site.page.dom().get_elements_by_tag_name("style").is_empty());

    // Unwired anchor keeps its default action
    assert!(site.page.click(site.nav_link));
    assert_eq!(site.page.viewport().scroll_y(), 0.0);

    let widget = site.page.widget_for(site.showreel).unwrap();
    assert!(widget.surface().progress_bar.is_none());
}

// ============================================================================
// MEDIA WIDGETS
// ============================================================================

#[test]
fn test_showreel_playback_cycle() {
    // Keep the clock free of typing ticks so playback advances in one step
    let config = PageConfig {
        typewriter: TypewriterConfig { enabled: false, ..Default::default() },
        ..Default::default()
    };
    let mut site = site(config);
    site.page.init().unwrap();
    let video = site.showreel;
    site.page.media_mut().get_mut(video).unwrap().load_metadata(Duration::from_secs(60)).unwrap();
    site.page.pump();

    let surface = site.page.widget_for(video).unwrap().surface().clone();
    let play = surface.play_button.unwrap();
    assert_eq!(site.page.dom().text_content(surface.time_label), "0:00 / 1:00");

    site.page.click(play);
    assert_eq!(site.page.dom().text_content(play), PAUSE_GLYPH);

    site.page.advance(Duration::from_secs(15));
    assert_eq!(site.page.dom().style(surface.progress_fill.unwrap(), "width"), Some("25%"));
    assert_eq!(site.page.dom().text_content(surface.time_label), "0:15 / 1:00");

    site.page.click(video);
    assert_eq!(site.page.dom().text_content(play), PLAY_GLYPH);
    assert_eq!(site.page.media().playing_count(), 0);
}

#[test]
fn test_controls_fade_after_leaving() {
    let mut site = ready_site();
    let video = site.showreel;
    site.page.media_mut().get_mut(video).unwrap().load_metadata(Duration::from_secs(600)).unwrap();
    site.page.click(video);

    let widget = site.page.widget_for(video).unwrap();
    let wrapper = widget.wrapper();
    let controls = widget.surface().controls;

    site.page.unhover(wrapper);
    site.page.advance(Duration::from_millis(1500));
    site.page.hover(wrapper);
    site.page.unhover(wrapper);
    site.page.advance(Duration::from_millis(1999));
    assert_eq!(site.page.dom().style(controls, "opacity"), Some("1"));

    site.page.advance(Duration::from_millis(1));
    assert_eq!(site.page.dom().style(controls, "opacity"), Some("0"));
}

#[test]
fn test_fullscreen_toggle_and_rejection() {
    let mut site = ready_site();
    let widget = site.page.widget_for(site.showreel).unwrap();
    let wrapper = widget.wrapper();
    let button = widget.surface().fullscreen_button.unwrap();

    site.page.click(button);
    assert!(site.page.dom().has_class(wrapper, FULLSCREEN_CLASS));
    assert_eq!(site.page.fullscreen().fullscreen_element(), Some(wrapper));

    site.page.click(button);
    assert!(!site.page.dom().has_class(wrapper, FULLSCREEN_CLASS));

    site.page.fullscreen_mut().set_allowed(false);
    site.page.click(button);
    assert!(!site.page.dom().has_class(wrapper, FULLSCREEN_CLASS));
    assert!(!site.page.fullscreen().is_fullscreen());
}

#[test]
fn test_widgets_are_independent() {
    let mut site = ready_site();
    let reel_play = site.page.widget_for(site.showreel).unwrap().surface().play_button.unwrap();
    let modal_play = site.page.widget_for(site.modal_player).unwrap().surface().play_button.unwrap();

    site.page.click(reel_play);

    assert!(!site.page.media().get(site.showreel).unwrap().paused());
    assert!(site.page.media().get(site.modal_player).unwrap().paused());
    assert_eq!(site.page.dom().text_content(modal_play), PLAY_GLYPH);
}

// ============================================================================
// PAGE COLLABORATORS
// ============================================================================

#[test]
fn test_anchor_smooth_scroll() {
    let mut site = ready_site();

    let default_allowed = site.page.click(site.nav_link);
    assert!(!default_allowed);
    assert_eq!(site.page.viewport().scroll_y(), 1320.0);
    assert_eq!(site.page.viewport().last_behavior(), ScrollBehavior::Smooth);

    // Scroll listeners saw the move
    assert_eq!(site.page.dom().style(site.hero, "transform"), Some("translateY(660px)"));

    // Missing target: default prevented, nothing moves
    assert!(!site.page.click(site.missing_link));
    assert_eq!(site.page.viewport().scroll_y(), 1320.0);
}

#[test]
fn test_navbar_and_parallax_on_scroll() {
    let mut site = ready_site();
    let navbar = site.navbar;

    site.page.scroll_to(30.0);
    assert_eq!(site.page.dom().style(navbar, "background"), Some("rgba(10, 10, 10, 0.95)"));
    assert_eq!(site.page.dom().style(site.hero, "transform"), Some("translateY(15px)"));

    site.page.scroll_to(700.0);
    assert_eq!(site.page.dom().style(navbar, "background"), Some("rgba(10, 10, 10, 0.98)"));
    assert_eq!(site.page.dom().style(navbar, "backdrop-filter"), Some("blur(15px)"));
    assert_eq!(site.page.dom().style(navbar, "transform"), Some("translateY(-100%)"));

    site.page.scroll_to(650.0);
    assert_eq!(site.page.dom().style(navbar, "transform"), Some("translateY(0)"));
}

#[test]
fn test_alert_dismissal() {
    let mut site = ready_site();

    site.page.click(site.alert_close);
    assert_eq!(site.page.dom().style(site.alert, "animation"), Some("fadeOut 0.3s ease"));
    assert!(site.page.dom().is_connected(site.alert));

    site.page.advance(Duration::from_millis(299));
    assert!(site.page.dom().is_connected(site.alert));

    site.page.advance(Duration::from_millis(1));
    assert!(!site.page.dom().is_connected(site.alert));
}

#[test]
fn test_video_modal() {
    let mut site = ready_site();
    let modal_player = site.modal_player;

    site.page.click(site.card_title);
    let modal = site.page.modal().unwrap();
    assert!(modal.is_open(site.page.dom()));
    assert_eq!(modal.video_id(), Some("7"));

    {
        let player = site.page.media_mut().get_mut(modal_player).unwrap();
        player.load_metadata(Duration::from_secs(120)).unwrap();
        player.play().unwrap();
        player.seek(30.0).unwrap();
    }
    site.page.pump();
    let surface = site.page.widget_for(modal_player).unwrap().surface().clone();
    let fill = surface.progress_fill.unwrap();
    assert_eq!(site.page.dom().text_content(surface.time_label), "0:30 / 2:00");
    assert_eq!(site.page.dom().style(fill, "width"), Some("25%"));

    // Clicks inside the content do not close it
    let content = site.page.dom().parent(site.modal_close);
    site.page.click(content);
    assert!(site.page.modal().unwrap().is_open(site.page.dom()));

    site.page.click(site.modal_close);
    assert_eq!(site.page.dom().style(site.modal, "display"), Some("none"));
    let player = site.page.media().get(modal_player).unwrap();
    assert!(player.paused());
    assert_eq!(player.src(), "");

    // Unloading the player resets its controls
    assert_eq!(site.page.dom().text_content(surface.play_button.unwrap()), PLAY_GLYPH);
    assert_eq!(site.page.dom().text_content(surface.time_label), "0:00 / 0:00");
    assert_eq!(site.page.dom().style(fill, "width"), Some("0%"));
}

#[test]
fn test_card_added_after_init_opens_modal() {
    let mut site = ready_site();
    let work = site.page.dom().get_element_by_id("work").unwrap();
    let card = site.page.dom_mut()
        .append_element(work, "div", &[("class", "video-card"), ("data-video-id", "8")])
        .unwrap();

    site.page.click(card);
    let modal = site.page.modal().unwrap();
    assert!(modal.is_open(site.page.dom()));
    assert_eq!(modal.video_id(), Some("8"));
}

#[test]
fn test_modal_backdrop_closes() {
    let mut site = ready_site();
    site.page.click(site.card_title);

    site.page.click(site.modal);
    assert!(!site.page.modal().unwrap().is_open(site.page.dom()));
}

#[test]
fn test_typewriter_timeline() {
    let mut site = ready_site();
    let headline = site.headline;

    site.page.advance(Duration::from_millis(499));
    assert_eq!(site.page.dom().text_content(headline), "Motion");

    site.page.advance(Duration::from_millis(1));
    assert_eq!(site.page.dom().text_content(headline), "M");

    site.page.advance(Duration::from_millis(30));
    assert_eq!(site.page.dom().text_content(headline), "Mo");

    site.page.advance(Duration::from_millis(120));
    assert_eq!(site.page.dom().text_content(headline), "Motion");
    assert!(!site.page.has_pending_timers());
}

#[test]
fn test_logo_glitch() {
    let mut site = ready_site();
    let brand = site.brand;

    site.page.hover(brand);
    assert_eq!(site.page.dom().style(brand, "animation"), Some("glitch 0.3s ease"));

    site.page.advance(Duration::from_millis(300));
    assert_eq!(site.page.dom().style(brand, "animation"), None);
}
