//! Page runtime
//!
//! Owns the document, media state, fullscreen manager, timer queue and
//! viewport, and runs the event loop that feeds them to media widgets and
//! page listeners. Media events and fullscreen settlements queued by a
//! handler are delivered after it returns.

use std::time::Duration;

use reel_dom::{DomResult, DomTree, Event, EventType, NodeId, ScrollOptions, TimerQueue};
use reel_media::{FullscreenManager, HTMLMediaElement, MediaRegistry};
use reel_player::{MediaWidget, WidgetContext, WidgetTask};

use crate::alerts::{self, ALERT_CLOSE_CLASS};
use crate::config::PageConfig;
use crate::effects::{self, Typewriter, BRAND_CLASS};
use crate::error::PageError;
use crate::modal::{VideoModal, VIDEO_CARD_CLASS};
use crate::scroll::{self, Navbar, Parallax, HERO_CLASS, NAVBAR_CLASS};
use crate::viewport::Viewport;

/// Deferred page work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTask {
    Widget(WidgetTask),
    RemoveAlert(NodeId),
    ClearAnimation(NodeId),
    TypeNext,
}

impl From<WidgetTask> for PageTask {
    fn from(task: WidgetTask) -> Self {
        PageTask::Widget(task)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageAction {
    AnchorScroll,
    DismissAlert,
    OpenModal,
    CloseModal,
    ModalBackdrop,
    Glitch,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    target: NodeId,
    event: EventType,
    action: PageAction,
}

/// What `init` wired up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub widgets: usize,
    pub anchors: usize,
    pub alerts: usize,
    pub video_cards: usize,
    pub modal: bool,
    pub navbar: bool,
    pub heroes: usize,
    pub typewriter: bool,
    pub glitch: bool,
    pub stylesheet: bool,
}

/// A loaded page and its event loop
pub struct Page {
    dom: DomTree,
    media: MediaRegistry,
    fullscreen: FullscreenManager,
    timers: TimerQueue<PageTask>,
    viewport: Viewport,
    config: PageConfig,
    widgets: Vec<MediaWidget>,
    listeners: Vec<Listener>,
    modal: Option<VideoModal>,
    navbar: Option<Navbar>,
    parallax: Option<Parallax>,
    typewriter: Option<Typewriter>,
    scroll_pending: bool,
    initialized: bool,
}

impl Page {
    pub fn new(dom: DomTree, config: PageConfig) -> Self {
        Self::with_media(dom, MediaRegistry::new(), config)
    }

    /// Page whose host already holds state for some media elements
    pub fn with_media(dom: DomTree, media: MediaRegistry, config: PageConfig) -> Self {
        Self {
            dom,
            media,
            fullscreen: FullscreenManager::new(),
            timers: TimerQueue::new(),
            viewport: Viewport::new(),
            config,
            widgets: Vec::new(),
            listeners: Vec::new(),
            modal: None,
            navbar: None,
            parallax: None,
            typewriter: None,
            scroll_pending: false,
            initialized: false,
        }
    }

    /// Wire up the page (DOMContentLoaded)
    pub fn init(&mut self) -> Result<PageSummary, PageError> {
        if self.initialized {
            return Err(PageError::AlreadyInitialized);
        }
        self.initialized = true;

        let mut summary = PageSummary::default();
        summary.widgets = self.init_players()?;
        if self.config.scroll.enabled {
            summary.anchors = self.init_anchors();
        }
        if self.config.alerts.enabled {
            summary.alerts = self.listen_class(ALERT_CLOSE_CLASS, EventType::Click, PageAction::DismissAlert);
        }
        summary.video_cards = self.init_modal();
        summary.modal = self.modal.is_some();
        if self.config.parallax.enabled {
            let heroes = self.dom.get_elements_by_class_name(HERO_CLASS);
            summary.heroes = heroes.len();
            self.parallax = Some(Parallax::new(heroes, &self.config.parallax));
        }
        if self.config.navbar.enabled {
            self.navbar = self.dom.get_elements_by_class_name(NAVBAR_CLASS).into_iter().next()
                .map(|node| Navbar::new(node, self.config.navbar.clone()));
            summary.navbar = self.navbar.is_some();
        }
        if self.config.typewriter.enabled {
            if let Some(headline) = effects::hero_headline(&self.dom) {
                self.typewriter = Some(Typewriter::new(&self.dom, headline));
                self.timers.set_timeout(PageTask::TypeNext, self.config.typewriter.start_delay());
                summary.typewriter = true;
            }
        }
        if self.config.glitch.enabled {
            if let Some(logo) = self.dom.get_elements_by_class_name(BRAND_CLASS).into_iter().next() {
                self.listen(logo, EventType::MouseEnter, PageAction::Glitch);
                summary.glitch = true;
            }
        }
        if self.config.inject_styles {
            summary.stylesheet = effects::inject_stylesheet(&mut self.dom)?.is_some();
        }

        self.deliver(Event::new(EventType::DOMContentLoaded, self.dom.root()));
        self.flush();

        tracing::info!(
            "Page ready: {} players, {} anchors, {} alerts, {} video cards, {} listeners",
            summary.widgets,
            summary.anchors,
            summary.alerts,
            summary.video_cards,
            self.listeners.len()
        );
        Ok(summary)
    }

    fn init_players(&mut self) -> Result<usize, PageError> {
        let mut nodes = self.dom.get_elements_by_tag_name("video");
        nodes.extend(self.dom.get_elements_by_tag_name("audio"));
        nodes.sort();

        for node in nodes {
            if !self.media.contains(node) {
                self.media.insert(node, media_element(&self.dom, node));
            }
            let mut ctx = WidgetContext::new(
                &mut self.dom, &mut self.media, &mut self.fullscreen, &mut self.timers,
            );
            let widget = MediaWidget::create(&mut ctx, node, self.config.players.clone())?;
            self.widgets.push(widget);
        }
        Ok(self.widgets.len())
    }

    fn init_anchors(&mut self) -> usize {
        let anchors: Vec<NodeId> = self.dom.get_elements_by_tag_name("a").into_iter()
            .filter(|&a| scroll::is_in_page_anchor(&self.dom, a))
            .collect();
        for &anchor in &anchors {
            self.listen(anchor, EventType::Click, PageAction::AnchorScroll);
        }
        anchors.len()
    }

    fn init_modal(&mut self) -> usize {
        let Some(modal) = VideoModal::find(&self.dom) else {
            return 0;
        };
        // Delegated from the document so every card, including ones added later, opens it
        let cards = self.dom.get_elements_by_class_name(VIDEO_CARD_CLASS).len();
        self.listen(self.dom.root(), EventType::Click, PageAction::OpenModal);
        if let Some(close) = modal.close_button() {
            self.listen(close, EventType::Click, PageAction::CloseModal);
        }
        self.listen(modal.node(), EventType::Click, PageAction::ModalBackdrop);
        self.modal = Some(modal);
        cards
    }

    fn listen(&mut self, target: NodeId, event: EventType, action: PageAction) {
        self.listeners.push(Listener { target, event, action });
    }

    fn listen_class(&mut self, class: &str, event: EventType, action: PageAction) -> usize {
        let nodes = self.dom.get_elements_by_class_name(class);
        for &node in &nodes {
            self.listen(node, event, action);
        }
        nodes.len()
    }

    /// Dispatch an event, then run everything it queued.
    ///
    /// Returns false if a listener called `prevent_default`.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let handled = self.deliver(event);
        self.flush();
        handled
    }

    fn deliver(&mut self, mut event: Event) -> bool {
        let mut path = vec![event.target];
        if event.event_type.bubbles() {
            path.extend(self.dom.ancestors(event.target));
        }

        for node in path {
            event.current_target = node;

            let mut ctx = WidgetContext::new(
                &mut self.dom, &mut self.media, &mut self.fullscreen, &mut self.timers,
            );
            for widget in &mut self.widgets {
                widget.handle_event(&mut ctx, &event);
            }

            let actions: Vec<PageAction> = self.listeners.iter()
                .filter(|l| l.target == node && l.event == event.event_type)
                .map(|l| l.action)
                .collect();
            for action in actions {
                if let Err(err) = self.run_action(action, &mut event) {
                    tracing::warn!("{:?} on {} failed: {}", action, node, err);
                }
            }
        }

        if event.event_type == EventType::Scroll {
            self.on_scroll();
        }
        !event.is_default_prevented()
    }

    fn run_action(&mut self, action: PageAction, event: &mut Event) -> DomResult<()> {
        tracing::trace!("{} on {} -> {:?}", event.event_type, event.current_target, action);
        match action {
            PageAction::AnchorScroll => {
                event.prevent_default();
                match scroll::anchor_target(&self.dom, event.current_target) {
                    Some(target) => {
                        let options = scroll::scroll_options_for(
                            &self.dom, target, self.config.scroll.anchor_offset,
                        );
                        self.scroll_with(&options);
                    }
                    None => tracing::debug!("Anchor {} has no target", event.current_target),
                }
            }
            PageAction::DismissAlert => {
                let fade = self.config.alerts.fade();
                if let Some(alert) = alerts::begin_dismiss(&mut self.dom, event.current_target, fade)? {
                    self.timers.set_timeout(PageTask::RemoveAlert(alert), fade);
                }
            }
            PageAction::OpenModal => {
                let card = self.dom.closest_with_class(event.target, VIDEO_CARD_CLASS);
                if let (Some(modal), Some(card)) = (self.modal.as_mut(), card) {
                    modal.open(&mut self.dom, card)?;
                }
            }
            PageAction::CloseModal => self.close_modal()?,
            PageAction::ModalBackdrop => {
                if event.target == event.current_target {
                    self.close_modal()?;
                }
            }
            PageAction::Glitch => {
                let duration = self.config.glitch.duration();
                effects::start_glitch(&mut self.dom, event.current_target, duration)?;
                self.timers.set_timeout(PageTask::ClearAnimation(event.current_target), duration);
            }
        }
        Ok(())
    }

    fn close_modal(&mut self) -> DomResult<()> {
        match self.modal.as_mut() {
            Some(modal) => modal.close(&mut self.dom, &mut self.media),
            None => Ok(()),
        }
    }

    fn on_scroll(&mut self) {
        let y = self.viewport.scroll_y();
        if let Some(parallax) = &self.parallax {
            if let Err(err) = parallax.on_scroll(&mut self.dom, y) {
                tracing::warn!("Parallax update failed: {}", err);
            }
        }
        if let Some(navbar) = self.navbar.as_mut() {
            if let Err(err) = navbar.on_scroll(&mut self.dom, y) {
                tracing::warn!("Navbar update failed: {}", err);
            }
        }
    }

    /// User scroll to `y`
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_with(&ScrollOptions { top: Some(y), ..Default::default() });
        self.flush();
    }

    fn scroll_with(&mut self, options: &ScrollOptions) {
        if self.viewport.scroll_to(options) {
            self.scroll_pending = true;
        }
    }

    /// Deliver queued media events, fullscreen settlements and scroll
    /// notifications until nothing is left
    fn flush(&mut self) {
        loop {
            let events = self.media.take_events();
            let outcomes = self.fullscreen.settle();
            let scrolled = std::mem::take(&mut self.scroll_pending);
            if events.is_empty() && outcomes.is_empty() && !scrolled {
                return;
            }

            for (node, kind) in events {
                self.deliver(Event::new(kind, node));
            }
            for outcome in outcomes {
                let mut ctx = WidgetContext::new(
                    &mut self.dom, &mut self.media, &mut self.fullscreen, &mut self.timers,
                );
                if !self.widgets.iter_mut().any(|w| w.on_fullscreen_settled(&mut ctx, &outcome)) {
                    tracing::debug!("Fullscreen outcome for {} has no widget", outcome.requester);
                }
            }
            if scrolled {
                self.deliver(Event::new(EventType::Scroll, self.dom.root()));
            }
        }
    }

    /// Run the page clock forward by `dt`: media playback and timers
    /// interleave in time order.
    pub fn advance(&mut self, dt: Duration) {
        let start = self.timers.now();
        let deadline = start + dt;
        let mut media_clock = start;

        while let Some((_, task)) = self.timers.pop_due(deadline) {
            let now = self.timers.now();
            self.advance_media(now - media_clock);
            media_clock = now;
            self.run_task(task);
            self.flush();
        }

        self.timers.set_now(deadline);
        self.advance_media(deadline - media_clock);
    }

    fn advance_media(&mut self, dt: Duration) {
        if !dt.is_zero() {
            self.media.advance(dt);
            self.flush();
        }
    }

    fn run_task(&mut self, task: PageTask) {
        tracing::trace!("Timer task {:?}", task);
        let result = match task {
            PageTask::Widget(task) => {
                let mut ctx = WidgetContext::new(
                    &mut self.dom, &mut self.media, &mut self.fullscreen, &mut self.timers,
                );
                if !self.widgets.iter_mut().any(|w| w.on_task(&mut ctx, task)) {
                    tracing::debug!("No widget took {:?}", task);
                }
                Ok(())
            }
            PageTask::RemoveAlert(alert) => alerts::finish_dismiss(&mut self.dom, alert),
            PageTask::ClearAnimation(node) => effects::clear_animation(&mut self.dom, node),
            PageTask::TypeNext => self.type_next(),
        };
        if let Err(err) = result {
            tracing::warn!("Task {:?} failed: {}", task, err);
        }
    }

    fn type_next(&mut self) -> DomResult<()> {
        let Some(typewriter) = self.typewriter.as_mut() else {
            return Ok(());
        };
        if typewriter.step(&mut self.dom)? {
            self.timers.set_timeout(PageTask::TypeNext, self.config.typewriter.char_delay());
        }
        Ok(())
    }

    /// Click `node` at its center
    pub fn click(&mut self, node: NodeId) -> bool {
        let rect = self.dom.bounding_client_rect(node);
        let event = Event::click_at(node, rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        self.dispatch(event)
    }

    pub fn hover(&mut self, node: NodeId) {
        self.dispatch(Event::new(EventType::MouseEnter, node));
    }

    pub fn unhover(&mut self, node: NodeId) {
        self.dispatch(Event::new(EventType::MouseLeave, node));
    }

    pub fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// Mutable document access (layout, fixtures)
    pub fn dom_mut(&mut self) -> &mut DomTree {
        &mut self.dom
    }

    pub fn media(&self) -> &MediaRegistry {
        &self.media
    }

    /// Mutable media access. Queued events are delivered on the next
    /// `dispatch`, `advance` or `pump`.
    pub fn media_mut(&mut self) -> &mut MediaRegistry {
        &mut self.media
    }

    pub fn fullscreen(&self) -> &FullscreenManager {
        &self.fullscreen
    }

    pub fn fullscreen_mut(&mut self) -> &mut FullscreenManager {
        &mut self.fullscreen
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn widgets(&self) -> &[MediaWidget] {
        &self.widgets
    }

    /// Widget wrapping `media`
    pub fn widget_for(&self, media: NodeId) -> Option<&MediaWidget> {
        self.widgets.iter().find(|w| w.media() == media)
    }

    pub fn modal(&self) -> Option<&VideoModal> {
        self.modal.as_ref()
    }

    /// Page clock
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.timers.has_pending()
    }

    /// Deliver anything queued through `media_mut` or `fullscreen_mut`
    pub fn pump(&mut self) {
        self.flush();
    }
}

/// `src` attribute, or the first `source` child's
/// Media state for a `<video>`/`<audio>` from its markup
fn media_element(dom: &DomTree, node: NodeId) -> HTMLMediaElement {
    let mut element = match media_source(dom, node) {
        Some(src) => HTMLMediaElement::with_src(&src),
        None => HTMLMediaElement::new(),
    };
    let has = |name: &str| dom.element(node).is_some_and(|el| el.has_attr(name));
    element.set_muted(has("muted"));
    element.loop_ = has("loop");
    // Content attributes set the initial state without firing events
    element.take_events();
    element
}

fn media_source(dom: &DomTree, media: NodeId) -> Option<String> {
    if let Some(src) = dom.get_attribute(media, "src").filter(|s| !s.is_empty()) {
        return Some(src);
    }
    dom.children(media)
        .filter(|(id, _)| dom.element(*id).is_some_and(|el| el.tag == "source"))
        .find_map(|(id, _)| dom.get_attribute(id, "src"))
}
