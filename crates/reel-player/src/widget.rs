//! Media widget
//!
//! Wiring is a flat listener table built once after construction: each
//! entry maps (target node, event type) to an action. Controls that were
//! not built simply have no entries.

use std::time::Duration;

use reel_dom::{DomResult, Event, EventType, NodeId, TimerId};
use reel_media::{FullscreenKind, FullscreenOutcome, MediaCapabilities};

use crate::context::{WidgetContext, WidgetTask};
use crate::controls::{ControlSurface, FULLSCREEN_CLASS};
use crate::error::PlayerError;
use crate::options::WidgetOptions;
use crate::state::{fill_width, ControlState};

/// Delay between the pointer leaving a playing widget and the controls fading
pub const IDLE_HIDE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    TogglePlay,
    Seek,
    SetVolume,
    ToggleMute,
    ToggleFullscreen,
    ShowControls,
    ScheduleHide,
    RefreshPlayGlyph,
    RefreshProgress,
    RefreshTimeLabel,
    RefreshVolume,
    ResetProgress,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    target: NodeId,
    event: EventType,
    action: Action,
}

/// Player widget wrapping one media element
#[derive(Debug)]
pub struct MediaWidget {
    media: NodeId,
    options: WidgetOptions,
    surface: ControlSurface,
    bindings: Vec<Binding>,
    idle_timer: Option<TimerId>,
}

impl MediaWidget {
    /// Wrap `media` with a control surface and wire it up
    pub fn create<T>(
        ctx: &mut WidgetContext<'_, T>,
        media: NodeId,
        options: WidgetOptions,
    ) -> Result<Self, PlayerError> {
        if !ctx.media.contains(media) {
            return Err(PlayerError::UnknownMedia(media));
        }
        if !ctx.dom.parent(media).is_valid() {
            return Err(PlayerError::Detached(media));
        }

        let caps = MediaCapabilities::query(ctx.media, ctx.fullscreen);
        let surface = ControlSurface::build(ctx.dom, media, &options, caps)?;

        let mut widget = Self {
            media,
            options,
            surface,
            bindings: Vec::new(),
            idle_timer: None,
        };
        widget.bind_events();
        widget.sync(ctx);

        tracing::debug!(
            "Media widget for {}: {} controls, {} listeners",
            media,
            widget.surface.control_count(),
            widget.bindings.len()
        );
        Ok(widget)
    }

    fn bind_events(&mut self) {
        let s = &self.surface;
        let media = self.media;
        let mut bindings = Vec::new();
        let mut on = |target: NodeId, event: EventType, action: Action| {
            bindings.push(Binding { target, event, action });
        };

        if let Some(play) = s.play_button {
            on(play, EventType::Click, Action::TogglePlay);
        }
        if self.options.click_toggle {
            on(media, EventType::Click, Action::TogglePlay);
        }
        if let Some(bar) = s.progress_bar {
            on(bar, EventType::Click, Action::Seek);
        }
        if let Some(range) = s.volume_range {
            on(range, EventType::Input, Action::SetVolume);
        }
        if let Some(mute) = s.mute_button {
            on(mute, EventType::Click, Action::ToggleMute);
            on(media, EventType::VolumeChange, Action::RefreshVolume);
        }
        if let Some(fullscreen) = s.fullscreen_button {
            on(fullscreen, EventType::Click, Action::ToggleFullscreen);
        }

        on(media, EventType::Play, Action::RefreshPlayGlyph);
        on(media, EventType::Pause, Action::RefreshPlayGlyph);
        on(media, EventType::TimeUpdate, Action::RefreshProgress);
        on(media, EventType::LoadedMetadata, Action::RefreshTimeLabel);
        on(media, EventType::Emptied, Action::ResetProgress);

        if self.options.hide_controls_when_idle {
            on(s.wrapper, EventType::MouseEnter, Action::ShowControls);
            on(s.wrapper, EventType::MouseLeave, Action::ScheduleHide);
        }

        self.bindings = bindings;
    }

    /// Run listeners bound to `event.current_target`. Returns true if any ran.
    pub fn handle_event<T: From<WidgetTask>>(
        &mut self,
        ctx: &mut WidgetContext<'_, T>,
        event: &Event,
    ) -> bool {
        let actions: Vec<Action> = self.bindings.iter()
            .filter(|b| b.target == event.current_target && b.event == event.event_type)
            .map(|b| b.action)
            .collect();

        for &action in &actions {
            tracing::trace!("{} on {} -> {:?}", event.event_type, event.current_target, action);
            match action {
                Action::TogglePlay => self.toggle_play(ctx),
                Action::Seek => self.seek_at(ctx, event.client_x),
                Action::SetVolume => {
                    if let Some(value) = event.value.as_deref() {
                        self.set_volume(ctx, value);
                    }
                }
                Action::ToggleMute => self.toggle_mute(ctx),
                Action::ToggleFullscreen => self.toggle_fullscreen(ctx),
                Action::ShowControls => self.show_controls(ctx),
                Action::ScheduleHide => self.schedule_hide(ctx),
                Action::RefreshPlayGlyph => self.refresh_play_glyph(ctx),
                Action::RefreshProgress => self.refresh_progress(ctx),
                Action::RefreshTimeLabel => self.refresh_time_label(ctx),
                Action::RefreshVolume => self.refresh_volume(ctx),
                Action::ResetProgress => self.reset_progress(ctx),
            }
        }
        !actions.is_empty()
    }

    /// Run a fired timer task. Returns false if the task belongs elsewhere.
    pub fn on_task<T>(&mut self, ctx: &mut WidgetContext<'_, T>, task: WidgetTask) -> bool {
        match task {
            WidgetTask::HideControls { wrapper } if wrapper == self.surface.wrapper => {
                self.idle_timer = None;
                log_dom(ctx.dom.set_style(self.surface.controls, "opacity", "0"));
                true
            }
            WidgetTask::HideControls { .. } => false,
        }
    }

    /// Apply a settled fullscreen request. Returns false if another element asked.
    pub fn on_fullscreen_settled<T>(
        &mut self,
        ctx: &mut WidgetContext<'_, T>,
        outcome: &FullscreenOutcome,
    ) -> bool {
        if outcome.requester != self.surface.wrapper {
            return false;
        }
        match &outcome.result {
            Ok(()) => {
                let entered = outcome.kind == FullscreenKind::Enter;
                if let Some(wrapper) = ctx.dom.element_mut(self.surface.wrapper) {
                    wrapper.class_list.toggle(FULLSCREEN_CLASS, Some(entered));
                }
            }
            Err(err) => {
                tracing::debug!("Fullscreen {:?} failed for {}: {}", outcome.kind, self.media, err);
            }
        }
        true
    }

    /// Play if paused, pause otherwise
    pub fn toggle_play<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        let Some(media) = ctx.media.get_mut(self.media) else {
            return;
        };
        if media.paused() {
            if let Err(err) = media.play() {
                tracing::debug!("Play rejected for {}: {}", self.media, err);
            }
        } else {
            media.pause();
        }
    }

    fn seek_at<T>(&self, ctx: &mut WidgetContext<'_, T>, client_x: f64) {
        let Some(bar) = self.surface.progress_bar else {
            return;
        };
        let rect = ctx.dom.bounding_client_rect(bar);
        if rect.width <= 0.0 {
            tracing::debug!("Progress track for {} has no width, ignoring seek", self.media);
            return;
        }
        let fraction = (client_x - rect.left()) / rect.width;
        self.seek_to_fraction(ctx, fraction);
    }

    /// Seek to `fraction` of the duration, clamped to [0, 1]
    pub fn seek_to_fraction<T>(&self, ctx: &mut WidgetContext<'_, T>, fraction: f64) {
        let Some(media) = ctx.media.get_mut(self.media) else {
            return;
        };
        let duration = media.duration();
        if !duration.is_finite() {
            tracing::debug!("Duration of {} unknown, ignoring seek", self.media);
            return;
        }
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        if let Err(err) = media.seek(fraction * duration) {
            tracing::debug!("Seek failed for {}: {}", self.media, err);
        }
    }

    /// Apply a volume slider value in [0, 100]
    pub fn set_volume<T>(&self, ctx: &mut WidgetContext<'_, T>, raw: &str) {
        let value = match raw.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::debug!("Ignoring volume input {:?}", raw);
                return;
            }
        };
        let Some(media) = ctx.media.get_mut(self.media) else {
            return;
        };
        if let Err(err) = media.set_volume(value / 100.0) {
            tracing::debug!("Volume rejected for {}: {}", self.media, err);
            return;
        }
        self.refresh_volume(ctx);
    }

    /// Flip muted and update the mute glyph
    pub fn toggle_mute<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        if let Some(media) = ctx.media.get_mut(self.media) {
            let muted = media.muted();
            media.set_muted(!muted);
        }
        self.refresh_volume(ctx);
    }

    /// Enter fullscreen on the wrapper, or leave fullscreen.
    ///
    /// The request settles later; see `on_fullscreen_settled`.
    pub fn toggle_fullscreen<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        if ctx.fullscreen.fullscreen_element().is_none() {
            ctx.fullscreen.request_fullscreen(self.surface.wrapper);
        } else {
            ctx.fullscreen.exit_fullscreen(self.surface.wrapper);
        }
    }

    /// Cancel any pending fade and show the controls
    pub fn show_controls<T>(&mut self, ctx: &mut WidgetContext<'_, T>) {
        self.cancel_idle_hide(ctx);
        log_dom(ctx.dom.set_style(self.surface.controls, "opacity", "1"));
    }

    /// Start the fade countdown if media is playing, replacing any pending one
    pub fn schedule_hide<T: From<WidgetTask>>(&mut self, ctx: &mut WidgetContext<'_, T>) {
        if !self.options.hide_controls_when_idle {
            return;
        }
        let playing = ctx.media.get(self.media).is_some_and(|m| !m.paused());
        if !playing {
            return;
        }
        self.cancel_idle_hide(ctx);
        let task = WidgetTask::HideControls { wrapper: self.surface.wrapper };
        self.idle_timer = Some(ctx.timers.set_timeout(T::from(task), IDLE_HIDE_DELAY));
    }

    fn cancel_idle_hide<T>(&mut self, ctx: &mut WidgetContext<'_, T>) {
        if let Some(id) = self.idle_timer.take() {
            ctx.timers.clear(id);
        }
    }

    fn state<T>(&self, ctx: &WidgetContext<'_, T>) -> Option<ControlState> {
        ctx.media.get(self.media).map(|m| ControlState::from_snapshot(&m.snapshot()))
    }

    pub fn refresh_play_glyph<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        let (Some(button), Some(state)) = (self.surface.play_button, self.state(ctx)) else {
            return;
        };
        log_dom(ctx.dom.set_text_content(button, state.play_glyph));
    }

    /// Update the fill width, then the time label
    pub fn refresh_progress<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        let Some(state) = self.state(ctx) else {
            return;
        };
        if let (Some(fill), Some(percent)) = (self.surface.progress_fill, state.fill_percent) {
            log_dom(ctx.dom.set_style(fill, "width", &fill_width(percent)));
        }
        log_dom(ctx.dom.set_text_content(self.surface.time_label, &state.time_label));
    }

    pub fn refresh_time_label<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        if let Some(state) = self.state(ctx) {
            log_dom(ctx.dom.set_text_content(self.surface.time_label, &state.time_label));
        }
    }

    /// Mute glyph and slider position
    pub fn refresh_volume<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        let Some(state) = self.state(ctx) else {
            return;
        };
        if let Some(button) = self.surface.mute_button {
            log_dom(ctx.dom.set_text_content(button, state.mute_glyph));
        }
        if let Some(range) = self.surface.volume_range {
            log_dom(ctx.dom.set_attribute(range, "value", &state.volume_value));
        }
    }

    /// Source was reset: empty the fill and redraw everything else
    fn reset_progress<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        if let Some(fill) = self.surface.progress_fill {
            log_dom(ctx.dom.set_style(fill, "width", &fill_width(0.0)));
        }
        self.sync(ctx);
    }

    /// Bring every control in line with the media element
    pub fn sync<T>(&self, ctx: &mut WidgetContext<'_, T>) {
        self.refresh_play_glyph(ctx);
        self.refresh_progress(ctx);
        self.refresh_volume(ctx);
    }

    pub fn media(&self) -> NodeId {
        self.media
    }

    pub fn wrapper(&self) -> NodeId {
        self.surface.wrapper
    }

    pub fn surface(&self) -> &ControlSurface {
        &self.surface
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Check an idle-hide countdown is running
    pub fn idle_hide_pending(&self) -> bool {
        self.idle_timer.is_some()
    }
}

fn log_dom(result: DomResult<()>) {
    if let Err(err) = result {
        tracing::warn!("Control surface update failed: {}", err);
    }
}
