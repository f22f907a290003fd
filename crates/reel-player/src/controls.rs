//! Control surface construction
//!
//! Builds the wrapper around a media element and the controls bar inside
//! it. Only requested controls the platform can back are created; the time
//! label is always present.

use reel_dom::{DomError, DomResult, DomTree, NodeId};
use reel_media::MediaCapabilities;

use crate::options::{ControlKind, WidgetOptions};
use crate::state::{FULLSCREEN_GLYPH, PLAY_GLYPH, UNMUTED_GLYPH};

pub const WRAPPER_CLASS: &str = "reel";
pub const FULLSCREEN_CLASS: &str = "reel--fullscreen";
pub const CONTROLS_CLASS: &str = "reel__controls";
pub const PLAY_CLASS: &str = "reel__control reel__control--play";
pub const PROGRESS_CLASS: &str = "reel__progress";
pub const PROGRESS_FILL_CLASS: &str = "reel__progress-filled";
pub const TIME_CLASS: &str = "reel__time";
pub const VOLUME_CLASS: &str = "reel__volume";
pub const MUTE_CLASS: &str = "reel__control reel__control--mute";
pub const VOLUME_RANGE_CLASS: &str = "reel__volume-range";
pub const FULLSCREEN_BUTTON_CLASS: &str = "reel__control reel__control--fullscreen";

/// Generated elements, owned by the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSurface {
    pub wrapper: NodeId,
    pub controls: NodeId,
    pub play_button: Option<NodeId>,
    pub progress_bar: Option<NodeId>,
    pub progress_fill: Option<NodeId>,
    pub time_label: NodeId,
    pub volume_group: Option<NodeId>,
    pub mute_button: Option<NodeId>,
    pub volume_range: Option<NodeId>,
    pub fullscreen_button: Option<NodeId>,
}

impl ControlSurface {
    /// Wrap `media` and build the controls bar.
    ///
    /// `media` must be attached to a parent; it is moved into the wrapper,
    /// which takes its place among the parent's children.
    pub fn build(
        dom: &mut DomTree,
        media: NodeId,
        options: &WidgetOptions,
        caps: MediaCapabilities,
    ) -> DomResult<Self> {
        let parent = dom.parent(media);
        if !parent.is_valid() {
            return Err(DomError::HierarchyRequest);
        }

        let wrapper = dom.create_element_with_class("div", WRAPPER_CLASS);
        dom.insert_before(parent, wrapper, Some(media))?;
        dom.append_child(wrapper, media)?;

        let controls = dom.create_element_with_class("div", CONTROLS_CLASS);

        let play_button = if options.has(ControlKind::Play) {
            Some(button(dom, controls, PLAY_CLASS, PLAY_GLYPH)?)
        } else {
            None
        };

        let (progress_bar, progress_fill) = if options.has(ControlKind::Progress) {
            let bar = dom.create_element_with_class("div", PROGRESS_CLASS);
            let fill = dom.create_element_with_class("div", PROGRESS_FILL_CLASS);
            dom.append_child(bar, fill)?;
            dom.append_child(controls, bar)?;
            (Some(bar), Some(fill))
        } else {
            (None, None)
        };

        let time_label = dom.create_element_with_class("div", TIME_CLASS);
        dom.set_text_content(time_label, "0:00 / 0:00")?;
        dom.append_child(controls, time_label)?;

        let (volume_group, mute_button, volume_range) = match options.has(ControlKind::Volume) {
            true if caps.volume => {
                let group = dom.create_element_with_class("div", VOLUME_CLASS);
                let mute = button(dom, group, MUTE_CLASS, UNMUTED_GLYPH)?;
                let range = dom.create_element_with_class("input", VOLUME_RANGE_CLASS);
                for (name, value) in [("type", "range"), ("min", "0"), ("max", "100"), ("value", "100")] {
                    dom.set_attribute(range, name, value)?;
                }
                dom.append_child(group, range)?;
                dom.append_child(controls, group)?;
                (Some(group), Some(mute), Some(range))
            }
            true => {
                tracing::debug!("Volume control requested but not supported, skipping");
                (None, None, None)
            }
            false => (None, None, None),
        };

        let fullscreen_button = match options.has(ControlKind::Fullscreen) {
            true if caps.fullscreen => {
                Some(button(dom, controls, FULLSCREEN_BUTTON_CLASS, FULLSCREEN_GLYPH)?)
            }
            true => {
                tracing::debug!("Fullscreen control requested but not supported, skipping");
                None
            }
            false => None,
        };

        dom.append_child(wrapper, controls)?;

        Ok(Self {
            wrapper,
            controls,
            play_button,
            progress_bar,
            progress_fill,
            time_label,
            volume_group,
            mute_button,
            volume_range,
            fullscreen_button,
        })
    }

    /// Number of interactive controls built
    pub fn control_count(&self) -> usize {
        [self.play_button, self.progress_bar, self.volume_group, self.fullscreen_button]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

fn button(dom: &mut DomTree, parent: NodeId, class: &str, glyph: &str) -> DomResult<NodeId> {
    let id = dom.create_element_with_class("button", class);
    dom.set_text_content(id, glyph)?;
    dom.append_child(parent, id)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_video() -> (DomTree, NodeId, NodeId) {
        let mut dom = DomTree::new();
        let section = dom.create_element("section");
        dom.append_child(dom.root(), section).unwrap();
        let video = dom.create_element("video");
        dom.append_child(section, video).unwrap();
        (dom, section, video)
    }

    fn child_ids(dom: &DomTree, id: NodeId) -> Vec<NodeId> {
        dom.children(id).map(|(c, _)| c).collect()
    }

    #[test]
    fn test_full_surface_structure() {
        let (mut dom, section, video) = page_with_video();
        let surface = ControlSurface::build(
            &mut dom, video, &WidgetOptions::default(), MediaCapabilities::all(),
        ).unwrap();

        assert_eq!(child_ids(&dom, section), vec![surface.wrapper]);
        assert_eq!(child_ids(&dom, surface.wrapper), vec![video, surface.controls]);
        assert_eq!(
            child_ids(&dom, surface.controls),
            vec![
                surface.play_button.unwrap(),
                surface.progress_bar.unwrap(),
                surface.time_label,
                surface.volume_group.unwrap(),
                surface.fullscreen_button.unwrap(),
            ]
        );
        assert_eq!(child_ids(&dom, surface.progress_bar.unwrap()), vec![surface.progress_fill.unwrap()]);
        assert_eq!(dom.text_content(surface.time_label), "0:00 / 0:00");
        assert_eq!(dom.get_attribute(surface.volume_range.unwrap(), "max").as_deref(), Some("100"));
        assert!(dom.has_class(surface.play_button.unwrap(), "reel__control--play"));
        assert_eq!(surface.control_count(), 4);
    }

    #[test]
    fn test_only_requested_controls() {
        let (mut dom, _, video) = page_with_video();
        let options = WidgetOptions::from_names(["progress"]);
        let surface = ControlSurface::build(&mut dom, video, &options, MediaCapabilities::all()).unwrap();

        assert!(surface.play_button.is_none());
        assert!(surface.volume_group.is_none());
        assert!(surface.fullscreen_button.is_none());
        assert_eq!(
            child_ids(&dom, surface.controls),
            vec![surface.progress_bar.unwrap(), surface.time_label]
        );
    }

    #[test]
    fn test_unsupported_capabilities_skip_controls() {
        let (mut dom, _, video) = page_with_video();
        let caps = MediaCapabilities { volume: false, fullscreen: false };
        let surface = ControlSurface::build(&mut dom, video, &WidgetOptions::default(), caps).unwrap();

        assert!(surface.mute_button.is_none());
        assert!(surface.volume_range.is_none());
        assert!(surface.fullscreen_button.is_none());
        assert_eq!(surface.control_count(), 2);
    }

    #[test]
    fn test_detached_media_fails() {
        let mut dom = DomTree::new();
        let video = dom.create_element("video");
        let result = ControlSurface::build(&mut dom, video, &WidgetOptions::default(), MediaCapabilities::all());
        assert!(result.is_err());
    }
}
