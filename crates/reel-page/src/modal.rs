//! Video modal
//!
//! Cards open a shared modal; closing it stops and unloads the modal player.

use reel_dom::{DomResult, DomTree, NodeId};
use reel_media::MediaRegistry;

pub const MODAL_ID: &str = "video-modal";
pub const MODAL_PLAYER_ID: &str = "modal-player";
pub const MODAL_CLOSE_CLASS: &str = "modal-close";
pub const VIDEO_CARD_CLASS: &str = "video-card";

/// The page's video modal and its player
#[derive(Debug, Clone)]
pub struct VideoModal {
    modal: NodeId,
    player: Option<NodeId>,
    close_button: Option<NodeId>,
    video_id: Option<String>,
}

impl VideoModal {
    /// Find `#video-modal` and its parts
    pub fn find(dom: &DomTree) -> Option<Self> {
        let modal = dom.get_element_by_id(MODAL_ID)?;
        let player = dom.get_element_by_id(MODAL_PLAYER_ID);
        let close_button = dom.get_elements_by_class_name(MODAL_CLOSE_CLASS).into_iter().next();
        Some(Self { modal, player, close_button, video_id: None })
    }

    pub fn node(&self) -> NodeId {
        self.modal
    }

    pub fn player(&self) -> Option<NodeId> {
        self.player
    }

    pub fn close_button(&self) -> Option<NodeId> {
        self.close_button
    }

    /// `data-video-id` of the card that opened the modal last
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn is_open(&self, dom: &DomTree) -> bool {
        dom.style(self.modal, "display") == Some("flex")
    }

    /// Show the modal for `card`
    pub fn open(&mut self, dom: &mut DomTree, card: NodeId) -> DomResult<()> {
        self.video_id = dom.get_attribute(card, "data-video-id");
        dom.set_style(self.modal, "display", "flex")?;
        tracing::debug!("Video modal opened for {:?}", self.video_id);
        Ok(())
    }

    /// Hide the modal, pause the player and drop its source
    pub fn close(&mut self, dom: &mut DomTree, media: &mut MediaRegistry) -> DomResult<()> {
        dom.set_style(self.modal, "display", "none")?;
        if let Some(player) = self.player.and_then(|p| media.get_mut(p)) {
            player.pause();
            player.set_src("");
        }
        tracing::debug!("Video modal closed");
        Ok(())
    }
}
