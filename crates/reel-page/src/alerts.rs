//! Dismissible alerts

use std::time::Duration;

use reel_dom::{DomResult, DomTree, NodeId};

use crate::config::css_seconds;

pub const ALERT_CLOSE_CLASS: &str = "alert-close";

/// Start fading out the alert holding `close_button`.
///
/// Returns the alert to remove once the fade has run.
pub fn begin_dismiss(dom: &mut DomTree, close_button: NodeId, fade: Duration) -> DomResult<Option<NodeId>> {
    let alert = dom.parent(close_button);
    if dom.element(alert).is_none() {
        return Ok(None);
    }
    dom.set_style(alert, "animation", &format!("fadeOut {} ease", css_seconds(fade)))?;
    Ok(Some(alert))
}

/// Remove a faded alert. An alert already gone is left alone.
pub fn finish_dismiss(dom: &mut DomTree, alert: NodeId) -> DomResult<()> {
    if !dom.parent(alert).is_valid() {
        return Ok(());
    }
    dom.remove(alert)?;
    tracing::debug!("Alert {} dismissed", alert);
    Ok(())
}
