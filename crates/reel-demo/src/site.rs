//! Demo document: the portfolio landing page

use reel_dom::{DomResult, DomTree, ElementGeometry, NodeId};

/// Nodes the scripted session pokes at
pub struct DemoSite {
    pub dom: DomTree,
    pub work_link: NodeId,
    pub brand: NodeId,
    pub showreel: NodeId,
    pub alert_close: NodeId,
    pub card: NodeId,
    pub modal_close: NodeId,
}

pub fn build() -> DomResult<DemoSite> {
    let mut dom = DomTree::new();
    let html = dom.append_element(dom.root(), "html", &[("lang", "en")])?;
    let head = dom.append_element(html, "head", &[])?;
    let title = dom.append_element(head, "title", &[])?;
    dom.set_text_content(title, "Dex Volkov | Motion Design")?;
    let body = dom.append_element(html, "body", &[])?;

    let navbar = dom.append_element(body, "nav", &[("class", "navbar")])?;
    place(&mut dom, navbar, ElementGeometry::new(0.0, 0.0, 1280.0, 80.0));
    let brand = dom.append_element(navbar, "a", &[("class", "navbar-brand"), ("href", "/")])?;
    dom.set_text_content(brand, "DEX VOLKOV")?;
    let work_link = dom.append_element(navbar, "a", &[("class", "nav-link"), ("href", "#work")])?;
    dom.set_text_content(work_link, "Work")?;
    let contact_link = dom.append_element(navbar, "a", &[("class", "nav-link"), ("href", "#contact")])?;
    dom.set_text_content(contact_link, "Contact")?;

    let alert = dom.append_element(body, "div", &[("class", "alert alert-success")])?;
    let message = dom.append_element(alert, "span", &[])?;
    dom.set_text_content(message, "Thanks, your message was sent.")?;
    let alert_close = dom.append_element(alert, "button", &[("class", "alert-close")])?;
    dom.set_text_content(alert_close, "×")?;

    let hero = dom.append_element(body, "section", &[("class", "hero")])?;
    let headline = dom.append_element(hero, "h1", &[])?;
    dom.set_text_content(headline, "Motion that moves.")?;
    let showreel = dom.append_element(hero, "video", &[("poster", "/static/poster.jpg")])?;
    dom.append_element(showreel, "source", &[("src", "/static/showreel.mp4"), ("type", "video/mp4")])?;

    let work = dom.append_element(body, "section", &[("id", "work")])?;
    place(&mut dom, work, ElementGeometry::new(0.0, 960.0, 1280.0, 1200.0));
    let mut cards = Vec::new();
    for (id, name) in [("101", "Neon Drift"), ("102", "Static Bloom"), ("103", "Low Orbit")] {
        let card = dom.append_element(work, "div", &[("class", "video-card"), ("data-video-id", id)])?;
        let h3 = dom.append_element(card, "h3", &[])?;
        dom.set_text_content(h3, name)?;
        cards.push(card);
    }
    let card = cards[0];

    let contact = dom.append_element(body, "section", &[("id", "contact")])?;
    place(&mut dom, contact, ElementGeometry::new(0.0, 2300.0, 1280.0, 600.0));

    let modal = dom.append_element(body, "div", &[("id", "video-modal"), ("class", "video-modal")])?;
    let content = dom.append_element(modal, "div", &[("class", "modal-content")])?;
    let modal_close = dom.append_element(content, "span", &[("class", "modal-close")])?;
    dom.set_text_content(modal_close, "×")?;
    dom.append_element(content, "video", &[("id", "modal-player"), ("src", "/static/placeholder.mp4")])?;

    Ok(DemoSite { dom, work_link, brand, showreel, alert_close, card, modal_close })
}

/// Stand-in for layout
fn place(dom: &mut DomTree, node: NodeId, geometry: ElementGeometry) {
    if let Some(el) = dom.element_mut(node) {
        el.geometry = geometry;
    }
}
