use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent};

use crate::dom::{self, selectors};
use crate::error::InitResult;

/// Colour and keyframe of one kind of ripple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleStyle {
    pub background: &'static str,
    pub animation: &'static str,
    pub z_index: Option<i32>,
}

pub const NAV_TOGGLE_RIPPLE: RippleStyle = RippleStyle {
    background: "rgba(1, 135, 95, 0.3)",
    animation: "ripple 0.6s ease-out",
    z_index: None,
};

pub const ACCORDION_RIPPLE: RippleStyle = RippleStyle {
    background: "rgba(0, 191, 255, 0.2)",
    animation: "accordionRipple 0.6s ease-out",
    z_index: Some(1),
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// A circle covering the host's larger side, centred on the click. `left` and
/// `top` are relative to the host.
pub fn ripple_geometry(
    host_left: f64,
    host_top: f64,
    host_width: f64,
    host_height: f64,
    client_x: f64,
    client_y: f64,
) -> RippleGeometry {
    let size = host_width.max(host_height);
    RippleGeometry {
        size,
        left: client_x - host_left - size / 2.0,
        top: client_y - host_top - size / 2.0,
    }
}

pub fn ripple_css(geometry: &RippleGeometry, style: &RippleStyle) -> String {
    let mut css = format!(
        "position: absolute; width: {size}px; height: {size}px; left: {left}px; top: {top}px; \
         background: {background}; border-radius: 50%; transform: scale(0); \
         animation: {animation}; pointer-events: none;",
        size = geometry.size,
        left = geometry.left,
        top = geometry.top,
        background = style.background,
        animation = style.animation,
    );
    if let Some(z) = style.z_index {
        css.push_str(&format!(" z-index: {};", z));
    }
    css
}

/// Drops a ripple into `host` at the click point and removes it once the
/// keyframe has run.
pub fn spawn_ripple(
    document: &Document,
    host: &HtmlElement,
    event: &MouseEvent,
    style: &RippleStyle,
    duration_ms: u32,
) {
    let Ok(ripple) = document.create_element("span") else {
        return;
    };

    let rect = host.get_bounding_client_rect();
    let geometry = ripple_geometry(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        event.client_x() as f64,
        event.client_y() as f64,
    );
    let _ = ripple.set_attribute("style", &ripple_css(&geometry, style));

    if host.append_child(&ripple).is_ok() {
        Timeout::new(duration_ms, move || ripple.remove()).forget();
    }
}

/// Appends a `<style>` block once per document.
pub fn inject_style(document: &Document, id: &str, css: &str) {
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };
    if let Ok(style) = document.create_element("style") {
        style.set_id(id);
        style.set_text_content(Some(css));
        let _ = head.append_child(&style);
    }
}

/// Focus rings only while the visitor is using the keyboard: `Tab` turns the
/// body flag on, any mouse press turns it off.
pub fn init_keyboard_navigation(document: &Document) -> InitResult<()> {
    let body = dom::body(document)?;

    {
        let body = body.clone();
        dom::listen(document, "keydown", move |e: KeyboardEvent| {
            if e.key() == "Tab" {
                dom::set_class(&body, "keyboard-navigation", true);
            }
        })?;
    }

    dom::listen(document, "mousedown", move |_: MouseEvent| {
        dom::set_class(&body, "keyboard-navigation", false);
    })?;

    Ok(())
}

pub fn init_link_hover(document: &Document) -> InitResult<()> {
    let links = dom::query_all_html(document, selectors::NAV_ANY_LINK);
    for link in &links {
        let target = link.clone();
        dom::listen(link, "mouseenter", move |_: MouseEvent| {
            dom::set_style(&target, "--hover-scale", "1.05");
        })?;

        let target = link.clone();
        dom::listen(link, "mouseleave", move |_: MouseEvent| {
            dom::set_style(&target, "--hover-scale", "1");
        })?;
    }
    debug!("Hover scaling on {} nav links", links.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_is_centred_on_click() {
        let g = ripple_geometry(100.0, 40.0, 48.0, 32.0, 130.0, 60.0);
        assert_eq!(g.size, 48.0);
        assert_eq!(g.left, 6.0);
        assert_eq!(g.top, -4.0);
    }

    #[test]
    fn ripple_uses_the_larger_side() {
        let g = ripple_geometry(0.0, 0.0, 320.0, 64.0, 160.0, 32.0);
        assert_eq!(g.size, 320.0);
        assert_eq!(g.left, 0.0);
        assert_eq!(g.top, -128.0);
    }

    #[test]
    fn css_carries_style_and_optional_layer() {
        let g = RippleGeometry { size: 10.0, left: 1.0, top: 2.0 };

        let nav = ripple_css(&g, &NAV_TOGGLE_RIPPLE);
        assert!(nav.contains("width: 10px; height: 10px; left: 1px; top: 2px;"));
        assert!(nav.contains("animation: ripple 0.6s ease-out;"));
        assert!(!nav.contains("z-index"));

        let accordion = ripple_css(&g, &ACCORDION_RIPPLE);
        assert!(accordion.contains("accordionRipple"));
        assert!(accordion.ends_with("z-index: 1;"));
    }
}
