//! Thin helpers over `web_sys` shared by every controller.
//!
//! Lookups return `Option`s for things a page may legitimately omit and
//! `InitResult` for structural elements a controller cannot run without.
//! Writes whose failure has nothing sensible to recover to are discarded.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::error::{InitError, InitResult};

pub mod selectors {
    pub const NAV_TOGGLE: &str = ".nav-toggle";
    pub const NAV_MENU: &str = ".nav-mobile";
    pub const NAV_MENU_LINK: &str = ".nav-mobile-link";
    pub const NAV_ANY_LINK: &str = ".nav-link, .nav-mobile-link";
    pub const NAV_SECTION_LINK: &str = ".nav-link[href^=\"#\"], .nav-mobile-link[href^=\"#\"]";
    pub const HEADER: &str = ".header";
    pub const SECTION: &str = "section[id]";
    pub const ANCHOR: &str = "a[href^=\"#\"]";
    pub const ACCORDION_HEADER: &str = ".accordion-header";
    pub const ACCORDION_ITEM: &str = ".accordion-item";
    pub const HERO: &str = ".hero";
    pub const HERO_DECORATION: &str = ".hero-bg-element";
    pub const FEATURES: &str = ".features";
    pub const FEATURES_DECORATION: &str = ".features-bg-element";
}

pub fn window() -> InitResult<Window> {
    web_sys::window().ok_or(InitError::NoWindow)
}

pub fn document(window: &Window) -> InitResult<Document> {
    window.document().ok_or(InitError::NoDocument)
}

pub fn body(document: &Document) -> InitResult<HtmlElement> {
    document.body().ok_or(InitError::NoBody)
}

pub fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn require_html(document: &Document, selector: &'static str) -> InitResult<HtmlElement> {
    query_html(document, selector).ok_or(InitError::MissingElement(selector))
}

pub fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let mut found = Vec::new();
    if let Ok(list) = document.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|node| node.dyn_into::<HtmlElement>().ok()) {
                found.push(el);
            }
        }
    }
    found
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

/// Adds or removes `class`, touching the token list only when it changes.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    if on {
        if !list.contains(class) {
            let _ = list.add_1(class);
        }
    } else if list.contains(class) {
        let _ = list.remove_1(class);
    }
}

pub fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Registers `handler` for the page's lifetime. Events that are not an `E`
/// are dropped.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> InitResult<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Same as [`listen`] but registered as passive, for scroll handlers.
pub fn listen_passive<F>(target: &EventTarget, event: &str, mut handler: F) -> InitResult<()>
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

pub fn request_frame<F>(window: &Window, f: F)
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    let _ = window.request_animation_frame(callback.unchecked_ref());
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Header height used when offsetting scroll targets.
pub fn header_height(header: Option<&HtmlElement>, fallback: f64) -> f64 {
    match header {
        Some(header) => header.offset_height() as f64,
        None => fallback,
    }
}

/// `"#pricing"` -> `Some("pricing")`. Bare `"#"` and non-fragment hrefs have no
/// anchor.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_id_strips_the_hash() {
        assert_eq!(anchor_id("#features"), Some("features"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("/pricing"), None);
        assert_eq!(anchor_id(""), None);
    }

    #[test]
    fn bool_attr_matches_aria_spelling() {
        assert_eq!(bool_attr(true), "true");
        assert_eq!(bool_attr(false), "false");
    }
}
