use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, Node, Window};

use crate::components::effects::{self, NAV_TOGGLE_RIPPLE};
use crate::config::Settings;
use crate::device::DeviceProfile;
use crate::dom::{self, selectors};
use crate::error::InitResult;
use crate::frame::FrameScheduler;
use crate::state::header::{HeaderScrollState, HeaderThresholds};
use crate::state::nav::{NavState, NavView};
use crate::state::sections::{self, SectionBounds};

/// Mobile menu, header scroll styling, anchor scrolling and the active nav
/// link.
pub struct NavigationController {
    window: Window,
    document: Document,
    body: HtmlElement,
    toggle: HtmlElement,
    menu: HtmlElement,
    header: Option<HtmlElement>,
    settings: Rc<Settings>,

    state: Cell<NavState>,
    header_state: RefCell<HeaderScrollState>,
    header_thresholds: HeaderThresholds,
    header_frames: FrameScheduler,
    section_frames: FrameScheduler,
}

impl NavigationController {
    pub fn init(
        window: &Window,
        document: &Document,
        settings: Rc<Settings>,
        device: &DeviceProfile,
    ) -> InitResult<Rc<Self>> {
        let toggle = dom::require_html(document, selectors::NAV_TOGGLE)?;
        let menu = dom::require_html(document, selectors::NAV_MENU)?;

        let header = dom::query_html(document, selectors::HEADER);
        if header.is_none() {
            warn!("Header `{}` not found, header effects disabled", selectors::HEADER);
        }
        let body = dom::body(document)?;

        let header_thresholds = HeaderThresholds::from_settings(&settings, device.mobile);
        let header_state = HeaderScrollState::new(dom::scroll_y(window), &header_thresholds);
        let (header_delay, section_delay) = if device.mobile {
            (
                Some(settings.mobile_header_delay_ms),
                Some(settings.mobile_active_interval_ms),
            )
        } else {
            (None, None)
        };

        let controller = Rc::new(Self {
            window: window.clone(),
            document: document.clone(),
            body,
            toggle,
            menu,
            header,
            settings,
            state: Cell::new(NavState::closed()),
            header_state: RefCell::new(header_state),
            header_thresholds,
            header_frames: FrameScheduler::new(window.clone(), header_delay),
            section_frames: FrameScheduler::new(window.clone(), section_delay),
        });

        controller.render(NavState::closed().view());
        controller.render_header(&header_state);
        controller.wire()?;
        controller.update_active_section();

        info!("Navigation initialized");
        Ok(controller)
    }

    fn wire(self: &Rc<Self>) -> InitResult<()> {
        {
            let controller = self.clone();
            dom::listen(&self.toggle, "click", move |e: MouseEvent| {
                e.prevent_default();
                e.stop_propagation();
                controller.toggle();
                effects::spawn_ripple(
                    &controller.document,
                    &controller.toggle,
                    &e,
                    &NAV_TOGGLE_RIPPLE,
                    controller.settings.ripple_ms,
                );
            })?;
        }

        let menu_links = dom::query_all_html(&self.document, selectors::NAV_MENU_LINK);
        for link in &menu_links {
            let controller = self.clone();
            dom::listen(link, "click", move |_: MouseEvent| {
                controller.close_on_link_activation();
            })?;
        }

        {
            let controller = self.clone();
            dom::listen(&self.document, "click", move |e: MouseEvent| {
                let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
                controller.close_on_outside_interaction(target.as_ref());
            })?;
        }

        {
            let controller = self.clone();
            dom::listen(&self.document, "keydown", move |e: KeyboardEvent| {
                controller.close_on_escape(&e.key());
            })?;
        }

        let anchors = dom::query_all_html(&self.document, selectors::ANCHOR);
        for anchor in &anchors {
            let controller = self.clone();
            let href_source = anchor.clone();
            dom::listen(anchor, "click", move |e: MouseEvent| {
                let href = href_source.get_attribute("href").unwrap_or_default();
                if let Some(id) = dom::anchor_id(&href) {
                    if controller.smooth_scroll_to(id) {
                        e.prevent_default();
                    }
                }
            })?;
        }

        {
            let controller = self.clone();
            dom::listen_passive(&self.window, "scroll", move || {
                if controller.header.is_some() {
                    let next = controller.clone();
                    controller
                        .header_frames
                        .schedule(move || next.on_scroll_sample(dom::scroll_y(&next.window)));
                }
                let next = controller.clone();
                controller
                    .section_frames
                    .schedule(move || next.update_active_section());
            })?;
        }

        debug!(
            "Navigation wired: {} menu links, {} anchors",
            menu_links.len(),
            anchors.len()
        );
        Ok(())
    }

    pub fn toggle(&self) {
        self.apply(self.state.get().toggled());
    }

    /// Forces the menu closed. Does nothing if it already is.
    pub fn close(&self) {
        self.apply(NavState::closed());
    }

    pub fn close_on_outside_interaction(&self, target: Option<&Node>) {
        let in_toggle = self.toggle.contains(target);
        let in_menu = self.menu.contains(target);
        self.apply(self.state.get().after_interaction(in_toggle, in_menu));
    }

    pub fn close_on_escape(&self, key: &str) {
        self.apply(self.state.get().after_key(key));
    }

    pub fn close_on_link_activation(&self) {
        self.apply(self.state.get().after_link_activation());
    }

    fn apply(&self, next: NavState) {
        if next == self.state.get() {
            return;
        }
        debug!("Menu {}", if next.expanded { "opened" } else { "closed" });
        self.state.set(next);
        self.render(next.view());
    }

    /// Scrolls so the element with `anchor_id` sits just below the header,
    /// then closes the menu. Returns `false` if there's no such element.
    pub fn smooth_scroll_to(&self, anchor_id: &str) -> bool {
        let Some(target) = self.document.get_element_by_id(anchor_id) else {
            debug!("No element for #{}", anchor_id);
            return false;
        };

        let element_top = match target.dyn_ref::<HtmlElement>() {
            Some(el) => el.offset_top() as f64,
            None => target.get_bounding_client_rect().top() + dom::scroll_y(&self.window),
        };
        let header_height =
            dom::header_height(self.header.as_ref(), self.settings.fallback_header_height);

        dom::smooth_scroll_to(
            &self.window,
            element_top - header_height - self.settings.anchor_gutter,
        );
        self.close();
        true
    }

    pub fn on_scroll_sample(&self, offset: f64) {
        let snapshot = {
            let mut state = self.header_state.borrow_mut();
            if !state.sample(offset, &self.header_thresholds) {
                return;
            }
            *state
        };
        self.render_header(&snapshot);
    }

    pub fn update_active_section(&self) {
        let measured: Vec<(String, f64, f64)> =
            dom::query_all_html(&self.document, selectors::SECTION)
                .iter()
                .map(|section| {
                    let rect = section.get_bounding_client_rect();
                    (section.id(), rect.top(), rect.bottom())
                })
                .collect();

        let active = sections::active_section(
            measured.iter().map(|(id, top, bottom)| SectionBounds {
                id: id.as_str(),
                top: *top,
                bottom: *bottom,
            }),
            self.settings.active_line_offset,
        );

        for link in dom::query_all_html(&self.document, selectors::NAV_SECTION_LINK) {
            let href = link.get_attribute("href").unwrap_or_default();
            dom::set_class(&link, "active", sections::link_is_active(&href, active));
        }
    }

    fn render(&self, view: NavView) {
        let _ = self
            .toggle
            .set_attribute("aria-expanded", dom::bool_attr(view.aria_expanded));
        let _ = self
            .menu
            .set_attribute("aria-hidden", dom::bool_attr(view.aria_hidden));

        if view.lock_body_scroll {
            dom::set_style(&self.body, "overflow", "hidden");
            dom::set_style(&self.body, "position", "fixed");
            dom::set_style(&self.body, "width", "100%");
        } else {
            dom::clear_style(&self.body, "overflow");
            dom::clear_style(&self.body, "position");
            dom::clear_style(&self.body, "width");
        }
    }

    fn render_header(&self, state: &HeaderScrollState) {
        if let Some(header) = &self.header {
            dom::set_class(header, "scrolled", state.scrolled());
            dom::set_style(header, "transform", state.transform());
        }
    }
}
