use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::components::effects::{self, ACCORDION_RIPPLE};
use crate::config::Settings;
use crate::dom::{self, selectors};
use crate::error::InitResult;
use crate::state::accordion::{
    self, AccordionState, HeaderKey, PanelPhase, PendingSettles, SettleToken, Transition,
};

const STYLE_ID: &str = "accordion-effects";
const STYLE: &str = r#"
@keyframes accordionRipple {
    to {
        transform: scale(2);
        opacity: 0;
    }
}
.accordion-header {
    position: relative;
    overflow: hidden;
}
"#;

struct Panel {
    header: HtmlElement,
    content: HtmlElement,
    item: Option<Element>,
    content_id: String,
}

/// Exclusive accordion: opening one panel closes whichever other was open.
pub struct AccordionController {
    window: Window,
    document: Document,
    settings: Rc<Settings>,
    panels: Vec<Panel>,
    state: RefCell<AccordionState>,
    settles: RefCell<PendingSettles<Timeout>>,
    scroll_timer: RefCell<Option<Timeout>>,
}

impl AccordionController {
    pub fn init(
        window: &Window,
        document: &Document,
        settings: Rc<Settings>,
    ) -> InitResult<Rc<Self>> {
        let mut panels = Vec::new();
        for header in dom::query_all_html(document, selectors::ACCORDION_HEADER) {
            let Some(content_id) = header.get_attribute("aria-controls") else {
                debug!("Accordion header without aria-controls, skipping");
                continue;
            };
            let Some(content) = document
                .get_element_by_id(&content_id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                debug!("Accordion content #{} missing, skipping", content_id);
                continue;
            };
            let item = header.closest(selectors::ACCORDION_ITEM).ok().flatten();

            let _ = header.set_attribute("aria-expanded", "false");
            let _ = content.set_attribute("aria-hidden", "true");

            panels.push(Panel {
                header,
                content,
                item,
                content_id,
            });
        }

        let controller = Rc::new(Self {
            window: window.clone(),
            document: document.clone(),
            settings,
            state: RefCell::new(AccordionState::with_emphasis(
                panels.iter().map(|panel| panel.item.is_some()).collect(),
            )),
            settles: RefCell::new(PendingSettles::new(panels.len())),
            panels,
            scroll_timer: RefCell::new(None),
        });

        effects::inject_style(document, STYLE_ID, STYLE);
        controller.wire()?;

        info!(
            "{} accordions initialized (all closed)",
            controller.panels.len()
        );
        Ok(controller)
    }

    fn wire(self: &Rc<Self>) -> InitResult<()> {
        for (index, panel) in self.panels.iter().enumerate() {
            {
                let controller = self.clone();
                dom::listen(&panel.header, "click", move |e: MouseEvent| {
                    let header = &controller.panels[index].header;
                    effects::spawn_ripple(
                        &controller.document,
                        header,
                        &e,
                        &ACCORDION_RIPPLE,
                        controller.settings.ripple_ms,
                    );
                    controller.activate(index);
                })?;
            }

            {
                let controller = self.clone();
                dom::listen(&panel.header, "keydown", move |e: KeyboardEvent| {
                    let Some(key) = HeaderKey::from_key(&e.key()) else {
                        return;
                    };
                    e.prevent_default();
                    let len = controller.panels.len();
                    match key {
                        HeaderKey::Activate => controller.activate(index),
                        HeaderKey::Next => controller.focus(accordion::next_index(index, len)),
                        HeaderKey::Previous => {
                            controller.focus(accordion::previous_index(index, len))
                        }
                    }
                })?;
            }

            let header = panel.header.clone();
            dom::listen(&panel.header, "focus", move |_: Event| {
                dom::set_style(&header, "outline", "2px solid var(--primary)");
                dom::set_style(&header, "outline-offset", "2px");
            })?;

            let header = panel.header.clone();
            dom::listen(&panel.header, "blur", move |_: Event| {
                dom::set_style(&header, "outline", "none");
            })?;
        }
        Ok(())
    }

    /// Click, Enter or Space on the header at `index`.
    pub fn activate(self: &Rc<Self>, index: usize) {
        let transitions = self.state.borrow_mut().activate(index);

        for transition in transitions {
            match transition {
                Transition::Open { index, first_open } => {
                    self.begin_open(index, first_open);
                    self.scroll_into_view(index);
                    info!("Accordion {} opened", self.panels[index].content_id);
                }
                Transition::Close { index } => {
                    self.begin_close(index);
                    info!("Accordion {} closed", self.panels[index].content_id);
                }
            }
        }
    }

    pub fn focus(&self, index: usize) {
        if let Some(panel) = self.panels.get(index) {
            let _ = panel.header.focus();
        }
    }

    fn begin_open(self: &Rc<Self>, index: usize, first_open: bool) {
        let panel = &self.panels[index];
        let content = &panel.content;
        // cancels a settle still pending from the previous transition
        self.settles.borrow_mut().cancel(index);

        let _ = panel.header.set_attribute("aria-expanded", "true");
        let _ = content.set_attribute("aria-hidden", "false");

        // Unconstrain first so scrollHeight is the natural height
        dom::set_style(content, "display", "block");
        dom::set_style(content, "max-height", "none");
        dom::set_style(content, "opacity", "0");
        dom::set_style(content, "transform", "translateY(-10px)");
        let natural_height = content.scroll_height() as f64;

        dom::set_style(content, "max-height", "0");
        dom::set_style(content, "padding-top", "0");
        dom::set_style(content, "padding-bottom", "0");
        dom::set_class(content, "accordion-closing", false);
        dom::set_class(content, "accordion-opening", true);

        let target = format!("{}px", natural_height + self.settings.accordion_padding);
        let animated = content.clone();
        dom::request_frame(&self.window, move || {
            dom::set_style(&animated, "max-height", &target);
            dom::set_style(&animated, "padding-top", "1.5rem");
            dom::set_style(&animated, "padding-bottom", "1.5rem");
            dom::set_style(&animated, "opacity", "1");
            dom::set_style(&animated, "transform", "translateY(0)");
        });

        dom::set_class(&panel.header, "accordion-active", true);
        if let Some(item) = &panel.item {
            dom::set_class(item, "accordion-expanded", true);
            if first_open {
                dom::set_class(item, "first-open", true);
                let item = item.clone();
                Timeout::new(self.settings.first_open_ms, move || {
                    dom::set_class(&item, "first-open", false);
                })
                .forget();
            }
        }

        self.arm_settle(index, self.settings.accordion_open_ms);
    }

    fn begin_close(self: &Rc<Self>, index: usize) {
        let panel = &self.panels[index];
        let content = &panel.content;
        self.settles.borrow_mut().cancel(index);

        let _ = panel.header.set_attribute("aria-expanded", "false");
        let _ = content.set_attribute("aria-hidden", "true");

        let current_height = content.scroll_height();
        dom::set_style(content, "max-height", &format!("{}px", current_height));
        dom::set_class(content, "accordion-opening", false);
        dom::set_class(content, "accordion-closing", true);

        dom::set_class(&panel.header, "accordion-active", false);
        if let Some(item) = &panel.item {
            dom::set_class(item, "accordion-expanded", false);
        }

        let animated = content.clone();
        dom::request_frame(&self.window, move || {
            dom::set_style(&animated, "max-height", "0");
            dom::set_style(&animated, "padding-top", "0");
            dom::set_style(&animated, "padding-bottom", "0");
            dom::set_style(&animated, "opacity", "0");
            dom::set_style(&animated, "transform", "translateY(-15px)");
        });

        self.arm_settle(index, self.settings.accordion_close_ms);
    }

    fn arm_settle(self: &Rc<Self>, index: usize, delay_ms: u32) {
        let controller: Weak<Self> = Rc::downgrade(self);
        self.settles.borrow_mut().arm(index, |token| {
            Timeout::new(delay_ms, move || {
                if let Some(controller) = controller.upgrade() {
                    controller.finish(index, token);
                }
            })
        });
    }

    fn finish(&self, index: usize, token: SettleToken) {
        if !self.settles.borrow_mut().fire(index, token) {
            return;
        }
        let phase = self.state.borrow_mut().settle(index);
        let content = &self.panels[index].content;
        match phase {
            Some(PanelPhase::Open) => {
                dom::set_style(content, "max-height", "none");
                dom::set_class(content, "accordion-opening", false);
            }
            Some(PanelPhase::Closed) => {
                dom::set_style(content, "display", "none");
                dom::set_class(content, "accordion-closing", false);
            }
            _ => {}
        }
    }

    /// Brings a freshly opened header below the fixed page header once the
    /// panel has started growing.
    fn scroll_into_view(&self, index: usize) {
        let header = self.panels[index].header.clone();
        let window = self.window.clone();
        let page_header = dom::query_html(&self.document, selectors::HEADER);
        let fallback = self.settings.fallback_header_height;
        let gutter = self.settings.anchor_gutter;

        let timer = Timeout::new(self.settings.accordion_scroll_delay_ms, move || {
            let top = header.get_bounding_client_rect().top() + dom::scroll_y(&window);
            let offset = dom::header_height(page_header.as_ref(), fallback);
            dom::smooth_scroll_to(&window, top - offset - gutter);
        });
        *self.scroll_timer.borrow_mut() = Some(timer);
    }
}
