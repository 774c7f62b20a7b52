use std::rc::Rc;

use log::{error, info};
use web_sys::{Document, Event, Window};

pub mod config;
pub mod device;
pub mod dom;
pub mod error;
pub mod frame;

pub mod state {
    pub mod accordion;
    pub mod header;
    pub mod nav;
    pub mod sections;
}

pub mod components {
    pub mod effects;
}

pub mod controllers {
    pub mod accordion;
    pub mod navigation;
    pub mod parallax;
}

use config::Settings;
use controllers::{
    accordion::AccordionController, navigation::NavigationController,
    parallax::ParallaxController,
};
use device::DeviceProfile;
use error::{InitError, InitResult};

/// Set on `<html>` by the first `start` on a document.
pub const PAGE_MARKER: &str = "data-landing-initialized";

/// A document is claimed once. Any later claim sees the marker and backs off
/// before a single listener is attached.
pub fn claim_page(existing_marker: Option<&str>) -> InitResult<()> {
    match existing_marker {
        Some(_) => Err(InitError::AlreadyInitialized),
        None => Ok(()),
    }
}

/// Attaches every controller once the page's markup is available, right away
/// if the document has already finished parsing.
pub fn start() -> InitResult<()> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    let root = document.document_element().ok_or(InitError::NoDocument)?;
    claim_page(root.get_attribute(PAGE_MARKER).as_deref())?;
    root.set_attribute(PAGE_MARKER, "true")?;

    if document.ready_state() == "loading" {
        info!("Document still loading, waiting for DOMContentLoaded");
        let loaded = document.clone();
        dom::listen(&document, "DOMContentLoaded", move |_: Event| {
            init_page(&window, &loaded);
        })?;
    } else {
        init_page(&window, &document);
    }
    Ok(())
}

/// Each controller fails on its own; a broken nav never takes the accordions
/// down with it.
fn init_page(window: &Window, document: &Document) {
    let settings = Rc::new(Settings::from_document(document));
    let device = DeviceProfile::detect(window, &settings);
    device.apply(document);

    if let Err(e) = NavigationController::init(window, document, settings.clone(), &device) {
        error!("Navigation not initialized: {}", e);
    }

    if let Err(e) = AccordionController::init(window, document, settings.clone()) {
        error!("Accordions not initialized: {}", e);
    }

    if let Err(e) = ParallaxController::init(window, document, &device) {
        error!("Parallax not initialized: {}", e);
    }

    if let Err(e) = components::effects::init_keyboard_navigation(document) {
        error!("Keyboard navigation flag not initialized: {}", e);
    }
    if let Err(e) = components::effects::init_link_hover(document) {
        error!("Nav link hover not initialized: {}", e);
    }

    info!("Landing page initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_claimed_only_once() {
        assert!(claim_page(None).is_ok());
        assert!(matches!(
            claim_page(Some("true")),
            Err(InitError::AlreadyInitialized)
        ));
        // any value counts, the attribute's presence is the claim
        assert!(matches!(
            claim_page(Some("")),
            Err(InitError::AlreadyInitialized)
        ));
    }
}
