use std::rc::Rc;

use log::info;
use web_sys::{Document, Window};

use crate::device::DeviceProfile;
use crate::dom::{self, selectors};
use crate::error::InitResult;
use crate::frame::FrameScheduler;

/// A section whose decorations drift while it is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub section: &'static str,
    pub decorations: &'static str,
    pub base_speed: f64,
    pub rotation_rate: f64,
}

pub const LAYERS: [ParallaxLayer; 2] = [
    ParallaxLayer {
        section: selectors::HERO,
        decorations: selectors::HERO_DECORATION,
        base_speed: 0.02,
        rotation_rate: 0.02,
    },
    ParallaxLayer {
        section: selectors::FEATURES,
        decorations: selectors::FEATURES_DECORATION,
        base_speed: 0.03,
        rotation_rate: 0.03,
    },
];

const SPEED_STEP: f64 = 0.01;

/// Later decorations move faster, which gives the layered depth.
pub fn decoration_transform(layer: &ParallaxLayer, index: usize, offset: f64) -> String {
    let speed = layer.base_speed + index as f64 * SPEED_STEP;
    let y = -(offset * speed);
    format!("translateY({}px) rotate({}deg)", y, offset * layer.rotation_rate)
}

pub fn is_on_screen(top: f64, bottom: f64, viewport_height: f64) -> bool {
    bottom >= 0.0 && top <= viewport_height
}

pub struct ParallaxController {
    window: Window,
    document: Document,
    frames: FrameScheduler,
}

impl ParallaxController {
    /// Returns `Ok(None)` when the device shouldn't run parallax at all.
    pub fn init(
        window: &Window,
        document: &Document,
        device: &DeviceProfile,
    ) -> InitResult<Option<Rc<Self>>> {
        if !device.allows_parallax() {
            info!("Parallax disabled for this device");
            return Ok(None);
        }

        let controller = Rc::new(Self {
            window: window.clone(),
            document: document.clone(),
            frames: FrameScheduler::new(window.clone(), None),
        });

        {
            let controller = controller.clone();
            dom::listen_passive(window, "scroll", move || {
                let next = controller.clone();
                controller.frames.schedule(move || next.render());
            })?;
        }

        info!("Parallax initialized");
        Ok(Some(controller))
    }

    fn render(&self) {
        let offset = dom::scroll_y(&self.window);
        let viewport_height = dom::viewport_height(&self.window);

        for layer in &LAYERS {
            let decorations = dom::query_all_html(&self.document, layer.decorations);
            if decorations.is_empty() {
                continue;
            }
            let Some(section) = dom::query_html(&self.document, layer.section) else {
                continue;
            };
            let rect = section.get_bounding_client_rect();
            if !is_on_screen(rect.top(), rect.bottom(), viewport_height) {
                continue;
            }
            for (index, el) in decorations.iter().enumerate() {
                dom::set_style(el, "transform", &decoration_transform(layer, index, offset));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_decorations_drift_up_and_rotate() {
        let hero = &LAYERS[0];
        assert_eq!(decoration_transform(hero, 0, 100.0), "translateY(-2px) rotate(2deg)");
        assert_eq!(decoration_transform(hero, 2, 100.0), "translateY(-4px) rotate(2deg)");
        assert_eq!(decoration_transform(hero, 0, 0.0), "translateY(-0px) rotate(0deg)");
    }

    #[test]
    fn features_move_faster_than_hero() {
        let features = &LAYERS[1];
        assert_eq!(decoration_transform(features, 0, 200.0), "translateY(-6px) rotate(6deg)");
    }

    #[test]
    fn visibility_window() {
        assert!(is_on_screen(-300.0, 0.0, 800.0));
        assert!(is_on_screen(800.0, 1200.0, 800.0));
        assert!(!is_on_screen(-300.0, -1.0, 800.0));
        assert!(!is_on_screen(801.0, 1200.0, 800.0));
    }
}
