use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::config::Settings;
use crate::dom;

static MOBILE_USER_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern")
});

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_USER_AGENT.is_match(user_agent)
}

/// What the visitor's device can take, sampled once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    pub mobile: bool,
    pub low_end: bool,
    pub reduced_motion: bool,
}

impl DeviceProfile {
    pub fn detect(window: &Window, settings: &Settings) -> Self {
        let navigator = window.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();

        let mobile = is_mobile_user_agent(&user_agent)
            || dom::viewport_width(window) <= settings.mobile_max_width;

        let cores = navigator.hardware_concurrency();
        // deviceMemory is Chromium only, so it is read reflectively
        let memory = web_sys::js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
            .ok()
            .and_then(|v| v.as_f64());
        let low_end = is_low_end(cores, memory, settings);

        let reduced_motion = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false);

        let profile = Self { mobile, low_end, reduced_motion };
        debug!("Device profile: {:?}", profile);
        profile
    }

    pub fn wants_light_effects(&self) -> bool {
        self.mobile || self.low_end
    }

    pub fn allows_parallax(&self) -> bool {
        !self.mobile && !self.reduced_motion
    }

    /// Shortens transitions and tags the body so the stylesheet can drop
    /// expensive effects.
    pub fn apply(&self, document: &Document) {
        if !self.wants_light_effects() {
            return;
        }
        if let Some(root) = document.document_element() {
            if let Ok(root) = root.dyn_into::<HtmlElement>() {
                dom::set_style(&root, "--transition", "all 0.2s ease");
            }
        }
        if let Some(body) = document.body() {
            dom::set_class(&body, "mobile-optimized", true);
        }
    }
}

/// A browser that doesn't report a number (memory, or cores as 0) is not
/// counted against.
pub fn is_low_end(cores: f64, memory_gb: Option<f64>, settings: &Settings) -> bool {
    let few_cores = cores > 0.0 && cores <= settings.low_end_cores;
    let little_memory = memory_gb.map_or(false, |gb| gb <= settings.low_end_memory_gb);
    few_cores || little_memory
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_mobile_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("opera mini/36.2"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
    }

    #[test]
    fn low_end_thresholds() {
        let settings = Settings::default();
        assert!(is_low_end(2.0, None, &settings));
        assert!(is_low_end(8.0, Some(1.0), &settings));
        assert!(!is_low_end(8.0, Some(8.0), &settings));
        assert!(!is_low_end(0.0, None, &settings));
    }

    #[test]
    fn parallax_needs_desktop_and_motion() {
        let desktop = DeviceProfile::default();
        assert!(desktop.allows_parallax());
        assert!(!desktop.wants_light_effects());

        let phone = DeviceProfile { mobile: true, ..Default::default() };
        assert!(!phone.allows_parallax());
        assert!(phone.wants_light_effects());

        let calm = DeviceProfile { reduced_motion: true, ..Default::default() };
        assert!(!calm.allows_parallax());
    }
}
