use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block a page can use
/// to override any of the defaults below.
pub const SETTINGS_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty when running a dev build locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tunable thresholds and timings. Offsets are CSS pixels, durations are
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scrolled_offset: f64,
    pub hide_offset: f64,
    pub hide_min_delta: f64,
    pub mobile_noise_delta: f64,
    pub mobile_header_delay_ms: u32,

    pub anchor_gutter: f64,
    pub fallback_header_height: f64,

    pub active_line_offset: f64,
    pub mobile_active_interval_ms: u32,

    pub accordion_open_ms: u32,
    pub accordion_close_ms: u32,
    pub accordion_padding: f64,
    pub accordion_scroll_delay_ms: u32,
    pub first_open_ms: u32,

    pub ripple_ms: u32,

    pub mobile_max_width: f64,
    pub low_end_cores: f64,
    pub low_end_memory_gb: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scrolled_offset: 50.0,
            hide_offset: 200.0,
            hide_min_delta: 10.0,
            mobile_noise_delta: 5.0,
            mobile_header_delay_ms: 16,
            anchor_gutter: 20.0,
            fallback_header_height: 70.0,
            active_line_offset: 100.0,
            mobile_active_interval_ms: 100,
            accordion_open_ms: 400,
            accordion_close_ms: 300,
            accordion_padding: 40.0,
            accordion_scroll_delay_ms: 200,
            first_open_ms: 400,
            ripple_ms: 600,
            mobile_max_width: 768.0,
            low_end_cores: 2.0,
            low_end_memory_gb: 2.0,
        }
    }
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the page's override block if there is one. A broken block is
    /// reported and ignored so the page still gets working defaults.
    pub fn from_document(document: &Document) -> Self {
        let raw = match document
            .get_element_by_id(SETTINGS_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring #{}: {}", SETTINGS_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings = Settings::from_json(r#"{ "hide_offset": 320, "ripple_ms": 450 }"#).unwrap();
        assert_eq!(settings.hide_offset, 320.0);
        assert_eq!(settings.ripple_ms, 450);
        assert_eq!(settings.scrolled_offset, 50.0);
        assert_eq!(settings.accordion_close_ms, 300);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::from_json("{ hide_offset: }").is_err());
        assert!(Settings::from_json(r#"{ "ripple_ms": -3 }"#).is_err());
    }
}
