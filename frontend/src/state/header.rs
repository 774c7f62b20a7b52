use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderThresholds {
    pub scrolled_offset: f64,
    pub hide_offset: f64,
    pub hide_min_delta: f64,
    /// Samples moving less than this are dropped. `None` keeps every sample.
    pub noise_delta: Option<f64>,
}

impl HeaderThresholds {
    pub fn from_settings(settings: &Settings, mobile: bool) -> Self {
        Self {
            scrolled_offset: settings.scrolled_offset,
            hide_offset: settings.hide_offset,
            hide_min_delta: settings.hide_min_delta,
            noise_delta: mobile.then_some(settings.mobile_noise_delta),
        }
    }
}

impl Default for HeaderThresholds {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), false)
    }
}

/// Scroll-reactive header flags, recomputed from every accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderScrollState {
    last_offset: f64,
    hidden: bool,
    scrolled: bool,
}

impl HeaderScrollState {
    pub fn new(initial_offset: f64, thresholds: &HeaderThresholds) -> Self {
        Self {
            last_offset: initial_offset,
            hidden: false,
            scrolled: initial_offset > thresholds.scrolled_offset,
        }
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feeds one scroll offset. Returns `false` if the sample was dropped as
    /// noise, in which case nothing changed.
    pub fn sample(&mut self, offset: f64, thresholds: &HeaderThresholds) -> bool {
        let delta = (offset - self.last_offset).abs();
        if let Some(noise) = thresholds.noise_delta {
            if delta < noise {
                return false;
            }
        }

        let direction = if offset > self.last_offset {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };

        self.scrolled = offset > thresholds.scrolled_offset;

        if offset <= thresholds.hide_offset || direction == ScrollDirection::Up {
            self.hidden = false;
        } else if delta > thresholds.hide_min_delta {
            self.hidden = true;
        }
        // Small downward moves past the hide line keep whatever we had.

        self.last_offset = offset;
        true
    }

    pub fn transform(&self) -> &'static str {
        if self.hidden() {
            "translateY(-100%)"
        } else {
            "translateY(0)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(offsets: &[f64], thresholds: &HeaderThresholds) -> (Vec<bool>, Vec<bool>) {
        let mut state = HeaderScrollState::new(offsets[0], thresholds);
        let mut scrolled = Vec::new();
        let mut hidden = Vec::new();
        for &offset in offsets {
            state.sample(offset, thresholds);
            scrolled.push(state.scrolled());
            hidden.push(state.hidden());
        }
        (scrolled, hidden)
    }

    #[test]
    fn hides_on_deliberate_downward_scroll_and_returns_on_up() {
        let (scrolled, hidden) = run(&[0.0, 60.0, 210.0, 180.0], &HeaderThresholds::default());
        assert_eq!(scrolled, vec![false, true, true, true]);
        assert_eq!(hidden, vec![false, false, true, false]);
    }

    #[test]
    fn scrolled_tracks_offset_after_every_sample() {
        let thresholds = HeaderThresholds::default();
        let mut state = HeaderScrollState::new(0.0, &thresholds);
        for offset in [10.0, 50.0, 51.0, 400.0, 49.0, 0.0, 75.5, 1200.0] {
            state.sample(offset, &thresholds);
            assert_eq!(state.scrolled(), offset > 50.0, "offset {}", offset);
        }
    }

    #[test]
    fn never_hidden_at_or_above_hide_line() {
        let thresholds = HeaderThresholds::default();
        let mut state = HeaderScrollState::new(0.0, &thresholds);
        for offset in [150.0, 199.0, 200.0, 500.0, 200.0, 120.0, 190.0, 200.0] {
            state.sample(offset, &thresholds);
            if offset <= 200.0 {
                assert!(!state.hidden(), "hidden at {}", offset);
            }
        }
    }

    #[test]
    fn small_downward_step_keeps_previous_visibility() {
        let thresholds = HeaderThresholds::default();
        let mut state = HeaderScrollState::new(300.0, &thresholds);

        state.sample(305.0, &thresholds);
        assert!(!state.hidden());

        state.sample(400.0, &thresholds);
        assert!(state.hidden());
        state.sample(405.0, &thresholds);
        assert!(state.hidden());
        assert_eq!(state.transform(), "translateY(-100%)");
    }

    #[test]
    fn mobile_drops_jitter() {
        let thresholds = HeaderThresholds::from_settings(&Settings::default(), true);
        let mut state = HeaderScrollState::new(100.0, &thresholds);

        assert!(!state.sample(103.0, &thresholds));
        assert!(state.sample(30.0, &thresholds));
        assert!(!state.scrolled());
        // 30 -> 34 is under the noise floor, so the last offset is still 30
        assert!(!state.sample(34.0, &thresholds));
        assert!(state.sample(60.0, &thresholds));
        assert!(state.scrolled());
    }
}
