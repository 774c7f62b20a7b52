/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub expanded: bool,
}

impl NavState {
    pub fn toggled(self) -> Self {
        Self { expanded: !self.expanded }
    }

    pub fn closed() -> Self {
        Self { expanded: false }
    }

    /// A click somewhere on the page closes the menu unless it landed on the
    /// toggle or inside the menu.
    pub fn after_interaction(self, in_toggle: bool, in_menu: bool) -> Self {
        if is_outside(in_toggle, in_menu) {
            Self::closed()
        } else {
            self
        }
    }

    pub fn after_key(self, key: &str) -> Self {
        if is_escape(key) {
            Self::closed()
        } else {
            self
        }
    }

    pub fn after_link_activation(self) -> Self {
        Self::closed()
    }

    pub fn view(self) -> NavView {
        NavView {
            aria_expanded: self.expanded,
            aria_hidden: !self.expanded,
            lock_body_scroll: self.expanded,
        }
    }
}

/// What the DOM should show for a given [`NavState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavView {
    pub aria_expanded: bool,
    pub aria_hidden: bool,
    pub lock_body_scroll: bool,
}

/// The menu only closes on an outside interaction, i.e. one that hit neither
/// the toggle nor the menu itself.
pub fn is_outside(in_toggle: bool, in_menu: bool) -> bool {
    !in_toggle && !in_menu
}

pub fn is_escape(key: &str) -> bool {
    key == "Escape"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_after_n_toggles_is_n_odd() {
        for n in 0..12u32 {
            let state = (0..n).fold(NavState::default(), |s, _| s.toggled());
            assert_eq!(state.expanded, n % 2 == 1, "after {} toggles", n);
        }
    }

    #[test]
    fn closing_is_idempotent() {
        let open = NavState::default().toggled();
        assert_eq!(NavState::closed(), NavState::default());
        assert!(open.expanded);
        assert!(!NavState::closed().toggled().toggled().expanded);
    }

    #[test]
    fn outside_click_escape_and_links_always_close() {
        for start in [NavState::closed(), NavState { expanded: true }] {
            assert!(!start.after_interaction(false, false).expanded);
            assert!(!start.after_key("Escape").expanded);
            assert!(!start.after_link_activation().expanded);
        }
    }

    #[test]
    fn clicks_on_menu_or_toggle_and_other_keys_keep_state() {
        let open = NavState { expanded: true };
        assert_eq!(open.after_interaction(true, false), open);
        assert_eq!(open.after_interaction(false, true), open);
        assert_eq!(open.after_key("Enter"), open);
        assert_eq!(open.after_key("Tab"), open);
        assert_eq!(NavState::closed().after_key("a"), NavState::closed());
    }

    #[test]
    fn view_mirrors_state() {
        let open = NavState { expanded: true }.view();
        assert!(open.aria_expanded && !open.aria_hidden && open.lock_body_scroll);

        let closed = NavState::closed().view();
        assert!(!closed.aria_expanded && closed.aria_hidden && !closed.lock_body_scroll);
    }

    #[test]
    fn outside_and_escape_detection() {
        assert!(is_outside(false, false));
        assert!(!is_outside(true, false));
        assert!(!is_outside(false, true));
        assert!(is_escape("Escape"));
        assert!(!is_escape("Esc"));
        assert!(!is_escape("Enter"));
    }
}
