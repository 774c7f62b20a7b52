/// Viewport-relative vertical bounds of one `section[id]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds<'a> {
    pub id: &'a str,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds<'_> {
    pub fn straddles(&self, line: f64) -> bool {
        self.top <= line && self.bottom >= line
    }
}

/// The section under the active line. When sections overlap the line the
/// last one in document order wins.
pub fn active_section<'a, I>(sections: I, line: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = SectionBounds<'a>>,
{
    sections
        .into_iter()
        .filter(|section| section.straddles(line))
        .last()
        .map(|section| section.id)
}

/// Whether a nav link with `href` should carry `.active`.
pub fn link_is_active(href: &str, active: Option<&str>) -> bool {
    match (crate::dom::anchor_id(href), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(id: &str, top: f64, bottom: f64) -> SectionBounds<'_> {
        SectionBounds { id, top, bottom }
    }

    #[test]
    fn picks_section_under_line() {
        let sections = [
            bounds("hero", -900.0, -20.0),
            bounds("features", -20.0, 640.0),
            bounds("pricing", 640.0, 1400.0),
        ];
        assert_eq!(active_section(sections, 100.0), Some("features"));
    }

    #[test]
    fn last_overlapping_section_wins() {
        let sections = [
            bounds("outer", 0.0, 2000.0),
            bounds("inner", 50.0, 300.0),
            bounds("below", 400.0, 900.0),
        ];
        assert_eq!(active_section(sections, 100.0), Some("inner"));
    }

    #[test]
    fn edges_count_as_inside() {
        assert_eq!(active_section([bounds("a", 100.0, 300.0)], 100.0), Some("a"));
        assert_eq!(active_section([bounds("a", -50.0, 100.0)], 100.0), Some("a"));
    }

    #[test]
    fn nothing_under_line() {
        let sections = [bounds("a", 200.0, 400.0), bounds("b", 400.0, 800.0)];
        assert_eq!(active_section(sections, 100.0), None);
        assert_eq!(active_section(Vec::new(), 100.0), None);
    }

    #[test]
    fn links_follow_active_section() {
        assert!(link_is_active("#features", Some("features")));
        assert!(!link_is_active("#pricing", Some("features")));
        assert!(!link_is_active("#features", None));
        assert!(!link_is_active("#", Some("")));
    }
}
