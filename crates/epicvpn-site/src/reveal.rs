//! Fade-in reveal of cards and section titles

use crate::dom::MemoryDocument;
use crate::input::IntersectionEntry;
use epicvpn_config::RevealSettings;

/// Classes whose elements fade in when they scroll into view
pub const ANIMATED_CLASSES: [&str; 3] = ["feature-card", "plan-card", "section-title"];
pub const FADE_IN_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    threshold: f64,
}

impl Reveal {
    pub fn new(settings: &RevealSettings) -> Self {
        Self {
            threshold: settings.threshold,
        }
    }

    /// Mark every animated element as a reveal candidate
    pub fn prepare(&self, doc: &mut MemoryDocument) -> usize {
        let mut marked = 0;
        for class in ANIMATED_CLASSES {
            for node in doc.query_class(class) {
                doc.add_class(node, FADE_IN_CLASS);
                marked += 1;
            }
        }
        marked
    }

    /// Reveal candidates that became sufficiently visible. `visible` is
    /// never removed once added.
    pub fn observe(&self, doc: &mut MemoryDocument, entries: &[IntersectionEntry]) {
        for entry in entries {
            if entry.is_intersecting()
                && entry.ratio >= self.threshold
                && doc.has_class(entry.target, FADE_IN_CLASS)
            {
                doc.add_class(entry.target, VISIBLE_CLASS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn test_reveal_flow() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let card = doc.append(body, Element::new("div").with_class("feature-card"));
        let title = doc.append(body, Element::new("h2").with_class("section-title"));
        let plain = doc.append(body, Element::new("p"));
        let reveal = Reveal::new(&RevealSettings::default());

        assert_eq!(reveal.prepare(&mut doc), 2);
        assert!(doc.has_class(card, "fade-in"));

        reveal.observe(
            &mut doc,
            &[
                IntersectionEntry::new(card, 0.05),
                IntersectionEntry::new(title, 0.4),
                IntersectionEntry::new(plain, 1.0),
            ],
        );
        assert!(!doc.has_class(card, "visible"));
        assert!(doc.has_class(title, "visible"));
        assert!(!doc.has_class(plain, "visible"));

        // Leaving the viewport keeps the element revealed
        reveal.observe(&mut doc, &[IntersectionEntry::new(title, 0.0)]);
        assert!(doc.has_class(title, "visible"));
    }
}
