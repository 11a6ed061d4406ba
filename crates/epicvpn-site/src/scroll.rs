//! Navbar state and hero parallax driven by the scroll offset

use crate::dom::MemoryDocument;
use epicvpn_config::ScrollSettings;
use tracing::debug;

pub const NAVBAR_CLASS: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const HERO_CLASS: &str = "hero";

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEffects {
    threshold: f64,
    parallax_speed: f64,
    scrolled: bool,
}

impl ScrollEffects {
    pub fn new(settings: &ScrollSettings) -> Self {
        Self {
            threshold: settings.navbar_threshold,
            parallax_speed: settings.parallax_speed,
            scrolled: false,
        }
    }

    /// Whether the navbar is currently in its scrolled state
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn apply(&mut self, doc: &mut MemoryDocument, scroll_y: f64) {
        let scrolled = scroll_y > self.threshold;
        // Only transitions touch the class list
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            if let Some(navbar) = doc.first_by_class(NAVBAR_CLASS) {
                if scrolled {
                    doc.add_class(navbar, SCROLLED_CLASS);
                } else {
                    doc.remove_class(navbar, SCROLLED_CLASS);
                }
            }
            debug!("Navbar scrolled state: {}", scrolled);
        }

        if let Some(hero) = doc.first_by_class(HERO_CLASS) {
            let offset = scroll_y * self.parallax_speed;
            doc.set_style(hero, "transform", &format!("translateY({offset}px)"));
        }
    }
}
