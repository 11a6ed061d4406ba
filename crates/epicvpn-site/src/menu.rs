//! Mobile navigation menu

use crate::dom::{MemoryDocument, NodeId};
use epicvpn_config::LayoutSettings;
use tracing::debug;

pub const TOGGLE_CLASS: &str = "mobile-menu-toggle";
pub const LINKS_CLASS: &str = "nav-links";
pub const OPEN_CLASS: &str = "mobile-open";
pub const HIDDEN_CLASS: &str = "mobile-hidden";
pub const ICON_OPEN: &str = "fas fa-times";
pub const ICON_CLOSED: &str = "fas fa-bars";

/// Toggle button plus link list. Every operation is a no-op when either
/// element is missing from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileMenu {
    breakpoint: u32,
}

impl MobileMenu {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            breakpoint: settings.mobile_breakpoint,
        }
    }

    fn elements(doc: &MemoryDocument) -> Option<(NodeId, NodeId)> {
        Some((doc.first_by_class(TOGGLE_CLASS)?, doc.first_by_class(LINKS_CLASS)?))
    }

    fn set_icon(doc: &mut MemoryDocument, toggle: NodeId, class_name: &str) {
        if let Some(icon) = doc.first_descendant_by_tag(toggle, "i") {
            doc.set_class_name(icon, class_name);
        }
    }

    pub fn is_open(&self, doc: &MemoryDocument) -> bool {
        Self::elements(doc).is_some_and(|(_, links)| doc.has_class(links, OPEN_CLASS))
    }

    pub fn toggle(&self, doc: &mut MemoryDocument) {
        let Some((toggle, links)) = Self::elements(doc) else {
            return;
        };
        let open = doc.toggle_class(links, OPEN_CLASS);
        doc.toggle_class(toggle, "active");
        Self::set_icon(doc, toggle, if open { ICON_OPEN } else { ICON_CLOSED });

        let body = doc.body();
        doc.set_style(body, "overflow", if open { "hidden" } else { "" });
        debug!("Mobile menu {}", if open { "opened" } else { "closed" });
    }

    pub fn close(&self, doc: &mut MemoryDocument) {
        let Some((toggle, links)) = Self::elements(doc) else {
            return;
        };
        doc.remove_class(links, OPEN_CLASS);
        doc.remove_class(toggle, "active");
        Self::set_icon(doc, toggle, ICON_CLOSED);
        let body = doc.body();
        doc.set_style(body, "overflow", "");
    }

    /// Route a click. Clicks on the toggle flip the menu, clicks on a link
    /// inside the list or anywhere outside both elements close it.
    pub fn on_click(&self, doc: &mut MemoryDocument, target: NodeId) {
        let Some((toggle, links)) = Self::elements(doc) else {
            return;
        };
        if doc.contains(toggle, target) {
            self.toggle(doc);
        } else if doc.contains(links, target) {
            let on_link = doc
                .closest(target, |el| el.tag() == "a")
                .is_some_and(|link| doc.contains(links, link));
            if on_link {
                self.close(doc);
            }
        } else {
            self.close(doc);
        }
    }

    /// Adapt the layout to a new viewport width
    pub fn on_resize(&self, doc: &mut MemoryDocument, width: u32) {
        let Some((toggle, links)) = Self::elements(doc) else {
            return;
        };
        if width <= self.breakpoint {
            doc.set_style(toggle, "display", "block");
            doc.add_class(links, HIDDEN_CLASS);
        } else {
            doc.set_style(toggle, "display", "none");
            doc.remove_class(links, HIDDEN_CLASS);
        }
        // Full close in both layouts: also drops the toggle's `active` and resets its icon
        self.close(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    struct Page {
        doc: MemoryDocument,
        toggle: NodeId,
        icon: NodeId,
        links: NodeId,
        link: NodeId,
        outside: NodeId,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let nav = doc.append(body, Element::new("nav").with_class("navbar"));
        let toggle = doc.append(nav, Element::new("button").with_class(TOGGLE_CLASS));
        let icon = doc.append(toggle, Element::new("i").with_class("fas").with_class("fa-bars"));
        let links = doc.append(nav, Element::new("ul").with_class(LINKS_CLASS));
        let item = doc.append(links, Element::new("li"));
        let link = doc.append(item, Element::new("a").with_attr("href", "#features"));
        let outside = doc.append(body, Element::new("main"));
        Page {
            doc,
            toggle,
            icon,
            links,
            link,
            outside,
        }
    }

    #[test]
    fn test_toggle_open_and_closed() {
        let Page {
            mut doc,
            toggle,
            icon,
            links,
            ..
        } = page();
        let menu = MobileMenu::new(&LayoutSettings::default());

        menu.on_click(&mut doc, icon);
        assert!(doc.has_class(links, OPEN_CLASS));
        assert!(doc.has_class(toggle, "active"));
        assert_eq!(doc.element(icon).unwrap().class_name(), ICON_OPEN);
        assert_eq!(doc.style(doc.body(), "overflow"), Some("hidden"));

        menu.on_click(&mut doc, toggle);
        assert!(!menu.is_open(&doc));
        assert_eq!(doc.element(icon).unwrap().class_name(), ICON_CLOSED);
        assert_eq!(doc.style(doc.body(), "overflow"), None);
    }

    #[test]
    fn test_link_and_outside_clicks_close() {
        let Page {
            mut doc,
            links,
            link,
            outside,
            ..
        } = page();
        let menu = MobileMenu::new(&LayoutSettings::default());

        menu.toggle(&mut doc);
        // Inside the list but not on a link: stays open
        menu.on_click(&mut doc, links);
        assert!(menu.is_open(&doc));
        menu.on_click(&mut doc, link);
        assert!(!menu.is_open(&doc));

        menu.toggle(&mut doc);
        menu.on_click(&mut doc, outside);
        assert!(!menu.is_open(&doc));
    }

    #[test]
    fn test_resize_across_breakpoint() {
        let Page {
            mut doc,
            toggle,
            icon,
            links,
            ..
        } = page();
        let menu = MobileMenu::new(&LayoutSettings::default());

        menu.toggle(&mut doc);
        menu.on_resize(&mut doc, 768);
        assert_eq!(doc.style(toggle, "display"), Some("block"));
        assert!(doc.has_class(links, HIDDEN_CLASS));
        assert!(!menu.is_open(&doc));
        assert!(!doc.has_class(toggle, "active"));
        assert_eq!(doc.element(icon).unwrap().class_name(), ICON_CLOSED);
        assert_eq!(doc.style(doc.body(), "overflow"), None);

        menu.toggle(&mut doc);
        menu.on_resize(&mut doc, 1024);
        assert_eq!(doc.style(toggle, "display"), Some("none"));
        assert!(!doc.has_class(links, HIDDEN_CLASS));
        assert!(!menu.is_open(&doc));
        assert_eq!(doc.element(icon).unwrap().class_name(), ICON_CLOSED);
    }

    #[test]
    fn test_missing_elements() {
        let mut doc = MemoryDocument::new();
        let menu = MobileMenu::new(&LayoutSettings::default());
        let body = doc.body();
        menu.on_click(&mut doc, body);
        menu.on_resize(&mut doc, 320);
        assert!(!menu.is_open(&doc));
        assert_eq!(doc.style(body, "overflow"), None);
    }
}
