//! In-page anchor navigation

use crate::dom::{MemoryDocument, NodeId};
use crate::input::ScrollRequest;
use epicvpn_config::ScrollSettings;

/// Turns clicks on `a[href^="#"]` into smooth scroll requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorScroller {
    offset: f64,
}

impl AnchorScroller {
    pub fn new(settings: &ScrollSettings) -> Self {
        Self {
            offset: settings.anchor_offset,
        }
    }

    /// `None` when the click is not on an in-page anchor, the fragment is
    /// empty, or nothing on the page carries that id
    pub fn on_click(&self, doc: &MemoryDocument, target: NodeId) -> Option<ScrollRequest> {
        let anchor = doc.closest(target, |el| {
            el.tag() == "a" && el.attribute("href").is_some_and(|href| href.starts_with('#'))
        })?;
        let fragment = doc.attribute(anchor, "href")?.strip_prefix('#')?;
        if fragment.is_empty() {
            return None;
        }
        let destination = doc.get_by_id(fragment)?;
        Some(ScrollRequest {
            target: destination,
            offset: self.offset,
        })
    }
}
