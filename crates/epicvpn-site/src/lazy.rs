//! Deferred image loading

use crate::dom::{MemoryDocument, NodeId};
use crate::input::IntersectionEntry;
use std::collections::BTreeSet;
use tracing::debug;

pub const DATA_SRC_ATTRIBUTE: &str = "data-src";
pub const LAZY_CLASS: &str = "lazy";

/// Images waiting to enter the viewport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LazyImages {
    pending: BTreeSet<NodeId>,
}

impl LazyImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `img[data-src]` on the page
    pub fn register(&mut self, doc: &MemoryDocument) -> usize {
        let before = self.pending.len();
        for node in doc.query_attribute(DATA_SRC_ATTRIBUTE) {
            if doc.element(node).is_some_and(|el| el.tag() == "img") {
                self.pending.insert(node);
            }
        }
        self.pending.len() - before
    }

    /// Load registered images that became visible; each loads once
    pub fn observe(&mut self, doc: &mut MemoryDocument, entries: &[IntersectionEntry]) -> usize {
        let mut loaded = 0;
        for entry in entries.iter().filter(|entry| entry.is_intersecting()) {
            if !self.pending.remove(&entry.target) {
                continue;
            }
            let source = doc
                .attribute(entry.target, DATA_SRC_ATTRIBUTE)
                .unwrap_or_default()
                .to_string();
            doc.set_src(entry.target, &source);
            doc.remove_class(entry.target, LAZY_CLASS);
            debug!("Loaded lazy image {}", source);
            loaded += 1;
        }
        loaded
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
