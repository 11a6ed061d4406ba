//! The document seam between the engine and a concrete page model
//!
//! The engine never holds on to nodes. Every call re-queries the live
//! document, so content added between locale switches is picked up.

use crate::events::LocaleChanged;
use crate::slot::{ElementDescriptor, SlotKind};

/// An element declaring a translation key
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<N> {
    pub node: N,
    pub key: String,
    pub element: ElementDescriptor,
}

/// A locale selector affordance
#[derive(Debug, Clone, PartialEq)]
pub struct Selector<N> {
    pub node: N,
    pub id: Option<String>,
}

/// Operations the localization engine performs on a page
pub trait Document {
    /// Handle to an element of this document
    type Node: Clone;

    /// Every attached element carrying `attribute`, in document order
    fn bindings(&self, attribute: &str) -> Vec<Binding<Self::Node>>;

    /// Every attached element carrying `class`
    fn locale_selectors(&self, class: &str) -> Vec<Selector<Self::Node>>;

    /// Add or remove a class on an element
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);

    /// Write literal text into a slot. Implementations must never parse
    /// `text` as markup.
    fn write_slot(&mut self, node: &Self::Node, slot: SlotKind, text: &str);

    /// Update the root element's language attribute
    fn set_language(&mut self, code: &str);

    /// Broadcast a locale change to page listeners outside the engine
    fn broadcast_locale_changed(&mut self, _event: &LocaleChanged) {}
}
