//! Where a translated string lands on an element

use serde::{Deserialize, Serialize};

/// The slot a localized string is written into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Primary text content, always literal text
    Text,
    /// Input hint text
    Placeholder,
    /// Alternative text of an image
    AltText,
}

/// Closed classification of element tags relevant to slot selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Input,
    TextArea,
    Image,
    Other,
}

impl TagKind {
    /// Classify a tag name, ignoring ASCII case
    pub fn classify(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("input") {
            Self::Input
        } else if tag.eq_ignore_ascii_case("textarea") {
            Self::TextArea
        } else if tag.eq_ignore_ascii_case("img") {
            Self::Image
        } else {
            Self::Other
        }
    }

    pub fn slot_kind(self) -> SlotKind {
        match self {
            Self::Input | Self::TextArea => SlotKind::Placeholder,
            Self::Image => SlotKind::AltText,
            Self::Other => SlotKind::Text,
        }
    }
}

/// What the engine needs to know about an element, detached from any live
/// document handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    pub tag_name: String,
}

impl ElementDescriptor {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
        }
    }

    pub fn tag_kind(&self) -> TagKind {
        TagKind::classify(&self.tag_name)
    }
}

/// Decide the slot for an element. Unknown tags get the text slot.
pub fn slot_kind_of(element: &ElementDescriptor) -> SlotKind {
    element.tag_kind().slot_kind()
}
