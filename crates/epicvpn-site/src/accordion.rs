//! FAQ accordion

use crate::dom::{MemoryDocument, NodeId};

pub const QUESTION_CLASS: &str = "faq-question";
pub const ANSWER_CLASS: &str = "faq-answer";
pub const ICON_EXPANDED: &str = "fas fa-chevron-up";
pub const ICON_COLLAPSED: &str = "fas fa-chevron-down";

/// At most one answer is open at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqAccordion;

impl FaqAccordion {
    pub fn new() -> Self {
        Self
    }

    fn set_icon(doc: &mut MemoryDocument, question: NodeId, class_name: &str) {
        if let Some(icon) = doc.first_descendant_by_tag(question, "i") {
            doc.set_class_name(icon, class_name);
        }
    }

    /// Handle a click; returns true when it landed on a question
    pub fn on_click(&self, doc: &mut MemoryDocument, target: NodeId) -> bool {
        let Some(question) = doc.closest(target, |el| el.has_class(QUESTION_CLASS)) else {
            return false;
        };
        let Some(answer) = doc.next_element_sibling(question) else {
            return true;
        };

        for other in doc.query_class(ANSWER_CLASS) {
            if other != answer && doc.has_class(other, "active") {
                doc.remove_class(other, "active");
                if let Some(other_question) = doc.previous_element_sibling(other) {
                    Self::set_icon(doc, other_question, ICON_COLLAPSED);
                }
            }
        }

        let open = doc.toggle_class(answer, "active");
        Self::set_icon(doc, question, if open { ICON_EXPANDED } else { ICON_COLLAPSED });
        true
    }
}
