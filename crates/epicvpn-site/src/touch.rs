//! Touch feedback and device adaptation

use crate::dom::{MemoryDocument, NodeId};
use crate::input::TouchOutcome;
use epicvpn_config::TouchSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Classes that shrink slightly while touched
pub const FEEDBACK_CLASSES: [&str; 4] = ["btn", "feature-card", "plan-card", "faq-question"];
pub const PRESSED_TRANSFORM: &str = "scale(0.98)";
pub const TOUCH_DEVICE_CLASS: &str = "touch-device";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchFeedback {
    double_tap: Duration,
    last_touch_end: Option<Duration>,
}

impl TouchFeedback {
    pub fn new(settings: &TouchSettings) -> Self {
        Self {
            double_tap: Duration::from_millis(settings.double_tap_ms),
            last_touch_end: None,
        }
    }

    fn feedback_targets(doc: &MemoryDocument, target: NodeId) -> Vec<NodeId> {
        doc.ancestors(target)
            .into_iter()
            .filter(|node| FEEDBACK_CLASSES.iter().any(|class| doc.has_class(*node, class)))
            .collect()
    }

    pub fn on_touch_start(&self, doc: &mut MemoryDocument, target: NodeId) {
        for node in Self::feedback_targets(doc, target) {
            doc.set_style(node, "transform", PRESSED_TRANSFORM);
        }
    }

    /// Release feedback and detect a double tap
    pub fn on_touch_end(&mut self, doc: &mut MemoryDocument, target: NodeId, now: Duration) -> TouchOutcome {
        for node in Self::feedback_targets(doc, target) {
            doc.set_style(node, "transform", "");
        }

        let prevent_default = self
            .last_touch_end
            .is_some_and(|last| now.saturating_sub(last) <= self.double_tap);
        self.last_touch_end = Some(now);
        TouchOutcome { prevent_default }
    }
}

/// Capabilities reported by the browser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Logical processors; `None` when unknown
    pub hardware_concurrency: Option<u32>,
    pub touch_capable: bool,
}

impl DeviceProfile {
    /// Whether animations should be switched off
    pub fn is_low_end(&self, low_end_concurrency: u32) -> bool {
        self.hardware_concurrency
            .is_some_and(|cores| cores > 0 && cores < low_end_concurrency)
    }

    pub fn apply(&self, doc: &mut MemoryDocument, settings: &TouchSettings) {
        let root = doc.root();
        if self.is_low_end(settings.low_end_concurrency) {
            doc.set_style(root, "--transition", "none");
            debug!("Reduced motion for low-end device");
        }
        if self.touch_capable {
            doc.add_class(root, TOUCH_DEVICE_CLASS);
        }
    }
}
