//! Values exchanged between the platform layer and the page controller

use crate::dom::NodeId;
use serde::{Deserialize, Serialize};

/// Window scroll state at the time of a scroll event
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Vertical scroll offset
    pub scroll_y: f64,
    /// Total height of the scrollable document
    pub scroll_height: f64,
    /// Height of the viewport
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    /// Percentage of the scrollable range covered, rounded and clamped to
    /// `0..=100`. `None` when the page does not scroll.
    pub fn depth_percent(&self) -> Option<u32> {
        let range = self.scroll_height - self.viewport_height;
        if range <= 0.0 || !range.is_finite() || !self.scroll_y.is_finite() {
            return None;
        }
        let percent = (self.scroll_y / range * 100.0).round().clamp(0.0, 100.0);
        Some(percent as u32)
    }
}

/// Visibility report for one observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    /// Visible fraction of the element, `0.0..=1.0`
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: NodeId, ratio: f64) -> Self {
        Self { target, ratio }
    }

    pub fn is_intersecting(&self) -> bool {
        self.ratio > 0.0
    }
}

/// Smooth scroll the platform should perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub target: NodeId,
    /// Pixels kept clear above the target for the fixed navbar
    pub offset: f64,
}

/// What the platform should do after a click
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClickOutcome {
    pub scroll: Option<ScrollRequest>,
    pub prevent_default: bool,
}

/// What the platform should do after a touch end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchOutcome {
    /// Suppress the browser default (double-tap zoom)
    pub prevent_default: bool,
}
