//! Interaction analytics
//!
//! Events go to an [`AnalyticsSink`]. The default sink writes structured
//! `tracing` events on the `analytics` target; delivery to a third-party
//! service is left to other sink implementations.

use crate::debounce::Debouncer;
use crate::dom::{MemoryDocument, NodeId};
use crate::input::ScrollMetrics;
use chrono::{DateTime, Utc};
use epicvpn_config::AnalyticsSettings;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;

pub const CLICK_EVENT: &str = "click";
pub const SCROLL_DEPTH_EVENT: &str = "scroll_depth";
pub const TIME_ON_PAGE_EVENT: &str = "time_on_page";

/// Classes tracked on click in addition to links and buttons
pub const TRACKED_CLASSES: [&str; 2] = ["feature-card", "plan-card"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event: String,
    pub action: String,
    /// Uppercase tag of the element involved; empty for page-level events
    pub element: String,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(event: &str, action: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            event: event.to_string(),
            action: action.into(),
            element: element.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Destination of analytics events
pub trait AnalyticsSink {
    fn send(&mut self, event: &AnalyticsEvent);
}

/// Logs every event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&mut self, event: &AnalyticsEvent) {
        info!(
            target: "analytics",
            event = %event.event,
            action = %event.action,
            element = %event.element,
            timestamp = %event.timestamp.to_rfc3339(),
            "Analytics event"
        );
    }
}

/// Keeps events in memory. Clones share the same buffer, so a clone kept
/// outside the controller sees everything sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }

    /// Recorded events of one kind
    pub fn events_named(&self, name: &str) -> Vec<AnalyticsEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.event == name)
            .cloned()
            .collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn send(&mut self, event: &AnalyticsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Click, scroll depth and time-on-page tracking
pub struct Analytics {
    enabled: bool,
    depth_step: u32,
    max_depth: u32,
    depth_debounce: Debouncer,
    last_metrics: Option<ScrollMetrics>,
    sink: Box<dyn AnalyticsSink>,
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("enabled", &self.enabled)
            .field("depth_step", &self.depth_step)
            .field("max_depth", &self.max_depth)
            .field("sink", &"<AnalyticsSink>")
            .finish()
    }
}

impl Analytics {
    pub fn new(settings: &AnalyticsSettings, sink: Box<dyn AnalyticsSink>) -> Self {
        Self {
            enabled: settings.enabled,
            depth_step: settings.scroll_depth_step.max(1),
            max_depth: 0,
            depth_debounce: Debouncer::from_millis(settings.scroll_debounce_ms),
            last_metrics: None,
            sink,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_sink(&mut self, sink: Box<dyn AnalyticsSink>) {
        self.sink = sink;
    }

    fn send(&mut self, event: &str, action: impl Into<String>, element: impl Into<String>) {
        if self.enabled {
            self.sink.send(&AnalyticsEvent::new(event, action, element));
        }
    }

    fn is_tracked(doc: &MemoryDocument, node: NodeId) -> bool {
        doc.element(node).is_some_and(|el| {
            matches!(el.tag(), "a" | "button")
                || TRACKED_CLASSES.iter().any(|class| el.has_class(class))
        })
    }

    /// One click event per tracked element on the path from `target` up,
    /// the way the event bubbles
    pub fn track_click(&mut self, doc: &MemoryDocument, target: NodeId) {
        if !self.enabled {
            return;
        }
        for node in doc.ancestors(target) {
            if !Self::is_tracked(doc, node) {
                continue;
            }
            let action = match doc.attribute(node, "data-action") {
                Some(action) => action.to_string(),
                None => doc.text_content(node).trim().to_string(),
            };
            let element = doc.element(node).map(|el| el.tag_name()).unwrap_or_default();
            self.send(CLICK_EVENT, action, element);
        }
    }

    /// Record scroll metrics; depth is evaluated once scrolling settles
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now: Duration) {
        if self.enabled {
            self.last_metrics = Some(metrics);
            self.depth_debounce.trigger(now);
        }
    }

    /// Flush a settled scroll
    pub fn tick(&mut self, now: Duration) {
        if self.depth_debounce.poll(now) {
            if let Some(percent) = self.last_metrics.take().and_then(|m| m.depth_percent()) {
                self.record_depth(percent);
            }
        }
    }

    /// Report a new maximum depth when it lands on a step boundary
    pub fn record_depth(&mut self, percent: u32) {
        if percent > self.max_depth {
            self.max_depth = percent;
            if percent % self.depth_step == 0 {
                self.send(SCROLL_DEPTH_EVENT, format!("{percent}%"), "");
            }
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Report the whole seconds elapsed since page start
    pub fn track_time_on_page(&mut self, now: Duration) {
        let seconds = now.as_secs_f64().round() as u64;
        self.send(TIME_ON_PAGE_EVENT, format!("{seconds}s"), "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn analytics(enabled: bool) -> (Analytics, RecordingSink) {
        let sink = RecordingSink::new();
        let settings = AnalyticsSettings {
            enabled,
            ..AnalyticsSettings::default()
        };
        (Analytics::new(&settings, Box::new(sink.clone())), sink)
    }

    #[test]
    fn test_click_actions() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let card = doc.append(body, Element::new("div").with_class("plan-card"));
        let button = doc.append(
            card,
            Element::new("button")
                .with_attr("data-action", "buy-annual")
                .with_text("Buy"),
        );
        let link = doc.append(body, Element::new("a").with_text("  Contacts \n"));
        let (mut analytics, sink) = analytics(true);

        analytics.track_click(&doc, button);
        analytics.track_click(&doc, link);

        let clicks = sink.events_named(CLICK_EVENT);
        let summary: Vec<(&str, &str)> = clicks
            .iter()
            .map(|e| (e.action.as_str(), e.element.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("buy-annual", "BUTTON"), ("Buy", "DIV"), ("Contacts", "A")]
        );
    }

    #[test]
    fn test_scroll_depth_milestones() {
        let (mut analytics, sink) = analytics(true);
        for percent in [10, 25, 20, 37, 50, 50, 100] {
            analytics.record_depth(percent);
        }
        let actions: Vec<String> = sink
            .events_named(SCROLL_DEPTH_EVENT)
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(actions, vec!["25%", "50%", "100%"]);
        assert_eq!(analytics.max_depth(), 100);
    }

    #[test]
    fn test_scroll_depth_is_debounced() {
        let (mut analytics, sink) = analytics(true);
        let ms = Duration::from_millis;

        analytics.on_scroll(ScrollMetrics::new(250.0, 2000.0, 1000.0), ms(0));
        analytics.on_scroll(ScrollMetrics::new(500.0, 2000.0, 1000.0), ms(50));
        analytics.tick(ms(120));
        assert!(sink.events().is_empty());

        analytics.tick(ms(150));
        let events = sink.events_named(SCROLL_DEPTH_EVENT);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, "50%");
    }

    #[test]
    fn test_time_on_page() {
        let (mut analytics, sink) = analytics(true);
        analytics.track_time_on_page(Duration::from_millis(42_600));
        assert_eq!(sink.events_named(TIME_ON_PAGE_EVENT)[0].action, "43s");
    }

    #[test]
    fn test_disabled_sends_nothing() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let link = doc.append(body, Element::new("a").with_text("Home"));
        let (mut analytics, sink) = analytics(false);

        analytics.track_click(&doc, link);
        analytics.on_scroll(ScrollMetrics::new(1000.0, 2000.0, 1000.0), Duration::ZERO);
        analytics.tick(Duration::from_secs(1));
        analytics.track_time_on_page(Duration::from_secs(5));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = AnalyticsEvent::new(CLICK_EVENT, "Start", "A");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "click");
        assert_eq!(json["element"], "A");
        assert!(json["timestamp"].is_string());
    }
}
