//! Toast notifications and the loading screen

use crate::dom::{Element, MemoryDocument, NodeId};
use epicvpn_config::{LayoutSettings, NotificationSettings};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

pub const NOTIFICATION_CLASS: &str = "notification";
pub const CLOSE_CLASS: &str = "notification-close";
pub const LOADING_SCREEN_CLASS: &str = "loading-screen";

/// Shown on mobile when something fails
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try refreshing the page.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Font Awesome icon name
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "exclamation-circle",
            _ => "info-circle",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-toast notifier with timed dismissal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notifications {
    auto_dismiss: Duration,
    mobile_breakpoint: u32,
    dismissals: Vec<(NodeId, Duration)>,
}

impl Notifications {
    pub fn new(settings: &NotificationSettings, layout: &LayoutSettings) -> Self {
        Self {
            auto_dismiss: Duration::from_millis(settings.auto_dismiss_ms),
            mobile_breakpoint: layout.mobile_breakpoint,
            dismissals: Vec::new(),
        }
    }

    /// Replace any visible toast with a new one. `message` is always
    /// rendered as literal text.
    pub fn show(
        &mut self,
        doc: &mut MemoryDocument,
        message: &str,
        kind: NotificationKind,
        now: Duration,
    ) -> NodeId {
        for existing in doc.query_class(NOTIFICATION_CLASS) {
            doc.remove(existing);
        }

        let body = doc.body();
        let notification = doc.append(
            body,
            Element::new("div")
                .with_class(NOTIFICATION_CLASS)
                .with_class(format!("notification-{kind}")),
        );
        let content = doc.append(notification, Element::new("div").with_class("notification-content"));
        doc.append(
            content,
            Element::new("i").with_class("fas").with_class(format!("fa-{}", kind.icon())),
        );
        doc.append(content, Element::new("span").with_text(message));
        let close = doc.append(content, Element::new("button").with_class(CLOSE_CLASS));
        doc.append(close, Element::new("i").with_class("fas").with_class("fa-times"));

        self.dismissals.push((notification, now + self.auto_dismiss));
        debug!("Showing {} notification", kind);
        notification
    }

    /// Close the toast whose close button was clicked
    pub fn on_click(&mut self, doc: &mut MemoryDocument, target: NodeId) -> bool {
        let Some(close) = doc.closest(target, |el| el.has_class(CLOSE_CLASS)) else {
            return false;
        };
        match doc.closest(close, |el| el.has_class(NOTIFICATION_CLASS)) {
            Some(notification) => {
                doc.remove(notification);
                self.dismissals.retain(|(node, _)| *node != notification);
                true
            }
            None => false,
        }
    }

    /// Dismiss toasts whose time is up
    pub fn tick(&mut self, doc: &mut MemoryDocument, now: Duration) {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.dismissals.drain(..).partition(|(_, at)| *at <= now);
        self.dismissals = pending;
        for (node, _) in due {
            if doc.is_attached(node) {
                doc.remove(node);
            }
        }
    }

    /// Log a failure and, on narrow viewports, tell the user
    pub fn report_error(
        &mut self,
        doc: &mut MemoryDocument,
        context: &str,
        err: &dyn fmt::Display,
        viewport_width: u32,
        now: Duration,
    ) -> Option<NodeId> {
        error!("Error in {}: {}", context, err);
        (viewport_width <= self.mobile_breakpoint)
            .then(|| self.show(doc, GENERIC_ERROR_MESSAGE, NotificationKind::Error, now))
    }
}

/// Fades out `.loading-screen` once the page has loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingScreen {
    fade: Duration,
    removal: Option<(NodeId, Duration)>,
}

impl LoadingScreen {
    pub fn new(settings: &NotificationSettings) -> Self {
        Self {
            fade: Duration::from_millis(settings.loading_fade_ms),
            removal: None,
        }
    }

    pub fn start(&mut self, doc: &mut MemoryDocument, now: Duration) {
        if let Some(screen) = doc.first_by_class(LOADING_SCREEN_CLASS) {
            doc.set_style(screen, "opacity", "0");
            self.removal = Some((screen, now + self.fade));
        }
    }

    pub fn tick(&mut self, doc: &mut MemoryDocument, now: Duration) {
        if let Some((screen, at)) = self.removal {
            if now >= at {
                doc.remove(screen);
                self.removal = None;
                debug!("Loading screen removed");
            }
        }
    }
}
