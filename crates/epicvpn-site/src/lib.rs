//! Page behaviour for the Epic Cash VPN site
//!
//! [`PageController`] ties the localization engine to the rest of the
//! page: navbar and parallax effects, fade-in reveal, the mobile menu, the
//! FAQ accordion, anchor scrolling, lazy images, analytics, notifications
//! and touch handling. Pages are modelled by [`MemoryDocument`]; with the
//! `web` feature the engine can also drive a live browser DOM.

pub mod accordion;
pub mod analytics;
pub mod anchors;
pub mod audit;
pub mod controller;
pub mod debounce;
pub mod dom;
pub mod input;
pub mod lazy;
pub mod menu;
pub mod notify;
pub mod reveal;
pub mod scroll;
pub mod setup;
pub mod touch;
#[cfg(feature = "web")]
pub mod web;

pub use analytics::{AnalyticsEvent, AnalyticsSink, RecordingSink, TracingSink};
pub use audit::{AuditReport, LocaleCoverage};
pub use controller::PageController;
pub use debounce::Debouncer;
pub use dom::{Element, MemoryDocument, NodeId};
pub use input::{ClickOutcome, IntersectionEntry, ScrollMetrics, ScrollRequest, TouchOutcome};
pub use notify::NotificationKind;
pub use setup::{build_engine, engine_options, load_table, open_store, switch_shared_locale};
pub use touch::DeviceProfile;

#[cfg(feature = "web")]
pub use web::{LocalStorageStore, WebDocument};
