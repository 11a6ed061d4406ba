//! Page controller
//!
//! Owns the document, the localization engine and every page behaviour,
//! and exposes one hook per platform event. Time is passed in explicitly
//! as the elapsed time since page start; scheduled work runs from
//! [`PageController::tick`].

use crate::accordion::FaqAccordion;
use crate::analytics::{Analytics, AnalyticsSink, TracingSink};
use crate::anchors::AnchorScroller;
use crate::debounce::Debouncer;
use crate::dom::{MemoryDocument, NodeId};
use crate::input::{ClickOutcome, IntersectionEntry, ScrollMetrics, TouchOutcome};
use crate::lazy::LazyImages;
use crate::menu::MobileMenu;
use crate::notify::{LoadingScreen, NotificationKind, Notifications};
use crate::reveal::Reveal;
use crate::scroll::ScrollEffects;
use crate::setup::build_engine;
use crate::touch::{DeviceProfile, TouchFeedback};
use epicvpn_common::Result;
use epicvpn_config::Config;
use epicvpn_i18n::{ListenerId, Locale, LocaleChanged, LocalizationEngine};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Viewport width assumed until the first resize
const INITIAL_VIEWPORT_WIDTH: u32 = 1280;

#[derive(Debug)]
pub struct PageController {
    doc: MemoryDocument,
    engine: LocalizationEngine,
    config: Config,
    device: DeviceProfile,
    scroll: ScrollEffects,
    reveal: Reveal,
    menu: MobileMenu,
    accordion: FaqAccordion,
    anchors: AnchorScroller,
    lazy: LazyImages,
    analytics: Analytics,
    notifications: Notifications,
    loading: LoadingScreen,
    touch: TouchFeedback,
    resize: Debouncer,
    pending_width: Option<u32>,
    viewport_width: u32,
    ready: bool,
}

impl PageController {
    pub fn new(doc: MemoryDocument, engine: LocalizationEngine, config: Config) -> Self {
        Self {
            scroll: ScrollEffects::new(&config.scroll),
            reveal: Reveal::new(&config.reveal),
            menu: MobileMenu::new(&config.layout),
            accordion: FaqAccordion::new(),
            anchors: AnchorScroller::new(&config.scroll),
            lazy: LazyImages::new(),
            analytics: Analytics::new(&config.analytics, Box::new(TracingSink)),
            notifications: Notifications::new(&config.notifications, &config.layout),
            loading: LoadingScreen::new(&config.notifications),
            touch: TouchFeedback::new(&config.touch),
            resize: Debouncer::from_millis(config.layout.resize_debounce_ms),
            pending_width: None,
            viewport_width: INITIAL_VIEWPORT_WIDTH,
            device: DeviceProfile::default(),
            ready: false,
            doc,
            engine,
            config,
        }
    }

    /// Build the engine described by `config` and wrap `doc`
    pub fn from_config(doc: MemoryDocument, config: Config) -> Result<Self> {
        let engine = build_engine(&config.i18n)?;
        Ok(Self::new(doc, engine, config))
    }

    pub fn with_analytics_sink(mut self, sink: Box<dyn AnalyticsSink>) -> Self {
        self.analytics.set_sink(sink);
        self
    }

    pub fn with_device_profile(mut self, device: DeviceProfile) -> Self {
        self.device = device;
        self
    }

    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    /// DOM ready: adapt to the device, restore the locale and prepare
    /// reveal and lazy-loading targets. Runs once.
    pub fn on_ready(&mut self) {
        if self.ready {
            debug!("Page already initialized");
            return;
        }
        self.device.apply(&mut self.doc, &self.config.touch);
        self.engine.initialize(&mut self.doc);
        let animated = self.reveal.prepare(&mut self.doc);
        let lazy = self.lazy.register(&self.doc);
        self.ready = true;
        info!(
            "Page ready in locale {} ({} animated elements, {} lazy images)",
            self.engine.current_locale(),
            animated,
            lazy
        );
    }

    /// All resources loaded
    pub fn on_load(&mut self, now: Duration) {
        self.loading.start(&mut self.doc, now);
    }

    pub fn on_click(&mut self, target: NodeId, now: Duration) -> ClickOutcome {
        let mut outcome = ClickOutcome::default();

        self.analytics.track_click(&self.doc, target);

        if let Some(locale) = self.selector_locale(target) {
            self.engine.set_locale(&mut self.doc, locale);
        }

        self.menu.on_click(&mut self.doc, target);
        self.accordion.on_click(&mut self.doc, target);

        if let Some(request) = self.anchors.on_click(&self.doc, target) {
            outcome.scroll = Some(request);
            outcome.prevent_default = true;
        }

        self.notifications.on_click(&mut self.doc, target);
        debug!("Handled click on {:?} at {:?}", target, now);
        outcome
    }

    /// Locale named by the selector enclosing `target`, if any
    fn selector_locale(&self, target: NodeId) -> Option<Locale> {
        let i18n = &self.config.i18n;
        let selector = self
            .doc
            .closest(target, |el| el.has_class(&i18n.selector_class))?;
        let id = self.doc.element(selector)?.id()?;
        Locale::from_selector_id(id, &i18n.selector_prefix)
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now: Duration) {
        self.scroll.apply(&mut self.doc, metrics.scroll_y);
        self.analytics.on_scroll(metrics, now);
    }

    /// Record a viewport width; the layout adapts once resizing settles
    pub fn on_resize(&mut self, width: u32, now: Duration) {
        self.viewport_width = width;
        self.pending_width = Some(width);
        self.resize.trigger(now);
    }

    pub fn on_intersect(&mut self, entries: &[IntersectionEntry]) {
        self.reveal.observe(&mut self.doc, entries);
        self.lazy.observe(&mut self.doc, entries);
    }

    pub fn on_touch_start(&mut self, target: NodeId) {
        self.touch.on_touch_start(&mut self.doc, target);
    }

    pub fn on_touch_end(&mut self, target: NodeId, now: Duration) -> TouchOutcome {
        self.touch.on_touch_end(&mut self.doc, target, now)
    }

    /// Run work that has come due
    pub fn tick(&mut self, now: Duration) {
        if self.resize.poll(now) {
            if let Some(width) = self.pending_width.take() {
                self.menu.on_resize(&mut self.doc, width);
            }
        }
        self.analytics.tick(now);
        self.notifications.tick(&mut self.doc, now);
        self.loading.tick(&mut self.doc, now);
    }

    /// The page is going away
    pub fn on_unload(&mut self, now: Duration) {
        self.analytics.track_time_on_page(now);
    }

    pub fn set_locale(&mut self, locale: impl Into<Locale>) {
        self.engine.set_locale(&mut self.doc, locale);
    }

    pub fn current_locale(&self) -> &Locale {
        self.engine.current_locale()
    }

    /// Subscribe to locale switches
    pub fn on_locale_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&LocaleChanged) + 'static,
    {
        self.engine.on_locale_changed(listener)
    }

    pub fn remove_locale_listener(&mut self, id: ListenerId) -> bool {
        self.engine.remove_listener(id)
    }

    pub fn show_notification(&mut self, message: &str, kind: NotificationKind, now: Duration) -> NodeId {
        self.notifications.show(&mut self.doc, message, kind, now)
    }

    /// Log a failure; narrow viewports also get a toast
    pub fn report_error(&mut self, context: &str, err: &dyn fmt::Display, now: Duration) -> Option<NodeId> {
        self.notifications
            .report_error(&mut self.doc, context, err, self.viewport_width, now)
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut MemoryDocument {
        &mut self.doc
    }

    pub fn engine(&self) -> &LocalizationEngine {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_document(self) -> MemoryDocument {
        self.doc
    }
}
