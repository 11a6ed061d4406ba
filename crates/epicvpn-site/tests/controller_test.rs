//! End-to-end page flows through the controller

use epicvpn_config::Config;
use epicvpn_site::analytics::{CLICK_EVENT, SCROLL_DEPTH_EVENT, TIME_ON_PAGE_EVENT};
use epicvpn_site::{
    DeviceProfile, Element, IntersectionEntry, MemoryDocument, NodeId, NotificationKind,
    PageController, RecordingSink, ScrollMetrics, ScrollRequest,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

struct Page {
    doc: MemoryDocument,
    loading: NodeId,
    navbar: NodeId,
    toggle: NodeId,
    links: NodeId,
    features_link: NodeId,
    lang_en: NodeId,
    lang_ru: NodeId,
    hero: NodeId,
    hero_title: NodeId,
    features: NodeId,
    section_title: NodeId,
    plan_card: NodeId,
    plan_button: NodeId,
    map: NodeId,
    question: NodeId,
    answer: NodeId,
}

fn page() -> Page {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    let loading = doc.append(body, Element::new("div").with_class("loading-screen"));

    let navbar = doc.append(body, Element::new("nav").with_class("navbar"));
    let toggle = doc.append(navbar, Element::new("button").with_class("mobile-menu-toggle"));
    doc.append(toggle, Element::new("i").with_class("fas").with_class("fa-bars"));
    let links = doc.append(navbar, Element::new("ul").with_class("nav-links"));
    let item = doc.append(links, Element::new("li"));
    let features_link = doc.append(
        item,
        Element::new("a")
            .with_attr("href", "#features")
            .with_attr("data-i18n", "nav.features")
            .with_text("Benefits"),
    );
    let switch = doc.append(navbar, Element::new("div").with_class("lang-switch"));
    let lang_en = doc.append(
        switch,
        Element::new("button").with_id("lang-en").with_class("lang-btn").with_text("EN"),
    );
    let lang_ru = doc.append(
        switch,
        Element::new("button").with_id("lang-ru").with_class("lang-btn").with_text("RU"),
    );

    let hero = doc.append(body, Element::new("section").with_class("hero"));
    let hero_title = doc.append(hero, Element::new("h1").with_attr("data-i18n", "hero.title"));

    let features = doc.append(body, Element::new("section").with_id("features"));
    let section_title = doc.append(
        features,
        Element::new("h2")
            .with_class("section-title")
            .with_attr("data-i18n", "features.title"),
    );
    let plan_card = doc.append(features, Element::new("div").with_class("plan-card"));
    let plan_button = doc.append(
        plan_card,
        Element::new("button")
            .with_class("btn")
            .with_attr("data-action", "choose-plan")
            .with_attr("data-i18n", "pricing.choose"),
    );
    let map = doc.append(
        features,
        Element::new("img")
            .with_class("lazy")
            .with_attr("data-src", "/images/servers.webp"),
    );

    let faq = doc.append(body, Element::new("div").with_class("faq-item"));
    let question = doc.append(faq, Element::new("button").with_class("faq-question"));
    doc.append(question, Element::new("i").with_class("fas").with_class("fa-chevron-down"));
    let answer = doc.append(faq, Element::new("div").with_class("faq-answer"));

    Page {
        doc,
        loading,
        navbar,
        toggle,
        links,
        features_link,
        lang_en,
        lang_ru,
        hero,
        hero_title,
        features,
        section_title,
        plan_card,
        plan_button,
        map,
        question,
        answer,
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn text(controller: &PageController, node: NodeId) -> String {
    controller.document().text_content(node)
}

fn controller_with(doc: MemoryDocument, config: Config) -> (PageController, RecordingSink) {
    let sink = RecordingSink::new();
    let controller = PageController::from_config(doc, config)
        .unwrap()
        .with_analytics_sink(Box::new(sink.clone()));
    (controller, sink)
}

#[test]
fn test_ready_prepares_the_page() {
    let p = page();
    let mut controller = PageController::from_config(p.doc, Config::default())
        .unwrap()
        .with_device_profile(DeviceProfile {
            hardware_concurrency: Some(2),
            touch_capable: true,
        });

    controller.on_ready();

    let doc = controller.document();
    assert!(controller.is_ready());
    assert_eq!(controller.current_locale().as_str(), "en");
    assert_eq!(doc.lang(), Some("en"));
    assert_eq!(text(&controller, p.hero_title), "Your Privacy and Freedom Online");
    assert!(doc.has_class(p.lang_en, "active"));
    assert!(!doc.has_class(p.lang_ru, "active"));
    assert!(doc.has_class(p.section_title, "fade-in"));
    assert!(doc.has_class(p.plan_card, "fade-in"));
    assert!(doc.has_class(doc.root(), "touch-device"));
    assert_eq!(doc.style(doc.root(), "--transition"), Some("none"));

    // A second ready event changes nothing
    controller.on_ready();
    assert_eq!(controller.document().locale_events().len(), 1);
}

#[test]
fn test_locale_selector_click() {
    let p = page();
    let (mut controller, sink) = controller_with(p.doc, Config::default());
    controller.on_ready();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let listener = Rc::clone(&seen);
    controller.on_locale_change(move |event| listener.borrow_mut().push(event.language.to_string()));

    controller.on_click(p.lang_ru, ms(1000));

    let doc = controller.document();
    assert_eq!(controller.current_locale().as_str(), "ru");
    assert_eq!(doc.lang(), Some("ru"));
    assert!(doc.has_class(p.lang_ru, "active"));
    assert!(!doc.has_class(p.lang_en, "active"));
    assert_eq!(text(&controller, p.hero_title), "Ваша анонимность и свобода в интернете");
    assert_eq!(text(&controller, p.features_link), "Преимущества");
    assert_eq!(*seen.borrow(), vec!["ru"]);
    assert_eq!(doc.locale_events().last().unwrap().language.as_str(), "ru");

    let clicks = sink.events_named(CLICK_EVENT);
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].element, "BUTTON");
}

#[test]
fn test_locale_persists_across_reloads() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.i18n.preference_file = Some(temp_dir.path().join("prefs.json").display().to_string());

    let p = page();
    let (mut controller, _) = controller_with(p.doc, config.clone());
    controller.on_ready();
    controller.set_locale("ru");

    let p = page();
    let (mut reloaded, _) = controller_with(p.doc, config);
    reloaded.on_ready();
    assert_eq!(reloaded.current_locale().as_str(), "ru");
    assert_eq!(text(&reloaded, p.hero_title), "Ваша анонимность и свобода в интернете");
}

#[test]
fn test_unknown_locale_keeps_content() {
    let p = page();
    let (mut controller, _) = controller_with(p.doc, Config::default());
    controller.on_ready();
    controller.set_locale("ru");
    controller.set_locale("fr");

    assert_eq!(controller.current_locale().as_str(), "fr");
    assert_eq!(controller.document().lang(), Some("fr"));
    assert_eq!(text(&controller, p.hero_title), "Ваша анонимность и свобода в интернете");
    assert!(!controller.document().has_class(p.lang_ru, "active"));
    assert!(!controller.document().has_class(p.lang_en, "active"));
}

#[test]
fn test_mobile_menu_flow() {
    let p = page();
    let (mut controller, _) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_click(p.toggle, ms(100));
    assert!(controller.document().has_class(p.links, "mobile-open"));
    let body = controller.document().body();
    assert_eq!(controller.document().style(body, "overflow"), Some("hidden"));

    controller.on_click(p.hero, ms(200));
    assert!(!controller.document().has_class(p.links, "mobile-open"));
    assert_eq!(controller.document().style(body, "overflow"), None);

    // Resizes apply once the window settles
    controller.on_resize(600, ms(1000));
    controller.on_resize(500, ms(1100));
    controller.tick(ms(1300));
    assert_eq!(controller.document().style(p.toggle, "display"), None);
    controller.tick(ms(1350));
    assert_eq!(controller.document().style(p.toggle, "display"), Some("block"));
    assert!(controller.document().has_class(p.links, "mobile-hidden"));
    assert_eq!(controller.viewport_width(), 500);
}

#[test]
fn test_anchor_click_requests_scroll() {
    let p = page();
    let (mut controller, _) = controller_with(p.doc, Config::default());
    controller.on_ready();
    controller.on_click(p.toggle, ms(0));

    let outcome = controller.on_click(p.features_link, ms(10));
    assert_eq!(
        outcome.scroll,
        Some(ScrollRequest {
            target: p.features,
            offset: 80.0
        })
    );
    assert!(outcome.prevent_default);
    // Following a menu link closes the menu
    assert!(!controller.document().has_class(p.links, "mobile-open"));

    let outcome = controller.on_click(p.hero_title, ms(20));
    assert_eq!(outcome.scroll, None);
    assert!(!outcome.prevent_default);
}

#[test]
fn test_faq_click() {
    let p = page();
    let (mut controller, _) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_click(p.question, ms(0));
    assert!(controller.document().has_class(p.answer, "active"));
    controller.on_click(p.question, ms(50));
    assert!(!controller.document().has_class(p.answer, "active"));
}

#[test]
fn test_scroll_effects_and_depth() {
    let p = page();
    let (mut controller, sink) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_scroll(ScrollMetrics::new(500.0, 3000.0, 1000.0), ms(0));
    assert!(controller.document().has_class(p.navbar, "scrolled"));
    assert_eq!(
        controller.document().style(p.hero, "transform"),
        Some("translateY(250px)")
    );
    controller.tick(ms(100));

    controller.on_scroll(ScrollMetrics::new(2000.0, 3000.0, 1000.0), ms(200));
    controller.tick(ms(300));
    controller.on_scroll(ScrollMetrics::new(0.0, 3000.0, 1000.0), ms(400));
    controller.tick(ms(500));
    assert!(!controller.document().has_class(p.navbar, "scrolled"));

    let depths: Vec<String> = sink
        .events_named(SCROLL_DEPTH_EVENT)
        .into_iter()
        .map(|event| event.action)
        .collect();
    assert_eq!(depths, vec!["25%", "100%"]);
}

#[test]
fn test_intersections_reveal_and_load() {
    let p = page();
    let (mut controller, _) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_intersect(&[
        IntersectionEntry::new(p.section_title, 0.5),
        IntersectionEntry::new(p.map, 0.2),
    ]);

    let doc = controller.document();
    assert!(doc.has_class(p.section_title, "visible"));
    assert!(!doc.has_class(p.plan_card, "visible"));
    assert_eq!(doc.element(p.map).unwrap().src(), "/images/servers.webp");
    assert!(!doc.has_class(p.map, "lazy"));
}

#[test]
fn test_plan_click_analytics_bubbles() {
    let p = page();
    let (mut controller, sink) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_click(p.plan_button, ms(0));
    let clicks = sink.events_named(CLICK_EVENT);
    let summary: Vec<(&str, &str)> = clicks
        .iter()
        .map(|event| (event.action.as_str(), event.element.as_str()))
        .collect();
    assert_eq!(summary, vec![("choose-plan", "BUTTON"), ("Choose", "DIV")]);
}

#[test]
fn test_analytics_can_be_disabled() {
    let p = page();
    let mut config = Config::default();
    config.analytics.enabled = false;
    let (mut controller, sink) = controller_with(p.doc, config);
    controller.on_ready();

    controller.on_click(p.plan_button, ms(0));
    controller.on_scroll(ScrollMetrics::new(2000.0, 3000.0, 1000.0), ms(0));
    controller.tick(ms(1000));
    controller.on_unload(ms(60_000));
    assert!(sink.events().is_empty());
}

#[test]
fn test_loading_notifications_and_unload() {
    let p = page();
    let (mut controller, sink) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_load(ms(800));
    assert_eq!(controller.document().style(p.loading, "opacity"), Some("0"));
    controller.tick(ms(1100));
    assert!(!controller.document().is_attached(p.loading));

    let toast = controller.show_notification("Copied", NotificationKind::Success, ms(2000));
    controller.tick(ms(6999));
    assert!(controller.document().is_attached(toast));
    controller.tick(ms(7000));
    assert!(!controller.document().is_attached(toast));

    let err = std::io::Error::other("network down");
    assert!(controller.report_error("pricing", &err, ms(8000)).is_none());
    controller.on_resize(390, ms(8000));
    let toast = controller.report_error("pricing", &err, ms(8100)).unwrap();
    assert!(controller.document().has_class(toast, "notification-error"));

    controller.on_unload(ms(61_400));
    let time = sink.events_named(TIME_ON_PAGE_EVENT);
    assert_eq!(time.len(), 1);
    assert_eq!(time[0].action, "61s");
}

#[test]
fn test_touch_feedback() {
    let p = page();
    let (mut controller, _) = controller_with(p.doc, Config::default());
    controller.on_ready();

    controller.on_touch_start(p.plan_button);
    assert_eq!(
        controller.document().style(p.plan_button, "transform"),
        Some("scale(0.98)")
    );
    assert!(!controller.on_touch_end(p.plan_button, ms(1000)).prevent_default);
    assert_eq!(controller.document().style(p.plan_button, "transform"), None);
    assert!(controller.on_touch_end(p.plan_button, ms(1200)).prevent_default);
}
