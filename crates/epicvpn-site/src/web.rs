//! Browser adapter
//!
//! [`WebDocument`] drives a live DOM through `web-sys`, and
//! [`LocalStorageStore`] persists the locale in `localStorage`. Slot writes
//! go through `textContent`, `placeholder` and `alt` only.

use epicvpn_i18n::{
    Binding, Document, ElementDescriptor, EngineOptions, I18nError, I18nResult, LocaleChanged,
    Locale, LocalizationEngine, PreferenceStore, Selector, SlotKind, TranslationTable,
    LOCALE_CHANGED_EVENT,
};
use crate::setup::switch_shared_locale;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Element, HtmlElement, HtmlImageElement, HtmlInputElement,
    HtmlTextAreaElement, Storage, Window,
};

fn js_error(context: &str, value: JsValue) -> I18nError {
    I18nError::storage(format!("{context}: {value:?}"))
}

/// The page currently loaded in the browser
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// `None` outside a browsing context
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|index| list.item(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                warn!("Invalid selector {}: {:?}", selector, err);
                Vec::new()
            }
        }
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn bindings(&self, attribute: &str) -> Vec<Binding<Element>> {
        self.query_all(&format!("[{attribute}]"))
            .into_iter()
            .filter_map(|node| {
                let key = node.get_attribute(attribute)?;
                let element = ElementDescriptor::new(node.tag_name());
                Some(Binding { node, key, element })
            })
            .collect()
    }

    fn locale_selectors(&self, class: &str) -> Vec<Selector<Element>> {
        self.query_all(&format!(".{class}"))
            .into_iter()
            .map(|node| {
                let id = Some(node.id()).filter(|id| !id.is_empty());
                Selector { node, id }
            })
            .collect()
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        let classes = node.class_list();
        let result = if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(err) = result {
            warn!("Failed to update class {}: {:?}", class, err);
        }
    }

    fn write_slot(&mut self, node: &Element, slot: SlotKind, text: &str) {
        match slot {
            SlotKind::Placeholder => {
                if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
                    input.set_placeholder(text);
                } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
                    area.set_placeholder(text);
                }
            }
            SlotKind::AltText => {
                if let Some(image) = node.dyn_ref::<HtmlImageElement>() {
                    image.set_alt(text);
                }
            }
            SlotKind::Text => node.set_text_content(Some(text)),
        }
    }

    fn set_language(&mut self, code: &str) {
        if let Some(root) = self.document.document_element() {
            if let Some(html) = root.dyn_ref::<HtmlElement>() {
                html.set_lang(code);
            }
        }
    }

    fn broadcast_locale_changed(&mut self, event: &LocaleChanged) {
        let detail = match serde_json::to_string(event)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
        {
            Some(detail) => detail,
            None => {
                warn!("Failed to encode locale change for {}", event.language);
                return;
            }
        };

        let init = CustomEventInit::new();
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(LOCALE_CHANGED_EVENT, &init) {
            Ok(custom) => {
                if let Err(err) = self.window.dispatch_event(&custom) {
                    warn!("Failed to dispatch {}: {:?}", LOCALE_CHANGED_EVENT, err);
                }
            }
            Err(err) => warn!("Failed to create {}: {:?}", LOCALE_CHANGED_EVENT, err),
        }
    }
}

/// `window.localStorage`. Every call fails when storage is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> I18nResult<Storage> {
        let window = web_sys::window().ok_or_else(|| I18nError::storage("no window"))?;
        window
            .local_storage()
            .map_err(|err| js_error("localStorage access denied", err))?
            .ok_or_else(|| I18nError::storage("localStorage unavailable"))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, key: &str) -> I18nResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| js_error("localStorage read failed", err))
    }

    fn store(&mut self, key: &str, value: &str) -> I18nResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| js_error("localStorage write failed", err))
    }
}

/// Localize the current page and wire its locale selectors
#[wasm_bindgen(js_name = initLocalization)]
pub fn init_localization() -> Result<(), JsValue> {
    let table = TranslationTable::builtin().map_err(|err| JsValue::from_str(&err.to_string()))?;
    let mut document = WebDocument::new().ok_or_else(|| JsValue::from_str("no document"))?;
    let options = EngineOptions::default();
    let selector_class = options.selector_class.clone();
    let selector_prefix = options.selector_prefix.clone();

    let mut engine = LocalizationEngine::new(table, Box::new(LocalStorageStore), options);
    engine.initialize(&mut document);

    let selectors = document.locale_selectors(&selector_class);
    let state = Rc::new(RefCell::new((engine, document)));
    for selector in selectors {
        let Some(locale) = selector
            .id
            .as_deref()
            .and_then(|id| Locale::from_selector_id(id, &selector_prefix))
        else {
            continue;
        };

        let state = Rc::clone(&state);
        let callback = Closure::<dyn FnMut()>::new(move || {
            switch_shared_locale(&*state, locale.clone());
        });
        selector
            .node
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }

    Ok(())
}
