//! In-memory page model
//!
//! An arena of elements rooted at `html`, with `head` and `body` always
//! present. Queries walk attached nodes in document order; removed nodes
//! stay in the arena but are never returned.

use epicvpn_i18n::{Binding, Document, ElementDescriptor, LocaleChanged, Selector, SlotKind};
use std::collections::BTreeMap;
use tracing::trace;

/// Handle to an element of a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A single element.
///
/// Built with the `with_*` methods and handed to [`MemoryDocument::append`];
/// after that it is only changed through the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    placeholder: String,
    alt: String,
    src: String,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Lowercase tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Uppercase tag, as browsers report it
    pub fn tag_name(&self) -> String {
        self.tag.to_ascii_uppercase()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space-joined class list
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Own text, excluding children
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Inline style property
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed document
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    locale_events: Vec<LocaleChanged>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty page: `html > head + body`
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            locale_events: Vec::new(),
        };
        doc.head = doc.append(doc.root, Element::new("head"));
        doc.body = doc.append(doc.root, Element::new("body"));
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Insert `element` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let node = NodeId(self.nodes.len());
        element.parent = None;
        element.children.clear();
        self.nodes.push(element);
        self.attach(parent, node);
        node
    }

    /// Move an existing node under `parent`. Moving a node into its own
    /// subtree is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == self.root || self.contains(child, parent) {
            trace!("Ignoring append of {:?} under {:?}", child, parent);
            return;
        }
        self.detach(child);
        self.attach(parent, child);
    }

    /// Detach a node (and its subtree) from the page
    pub fn remove(&mut self, node: NodeId) {
        if node != self.root {
            self.detach(node);
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        let parent = match self.nodes.get_mut(node.0) {
            Some(element) => element.parent.take(),
            None => None,
        };
        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.ancestors(node).last() == Some(&self.root)
    }

    /// `node` followed by its ancestors, nearest first
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.element(node).map(|_| node);
        while let Some(id) = current {
            chain.push(id);
            current = self.nodes[id.0].parent;
        }
        chain
    }

    /// Nearest inclusive ancestor matching `predicate`
    pub fn closest<P>(&self, node: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Element) -> bool,
    {
        self.ancestors(node)
            .into_iter()
            .find(|id| predicate(&self.nodes[id.0]))
    }

    /// Inclusive containment
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// Descendants of `node` in document order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.element(node) {
            Some(element) => element.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Every attached node, root first
    fn attached(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.root).chain(self.descendants(self.root))
    }

    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.attached()
            .filter(|id| self.nodes[id.0].has_class(class))
            .collect()
    }

    pub fn query_tag(&self, tag: &str) -> Vec<NodeId> {
        self.attached()
            .filter(|id| self.nodes[id.0].tag.eq_ignore_ascii_case(tag))
            .collect()
    }

    pub fn query_attribute(&self, name: &str) -> Vec<NodeId> {
        self.attached()
            .filter(|id| self.nodes[id.0].attributes.contains_key(name))
            .collect()
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.attached().find(|id| self.nodes[id.0].has_class(class))
    }

    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached()
            .find(|node| self.nodes[node.0].id.as_deref() == Some(id))
    }

    /// First descendant of `node` with the given tag
    pub fn first_descendant_by_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|id| self.nodes[id.0].tag.eq_ignore_ascii_case(tag))
    }

    fn sibling(&self, node: NodeId, offset: isize) -> Option<NodeId> {
        let parent = self.element(node)?.parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|id| *id == node)?;
        let target = index.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling(node, 1)
    }

    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling(node, -1)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.retain(|c| c != class);
        }
    }

    /// Flip a class; returns whether it is now present
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.element(node).is_some()
        }
    }

    /// Replace the whole class list
    pub fn set_class_name(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes = value.split_whitespace().map(str::to_string).collect();
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.remove(name);
        }
    }

    /// Replace the node's content with literal text, dropping its children
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let children = match self.element_mut(node) {
            Some(element) => {
                element.text = text.to_string();
                std::mem::take(&mut element.children)
            }
            None => return,
        };
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Own text followed by the text of every descendant
    pub fn text_content(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        let mut text = element.text.clone();
        for id in self.descendants(node) {
            text.push_str(&self.nodes[id.0].text);
        }
        text
    }

    pub fn set_placeholder(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.placeholder = text.to_string();
        }
    }

    pub fn set_alt(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.alt = text.to_string();
        }
    }

    pub fn set_src(&mut self, node: NodeId, src: &str) {
        if let Some(element) = self.element_mut(node) {
            element.src = src.to_string();
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node)?.style(property)
    }

    /// Set an inline style property; an empty value removes it
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            if value.is_empty() {
                element.style.remove(property);
            } else {
                element.style.insert(property.to_string(), value.to_string());
            }
        }
    }

    /// The root element's `lang` attribute
    pub fn lang(&self) -> Option<&str> {
        self.attribute(self.root, "lang")
    }

    /// Locale changes broadcast to this page, oldest first
    pub fn locale_events(&self) -> &[LocaleChanged] {
        &self.locale_events
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn bindings(&self, attribute: &str) -> Vec<Binding<NodeId>> {
        self.query_attribute(attribute)
            .into_iter()
            .filter_map(|node| {
                let element = &self.nodes[node.0];
                element.attribute(attribute).map(|key| Binding {
                    node,
                    key: key.to_string(),
                    element: ElementDescriptor::new(element.tag.clone()),
                })
            })
            .collect()
    }

    fn locale_selectors(&self, class: &str) -> Vec<Selector<NodeId>> {
        self.query_class(class)
            .into_iter()
            .map(|node| Selector {
                node,
                id: self.nodes[node.0].id.clone(),
            })
            .collect()
    }

    fn set_class(&mut self, node: &NodeId, class: &str, on: bool) {
        if on {
            self.add_class(*node, class);
        } else {
            self.remove_class(*node, class);
        }
    }

    fn write_slot(&mut self, node: &NodeId, slot: SlotKind, text: &str) {
        match slot {
            SlotKind::Text => self.set_text_content(*node, text),
            SlotKind::Placeholder => self.set_placeholder(*node, text),
            SlotKind::AltText => self.set_alt(*node, text),
        }
    }

    fn set_language(&mut self, code: &str) {
        let root = self.root;
        self.set_attribute(root, "lang", code);
    }

    fn broadcast_locale_changed(&mut self, event: &LocaleChanged) {
        self.locale_events.push(event.clone());
    }
}
