//! Headless document model the views render into.
//!
//! # Responsibility
//! - Hold an element tree with template fragments, ids, classes, text and
//!   form values.
//! - Register event handlers per element and dispatch events with bubbling.
//! - Record user-facing alerts raised by views.
//!
//! # Invariants
//! - Node `0` is the `body` root and is never detached.
//! - Template content is inert: it is never reachable through id lookup or
//!   selectors, only through `clone_template_content`.
//! - `dispatch` never holds a document borrow while a handler runs.
//!
//! Nodes are kept in an arena. Slots of removed nodes are recycled, so a
//! `NodeId` must not be used once its node was removed.

pub mod event;
pub mod selector;

use event::{Event, EventHandler, EventKind};
use log::{debug, warn};
use selector::Selector;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

/// Arena index of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Where `insert_adjacent` places an element relative to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// First child of the host.
    AfterBegin,
    /// Last child of the host.
    BeforeEnd,
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Template fragment roots; only used by `<template>` elements.
    content: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            content: Vec::new(),
        }
    }
}

/// Element tree plus event registry.
pub struct Document {
    nodes: Vec<Element>,
    /// Recycled arena slots.
    free: Vec<usize>,
    handlers: BTreeMap<(NodeId, EventKind), Vec<EventHandler>>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            free: Vec::new(),
            handlers: BTreeMap::new(),
            alerts: Vec::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Element::new(tag))
    }

    /// Creates a `<template>` element with `id` and appends it to `body`.
    pub fn create_template(&mut self, id: &str) -> NodeId {
        let template = self.create_element("template");
        self.set_id(template, Some(id));
        self.append_child(self.body(), template);
        template
    }

    /// Appends `node` to the inert content of `template`.
    pub fn append_template_content(&mut self, template: NodeId, node: NodeId) {
        self.detach(node);
        self.nodes[template.0].content.push(node);
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_adjacent(parent, InsertPosition::BeforeEnd, child);
    }

    /// Moves `node` into `host` at `position`.
    pub fn insert_adjacent(&mut self, host: NodeId, position: InsertPosition, node: NodeId) {
        self.detach(node);
        let children = &mut self.nodes[host.0].children;
        match position {
            InsertPosition::AfterBegin => children.insert(0, node),
            InsertPosition::BeforeEnd => children.push(node),
        }
        self.nodes[node.0].parent = Some(host);
    }

    /// Removes every child of `node`, releasing their subtrees and handlers.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        let mut removed = Vec::new();
        for child in children {
            self.nodes[child.0].parent = None;
            self.collect_owned(child, &mut removed);
        }
        self.release(removed);
    }

    /// Detaches `node` and releases it with its subtree and handlers.
    /// The body is never removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body() {
            return;
        }
        self.detach(node);
        let mut removed = Vec::new();
        self.collect_owned(node, &mut removed);
        self.release(removed);
    }

    /// Deep-copies the content of `template` into new detached elements.
    ///
    /// Returns `None` when `template` is not a `<template>` element.
    pub fn clone_template_content(&mut self, template: NodeId) -> Option<Vec<NodeId>> {
        if self.nodes[template.0].tag != "template" {
            return None;
        }
        let roots = self.nodes[template.0].content.clone();
        Some(roots.into_iter().map(|root| self.deep_clone(root)).collect())
    }

    /// Finds a connected element by id in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body())
            .into_iter()
            .find(|node| self.nodes[node.0].id.as_deref() == Some(id))
    }

    /// Returns the first descendant of `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    /// Returns every descendant of `scope` matching `selector`, in order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = Selector::parse(selector) else {
            debug!("event=selector_rejected module=dom status=error selector={selector}");
            return Vec::new();
        };
        self.descendants(scope)
            .into_iter()
            .filter(|node| {
                let element = &self.nodes[node.0];
                parsed.matches(&element.tag, element.id.as_deref(), &element.classes)
            })
            .collect()
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    pub fn set_id(&mut self, node: NodeId, id: Option<&str>) {
        self.nodes[node.0].id = id.map(str::to_string);
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Whether `node` is attached under `body`.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body() {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = text.into();
    }

    /// Current form value of an input-like element.
    pub fn value(&self, node: NodeId) -> &str {
        &self.nodes[node.0].value
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.nodes[node.0].value = value.into();
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    /// Registers `handler` for `kind` events reaching `node`.
    pub fn add_event_listener(&mut self, node: NodeId, kind: EventKind, handler: EventHandler) {
        self.handlers.entry((node, kind)).or_default().push(handler);
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.handlers.get(&(node, kind)).map_or(0, Vec::len)
    }

    /// Shows a blocking user notification. Headless pages record it.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("event=user_alert module=dom status=shown chars={}", message.chars().count());
        self.alerts.push(message);
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Serializes `node` and its subtree as HTML.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id) = &element.id {
            push_attribute(out, "id", id);
        }
        if !element.classes.is_empty() {
            push_attribute(out, "class", &element.classes.join(" "));
        }
        for (name, value) in &element.attributes {
            push_attribute(out, name, value);
        }
        if !element.value.is_empty() {
            push_attribute(out, "value", &element.value);
        }
        out.push('>');
        out.push_str(&escape_html(&element.text));
        let inner = if element.tag == "template" {
            &element.content
        } else {
            &element.children
        };
        for child in inner {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    fn alloc(&mut self, element: Element) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = element;
                NodeId(slot)
            }
            None => {
                self.nodes.push(element);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, removed: Vec<NodeId>) {
        if removed.is_empty() {
            return;
        }
        let removed_set: BTreeSet<NodeId> = removed.iter().copied().collect();
        self.handlers
            .retain(|(owner, _), _| !removed_set.contains(owner));
        for node in removed {
            self.nodes[node.0] = Element::new("");
            self.free.push(node.0);
        }
    }

    /// `node`, its descendants and any template content they own.
    fn collect_owned(&self, node: NodeId, out: &mut Vec<NodeId>) {
        out.push(node);
        let element = &self.nodes[node.0];
        for child in element.children.iter().chain(&element.content) {
            self.collect_owned(*child, out);
        }
    }

    fn deep_clone(&mut self, source: NodeId) -> NodeId {
        let mut copy = self.nodes[source.0].clone();
        copy.parent = None;
        copy.children = Vec::new();
        copy.content = Vec::new();
        let target = self.alloc(copy);

        let children = self.nodes[source.0].children.clone();
        for child in children {
            let cloned = self.deep_clone(child);
            self.append_child(target, cloned);
        }
        let content = self.nodes[source.0].content.clone();
        for root in content {
            let cloned = self.deep_clone(root);
            self.nodes[target.0].content.push(cloned);
        }
        target
    }

    /// Descendants of `scope` in document order, excluding `scope`.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in &self.nodes[scope.0].children {
            self.collect_subtree(*child, &mut out);
        }
        out
    }

    fn collect_subtree(&self, node: NodeId, out: &mut Vec<NodeId>) {
        out.push(node);
        for child in &self.nodes[node.0].children {
            self.collect_subtree(*child, out);
        }
    }

    /// `node` followed by its ancestors.
    fn propagation_path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = self.nodes[node.0].parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.nodes[parent.0].parent;
        }
        path
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Shared handle to a document.
///
/// Views and handlers clone this handle; the document itself lives as long
/// as any strong handle does.
#[derive(Clone, Default)]
pub struct Page {
    document: Rc<RefCell<Document>>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
        }
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    pub fn downgrade(&self) -> WeakPage {
        WeakPage {
            document: Rc::downgrade(&self.document),
        }
    }

    /// Dispatches `event` at `target` and bubbles it through the ancestors.
    ///
    /// Handlers are collected up front, so handlers added while dispatching
    /// only see later events. Returns the event after every handler ran.
    pub fn dispatch(&self, target: NodeId, mut event: Event) -> Event {
        event.set_target(target);
        let handlers: Vec<(NodeId, EventHandler)> = {
            let document = self.document();
            document
                .propagation_path(target)
                .into_iter()
                .flat_map(|node| {
                    document
                        .handlers
                        .get(&(node, event.kind()))
                        .into_iter()
                        .flatten()
                        .map(move |handler| (node, Rc::clone(handler)))
                })
                .collect()
        };

        debug!(
            "event=dom_dispatch module=dom status=ok kind={} handlers={}",
            event.kind().as_str(),
            handlers.len()
        );
        for (node, handler) in handlers {
            event.set_current_target(Some(node));
            handler(self, &mut event);
        }
        event.set_current_target(None);
        event
    }
}

/// Non-owning page handle for long-lived callbacks.
#[derive(Clone)]
pub struct WeakPage {
    document: Weak<RefCell<Document>>,
}

impl WeakPage {
    pub fn upgrade(&self) -> Option<Page> {
        self.document.upgrade().map(|document| Page { document })
    }
}
