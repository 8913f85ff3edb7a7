//! Document events and the drag payload.

use super::{NodeId, Page};
use std::rc::Rc;

/// Plain-text payload format used for drag-and-drop.
pub const TEXT_PLAIN: &str = "text/plain";

/// Event types the widget listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::DragStart => "dragstart",
            Self::DragEnd => "dragend",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
        }
    }
}

/// Handler bound to one element and event kind.
///
/// Receives the page so it can touch the document without holding a
/// reference to it between events.
pub type EventHandler = Rc<dyn Fn(&Page, &mut Event)>;

/// Wraps a closure as an `EventHandler`.
pub fn handler(f: impl Fn(&Page, &mut Event) + 'static) -> EventHandler {
    Rc::new(f)
}

/// Operations a drag source permits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    Uninitialized,
    None,
    Copy,
    Move,
    Link,
    All,
}

/// Data carried by a drag operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payload for `format`, replacing any previous value.
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(existing, _)| existing == format) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((format.to_string(), data)),
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == format)
            .map(|(_, data)| data.as_str())
    }

    /// Declared payload formats, in the order they were set.
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(format, _)| format.as_str()).collect()
    }

    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }
}

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    default_prevented: bool,
    data_transfer: Option<DataTransfer>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            default_prevented: false,
            data_transfer: None,
        }
    }

    /// Drag event carrying `data_transfer`.
    pub fn drag(kind: EventKind, data_transfer: DataTransfer) -> Self {
        Self {
            data_transfer: Some(data_transfer),
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Element the event was dispatched at.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Element whose handler is currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    pub fn data_transfer_mut(&mut self) -> Option<&mut DataTransfer> {
        self.data_transfer.as_mut()
    }

    pub(super) fn set_target(&mut self, target: NodeId) {
        self.target = Some(target);
    }

    pub(super) fn set_current_target(&mut self, node: Option<NodeId>) {
        self.current_target = node;
    }
}
