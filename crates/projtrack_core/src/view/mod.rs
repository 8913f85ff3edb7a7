//! Views rendering the store into the page.
//!
//! # Responsibility
//! - Mount templates into host elements (`component`).
//! - Render the input form, the per-status lists and their items.
//!
//! # Invariants
//! - Every element a view touches is resolved while it is constructed; a
//!   missing element fails construction with `MountError`.
//! - Construction order is attach → `configure` → `render_content`.
//! - Views never mutate store snapshots.

pub mod component;
pub mod project_input;
pub mod project_item;
pub mod project_list;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hooks every concrete view implements.
pub trait View {
    /// Wires event handlers and store subscriptions.
    fn configure(&self);
    /// Fills static text and structure.
    fn render_content(&self);
}

/// Structural page errors. These mean the page is broken, not that the user
/// did something wrong, and are not recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    TemplateNotFound(String),
    HostNotFound(String),
    EmptyTemplate(String),
    ElementNotFound {
        view: &'static str,
        selector: String,
    },
}

impl Display for MountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound(id) => write!(f, "template not found: #{id}"),
            Self::HostNotFound(id) => write!(f, "host element not found: #{id}"),
            Self::EmptyTemplate(id) => write!(f, "template has no root element: #{id}"),
            Self::ElementNotFound { view, selector } => {
                write!(f, "{view}: element not found for selector `{selector}`")
            }
        }
    }
}

impl Error for MountError {}
