//! Core of the projtrack widget: a project form plus active, finished and
//! canceled lists kept in sync with one observable store.

pub mod app;
pub mod config;
pub mod dom;
pub mod logging;
pub mod markup;
pub mod model;
pub mod state;
pub mod validation;
pub mod view;

pub use app::App;
pub use config::{AppConfig, ConfigError, FormLimits, PageIds};
pub use dom::event::{DataTransfer, DropEffect, Event, EventKind, TEXT_PLAIN};
pub use dom::{Document, InsertPosition, NodeId, Page};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use state::{ProjectState, Subscribers};
pub use validation::{validate, FieldValue, Validatable};
pub use view::project_input::{ProjectInputView, SubmitOutcome, INVALID_INPUT_MESSAGE};
pub use view::project_item::ProjectItemView;
pub use view::project_list::{ProjectListView, DROPPABLE_CLASS};
pub use view::{MountError, View};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
