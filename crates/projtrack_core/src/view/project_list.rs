//! Per-status project list and drop target.
//!
//! # Invariants
//! - The visible items are exactly the projects of this list's status from
//!   the latest snapshot, in snapshot order.
//! - Every notification rebuilds the list from scratch.
//! - A drop never changes a project's status.

use super::component::{select, TemplateMount};
use super::project_item::ProjectItemView;
use super::{MountError, View};
use crate::config::PageIds;
use crate::dom::event::{handler, EventKind, TEXT_PLAIN};
use crate::dom::{InsertPosition, NodeId, Page, WeakPage};
use crate::model::project::{Project, ProjectStatus};
use crate::state::ProjectState;
use log::{debug, error, info};
use std::cell::RefCell;
use std::rc::Rc;

const VIEW_NAME: &str = "ProjectListView";

/// Class marking a list as a valid drop target while dragging over it.
pub const DROPPABLE_CLASS: &str = "droppable";

/// Rebuilds the list element from a snapshot.
///
/// Shared between the view and its store subscription.
#[derive(Clone)]
struct ListRenderer {
    page: WeakPage,
    status: ProjectStatus,
    list: NodeId,
    list_id: String,
    item_template: String,
    assigned: Rc<RefCell<Vec<Project>>>,
}

impl ListRenderer {
    fn apply(&self, snapshot: Vec<Project>) {
        let retained: Vec<Project> = snapshot
            .into_iter()
            .filter(|project| project.status == self.status)
            .collect();
        *self.assigned.borrow_mut() = retained;
        self.render();
    }

    fn render(&self) {
        let Some(page) = self.page.upgrade() else {
            return;
        };
        page.document_mut().clear_children(self.list);

        let projects = self.assigned.borrow().clone();
        for project in projects {
            if let Err(err) =
                ProjectItemView::new(&page, &self.item_template, &self.list_id, project)
            {
                error!(
                    "event=list_render module=view status=error list={} error={}",
                    self.status, err
                );
                return;
            }
        }
        debug!(
            "event=list_render module=view status=ok list={} items={}",
            self.status,
            self.assigned.borrow().len()
        );
    }
}

/// List of all projects with one status.
pub struct ProjectListView {
    mount: TemplateMount,
    heading: NodeId,
    renderer: ListRenderer,
    store: Rc<ProjectState>,
}

impl ProjectListView {
    /// Appends the list for `status` to the host and subscribes it to
    /// `store`.
    ///
    /// The item template is instantiated once up front, so a template that
    /// cannot render items fails here instead of during a notification.
    pub fn new(
        page: &Page,
        ids: &PageIds,
        status: ProjectStatus,
        store: Rc<ProjectState>,
    ) -> Result<Self, MountError> {
        ProjectItemView::check_template(page, &ids.item_template)?;

        let (mount, (list, heading)) = TemplateMount::attach(
            page,
            &ids.list_template,
            &ids.host,
            InsertPosition::BeforeEnd,
            Some(format!("{status}-projects").as_str()),
            |doc, root| {
                Ok((
                    select(doc, root, VIEW_NAME, "ul")?,
                    select(doc, root, VIEW_NAME, "h2")?,
                ))
            },
        )?;

        let view = Self {
            renderer: ListRenderer {
                page: page.downgrade(),
                status,
                list,
                list_id: format!("{status}-projects-list"),
                item_template: ids.item_template.clone(),
                assigned: Rc::new(RefCell::new(Vec::new())),
            },
            mount,
            heading,
            store,
        };
        view.configure();
        view.render_content();
        Ok(view)
    }

    pub fn status(&self) -> ProjectStatus {
        self.renderer.status
    }

    /// Root `section` element.
    pub fn element(&self) -> NodeId {
        self.mount.element()
    }

    /// The `ul` holding the items.
    pub fn list_element(&self) -> NodeId {
        self.renderer.list
    }

    /// Projects currently shown, in display order.
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.renderer.assigned.borrow().clone()
    }

    /// Filters `snapshot` to this list's status and re-renders.
    pub fn apply_snapshot(&self, snapshot: Vec<Project>) {
        self.renderer.apply(snapshot);
    }
}

impl View for ProjectListView {
    fn configure(&self) {
        let element = self.mount.element();
        let list = self.renderer.list;
        let status = self.renderer.status;

        {
            let mut doc = self.mount.page().document_mut();
            doc.add_event_listener(
                element,
                EventKind::DragOver,
                handler(move |page, event| {
                    let first_type = event
                        .data_transfer()
                        .and_then(|transfer| transfer.types().first().copied());
                    if first_type == Some(TEXT_PLAIN) {
                        event.prevent_default();
                        page.document_mut().add_class(list, DROPPABLE_CLASS);
                    }
                }),
            );
            doc.add_event_listener(
                element,
                EventKind::DragLeave,
                handler(move |page, _| {
                    page.document_mut().remove_class(list, DROPPABLE_CLASS);
                }),
            );
            doc.add_event_listener(
                element,
                EventKind::Drop,
                handler(move |_, event| {
                    event.prevent_default();
                    let dropped = event
                        .data_transfer()
                        .and_then(|transfer| transfer.get_data(TEXT_PLAIN))
                        .unwrap_or("none");
                    info!(
                        "event=project_drop module=view status=ignored list={} id={}",
                        status, dropped
                    );
                }),
            );
        }

        let renderer = self.renderer.clone();
        self.store.subscribe(move |projects| renderer.apply(projects));
    }

    fn render_content(&self) {
        let mut doc = self.mount.page().document_mut();
        doc.set_id(self.renderer.list, Some(self.renderer.list_id.as_str()));
        doc.set_text(
            self.heading,
            format!("{} projects", self.renderer.status.as_str().to_uppercase()),
        );
    }
}
