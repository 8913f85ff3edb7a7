//! Widget bootstrap.
//!
//! # Responsibility
//! - Build the single store for a page and inject it into every view.
//! - Mount the input form and the active, finished and canceled lists.
//!
//! # Invariants
//! - One `App` owns exactly one `ProjectState`; views never build their own.
//! - Any structural error aborts the whole mount.

use crate::config::AppConfig;
use crate::dom::Page;
use crate::markup::build_page;
use crate::model::project::ProjectStatus;
use crate::state::ProjectState;
use crate::view::project_input::ProjectInputView;
use crate::view::project_list::ProjectListView;
use crate::view::MountError;
use log::info;
use std::rc::Rc;

/// A mounted widget.
pub struct App {
    page: Page,
    store: Rc<ProjectState>,
    input: ProjectInputView,
    lists: Vec<ProjectListView>,
}

impl App {
    /// Mounts the widget into an existing page.
    pub fn mount(page: Page, config: &AppConfig) -> Result<Self, MountError> {
        let store = Rc::new(ProjectState::new());
        let input = ProjectInputView::new(
            &page,
            &config.page,
            config.limits.clone(),
            Rc::clone(&store),
        )?;
        let lists = ProjectStatus::ALL
            .into_iter()
            .map(|status| ProjectListView::new(&page, &config.page, status, Rc::clone(&store)))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "event=app_mount module=app status=ok host={} lists={}",
            config.page.host,
            lists.len()
        );
        Ok(Self {
            page,
            store,
            input,
            lists,
        })
    }

    /// Builds the canonical page for `config` and mounts into it.
    pub fn with_default_page(config: &AppConfig) -> Result<Self, MountError> {
        Self::mount(Page::new(build_page(&config.page)), config)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn store(&self) -> &ProjectState {
        &self.store
    }

    pub fn input(&self) -> &ProjectInputView {
        &self.input
    }

    pub fn list(&self, status: ProjectStatus) -> Option<&ProjectListView> {
        self.lists.iter().find(|list| list.status() == status)
    }

    pub fn lists(&self) -> &[ProjectListView] {
        &self.lists
    }

    /// HTML of the host element and everything mounted into it.
    pub fn render_html(&self, config: &AppConfig) -> Option<String> {
        let doc = self.page.document();
        let host = doc.get_element_by_id(&config.page.host)?;
        Some(doc.outer_html(host))
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::config::AppConfig;
    use crate::dom::{Document, Page};
    use crate::model::project::ProjectStatus;
    use crate::view::MountError;

    #[test]
    fn mounts_form_then_lists_in_order() {
        let config = AppConfig::default();
        let app = App::with_default_page(&config).unwrap();
        let doc = app.page().document();
        let host = doc.get_element_by_id("app").unwrap();
        let ids: Vec<_> = doc
            .children(host)
            .iter()
            .map(|node| doc.id(*node).unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "user-input",
                "active-projects",
                "finished-projects",
                "canceled-projects"
            ]
        );
        assert_eq!(app.lists().len(), 3);
        assert_eq!(
            app.list(ProjectStatus::Canceled).map(|list| list.status()),
            Some(ProjectStatus::Canceled)
        );
    }

    #[test]
    fn broken_page_fails_mount() {
        let err = App::mount(Page::new(Document::new()), &AppConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, MountError::TemplateNotFound("project-input".to_string()));
    }

    #[test]
    fn render_html_covers_host_subtree() {
        let config = AppConfig::default();
        let app = App::with_default_page(&config).unwrap();
        let html = app.render_html(&config).unwrap();
        assert!(html.starts_with("<div id=\"app\">"));
        assert!(html.contains("ACTIVE projects"));
        assert!(!html.contains("<template"));
    }
}
