//! One project rendered as a draggable list entry.

use super::component::{select, TemplateMount};
use super::{MountError, View};
use crate::dom::event::{handler, DropEffect, EventKind, TEXT_PLAIN};
use crate::dom::{Document, InsertPosition, NodeId, Page};
use crate::model::project::Project;
use log::debug;

const VIEW_NAME: &str = "ProjectItemView";

/// Read-only rendering of one project snapshot.
pub struct ProjectItemView {
    mount: TemplateMount,
    project: Project,
    parts: ItemParts,
}

#[derive(Debug, Clone, Copy)]
struct ItemParts {
    title: NodeId,
    people: NodeId,
    description: NodeId,
}

impl ItemParts {
    fn resolve(doc: &Document, root: NodeId) -> Result<Self, MountError> {
        Ok(Self {
            title: select(doc, root, VIEW_NAME, "h2")?,
            people: select(doc, root, VIEW_NAME, "h3")?,
            description: select(doc, root, VIEW_NAME, "p")?,
        })
    }
}

impl ProjectItemView {
    /// Appends a rendered item for `project` to the element `host_id`.
    ///
    /// The item root takes the project id as its element id.
    pub fn new(
        page: &Page,
        template_id: &str,
        host_id: &str,
        project: Project,
    ) -> Result<Self, MountError> {
        let element_id = project.id.to_string();
        let (mount, parts) = TemplateMount::attach(
            page,
            template_id,
            host_id,
            InsertPosition::BeforeEnd,
            Some(element_id.as_str()),
            ItemParts::resolve,
        )?;
        let view = Self {
            mount,
            project,
            parts,
        };
        view.configure();
        view.render_content();
        Ok(view)
    }

    /// Fails when `template_id` cannot render an item.
    pub fn check_template(page: &Page, template_id: &str) -> Result<(), MountError> {
        TemplateMount::check_template(page, template_id, ItemParts::resolve)
    }

    pub fn element(&self) -> NodeId {
        self.mount.element()
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl View for ProjectItemView {
    fn configure(&self) {
        let element = self.mount.element();
        let mut doc = self.mount.page().document_mut();
        doc.set_attribute(element, "draggable", "true");

        let project_id = self.project.id.to_string();
        doc.add_event_listener(
            element,
            EventKind::DragStart,
            handler(move |_, event| {
                if let Some(transfer) = event.data_transfer_mut() {
                    transfer.set_data(TEXT_PLAIN, project_id.as_str());
                    transfer.set_effect_allowed(DropEffect::Move);
                }
            }),
        );
        doc.add_event_listener(
            element,
            EventKind::DragEnd,
            handler(|_, _| debug!("event=drag_end module=view status=ok")),
        );
    }

    fn render_content(&self) {
        let mut doc = self.mount.page().document_mut();
        doc.set_text(self.parts.title, self.project.title.as_str());
        doc.set_text(
            self.parts.people,
            format!("{} assigned", self.project.persons_label()),
        );
        doc.set_text(self.parts.description, self.project.description.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectItemView;
    use crate::dom::event::{DataTransfer, DropEffect, Event, EventKind, TEXT_PLAIN};
    use crate::dom::{Document, Page};
    use crate::markup::build_page;
    use crate::model::project::Project;
    use crate::view::MountError;

    fn page_with_list() -> Page {
        let mut doc = build_page(&Default::default());
        let list = doc.create_element("ul");
        doc.set_id(list, Some("active-projects-list"));
        doc.append_child(doc.body(), list);
        Page::new(doc)
    }

    #[test]
    fn renders_title_people_and_description() {
        let page = page_with_list();
        let project = Project::new("Build API", "Design REST endpoints", 3);
        let item =
            ProjectItemView::new(&page, "single-project", "active-projects-list", project.clone())
                .unwrap();

        let doc = page.document();
        assert_eq!(doc.id(item.element()), Some(project.id.to_string().as_str()));
        assert_eq!(doc.text(item.parts.title), "Build API");
        assert_eq!(doc.text(item.parts.people), "3 persons assigned");
        assert_eq!(doc.text(item.parts.description), "Design REST endpoints");
        assert_eq!(doc.attribute(item.element(), "draggable"), Some("true"));
    }

    #[test]
    fn single_person_label_is_singular() {
        let page = page_with_list();
        let item = ProjectItemView::new(
            &page,
            "single-project",
            "active-projects-list",
            Project::new("Solo", "one", 1),
        )
        .unwrap();
        assert_eq!(page.document().text(item.parts.people), "1 person assigned");
    }

    #[test]
    fn drag_start_puts_id_on_payload_as_move() {
        let page = page_with_list();
        let project = Project::new("Drag me", "d", 2);
        let item =
            ProjectItemView::new(&page, "single-project", "active-projects-list", project.clone())
                .unwrap();

        let event = page.dispatch(
            item.element(),
            Event::drag(EventKind::DragStart, DataTransfer::new()),
        );
        let transfer = event.data_transfer().unwrap();
        assert_eq!(transfer.types(), vec![TEXT_PLAIN]);
        assert_eq!(transfer.get_data(TEXT_PLAIN), Some(project.id.to_string().as_str()));
        assert_eq!(transfer.effect_allowed(), DropEffect::Move);

        let end = page.dispatch(item.element(), Event::drag(EventKind::DragEnd, DataTransfer::new()));
        assert!(!end.default_prevented());
    }

    #[test]
    fn missing_item_parts_fail_construction() {
        let mut doc = Document::new();
        let host = doc.create_element("ul");
        doc.set_id(host, Some("list"));
        doc.append_child(doc.body(), host);
        let template = doc.create_template("bare-item");
        let item = doc.create_element("li");
        doc.append_template_content(template, item);
        let page = Page::new(doc);

        let err = ProjectItemView::new(&page, "bare-item", "list", Project::new("a", "b", 1))
            .err()
            .unwrap();
        assert!(matches!(err, MountError::ElementNotFound { selector, .. } if selector == "h2"));
        assert!(ProjectItemView::check_template(&page, "bare-item").is_err());

        let doc = page.document();
        let list = doc.get_element_by_id("list").unwrap();
        assert!(doc.children(list).is_empty());
    }
}
