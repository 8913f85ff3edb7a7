//! Project creation form.
//!
//! # Invariants
//! - Invalid input never reaches the store; the user gets one alert and the
//!   fields keep their values.
//! - Valid input adds exactly one project, then all fields are cleared.

use super::component::{select, TemplateMount};
use super::{MountError, View};
use crate::config::{FormLimits, PageIds};
use crate::dom::event::{handler, Event, EventKind};
use crate::dom::{Document, InsertPosition, NodeId, Page};
use crate::model::project::ProjectId;
use crate::state::ProjectState;
use crate::validation::{validate, FieldValue, Validatable};
use log::info;
use std::cell::Cell;
use std::rc::Rc;

const VIEW_NAME: &str = "ProjectInputView";

/// Element id given to the mounted form.
pub const FORM_ELEMENT_ID: &str = "user-input";

/// Alert shown when any field fails validation.
pub const INVALID_INPUT_MESSAGE: &str =
    "Invalid input, please review your entered data and try again";

/// Result of one form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(ProjectId),
    Rejected,
}

/// The three input elements of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFields {
    pub title: NodeId,
    pub description: NodeId,
    pub people: NodeId,
}

impl FormFields {
    fn clear(&self, doc: &mut Document) {
        for field in [self.title, self.description, self.people] {
            doc.set_value(field, "");
        }
    }
}

/// Form that validates input and forwards new projects to the store.
pub struct ProjectInputView {
    mount: TemplateMount,
    fields: FormFields,
    limits: FormLimits,
    store: Rc<ProjectState>,
    last_outcome: Rc<Cell<Option<SubmitOutcome>>>,
}

impl ProjectInputView {
    /// Prepends the form to the host and wires its submit handler.
    pub fn new(
        page: &Page,
        ids: &PageIds,
        limits: FormLimits,
        store: Rc<ProjectState>,
    ) -> Result<Self, MountError> {
        let (mount, fields) = TemplateMount::attach(
            page,
            &ids.input_template,
            &ids.host,
            InsertPosition::AfterBegin,
            Some(FORM_ELEMENT_ID),
            |doc, root| {
                Ok(FormFields {
                    title: select(doc, root, VIEW_NAME, "#title")?,
                    description: select(doc, root, VIEW_NAME, "#description")?,
                    people: select(doc, root, VIEW_NAME, "#people")?,
                })
            },
        )?;

        let view = Self {
            mount,
            fields,
            limits,
            store,
            last_outcome: Rc::new(Cell::new(None)),
        };
        view.configure();
        view.render_content();
        Ok(view)
    }

    /// The `form` element.
    pub fn element(&self) -> NodeId {
        self.mount.element()
    }

    pub fn fields(&self) -> FormFields {
        self.fields
    }

    /// Types raw text into the three fields.
    pub fn fill(&self, title: &str, description: &str, people: &str) {
        let mut doc = self.mount.page().document_mut();
        doc.set_value(self.fields.title, title);
        doc.set_value(self.fields.description, description);
        doc.set_value(self.fields.people, people);
    }

    /// Submits the form through the page and reports what happened.
    pub fn submit(&self) -> SubmitOutcome {
        self.last_outcome.set(None);
        self.mount
            .page()
            .dispatch(self.element(), Event::new(EventKind::Submit));
        self.last_outcome.take().unwrap_or(SubmitOutcome::Rejected)
    }
}

impl View for ProjectInputView {
    fn configure(&self) {
        let fields = self.fields;
        let limits = self.limits.clone();
        let store = Rc::clone(&self.store);
        let last_outcome = Rc::clone(&self.last_outcome);

        let on_submit = handler(move |page, event| {
            event.prevent_default();
            let input = gather_user_input(&page.document(), &fields, &limits);
            let outcome = match input {
                Some((title, description, people)) => {
                    let id = store.add_project(title, description, people);
                    fields.clear(&mut page.document_mut());
                    SubmitOutcome::Added(id)
                }
                None => {
                    info!("event=project_submit module=view status=rejected");
                    page.document_mut().alert(INVALID_INPUT_MESSAGE);
                    SubmitOutcome::Rejected
                }
            };
            last_outcome.set(Some(outcome));
        });

        self.mount
            .page()
            .document_mut()
            .add_event_listener(self.mount.element(), EventKind::Submit, on_submit);
    }

    fn render_content(&self) {}
}

/// Reads and validates the form. Returns `None` if any field is invalid.
fn gather_user_input(
    doc: &Document,
    fields: &FormFields,
    limits: &FormLimits,
) -> Option<(String, String, u32)> {
    let title = doc.value(fields.title).to_string();
    let description = doc.value(fields.description).to_string();
    let people = FieldValue::number_from_input(doc.value(fields.people));

    let title_rule = Validatable::text(title.as_str()).required();
    let description_rule = Validatable::text(description.as_str())
        .required()
        .min_length(limits.description_min_length)
        .max_length(limits.description_max_length);
    let people_rule = Validatable::new(people.clone())
        .required()
        .min_value(f64::from(limits.people_min))
        .max_value(f64::from(limits.people_max));

    if !validate(&title_rule) || !validate(&description_rule) || !validate(&people_rule) {
        return None;
    }

    // Only whole head counts are stored.
    let FieldValue::Number(count) = people else {
        return None;
    };
    if count.fract() != 0.0 {
        return None;
    }
    Some((title, description, count as u32))
}

#[cfg(test)]
mod tests {
    use super::{gather_user_input, ProjectInputView, SubmitOutcome, INVALID_INPUT_MESSAGE};
    use crate::config::{FormLimits, PageIds};
    use crate::dom::Page;
    use crate::markup::build_page;
    use crate::model::project::ProjectStatus;
    use crate::state::ProjectState;
    use std::rc::Rc;

    fn setup() -> (Page, Rc<ProjectState>, ProjectInputView) {
        let ids = PageIds::default();
        let page = Page::new(build_page(&ids));
        let store = Rc::new(ProjectState::new());
        let view =
            ProjectInputView::new(&page, &ids, FormLimits::default(), Rc::clone(&store)).unwrap();
        (page, store, view)
    }

    fn field_values(page: &Page, view: &ProjectInputView) -> [String; 3] {
        let doc = page.document();
        let fields = view.fields();
        [fields.title, fields.description, fields.people].map(|f| doc.value(f).to_string())
    }

    #[test]
    fn form_is_prepended_with_user_input_id() {
        let (page, _, view) = setup();
        let doc = page.document();
        let host = doc.get_element_by_id("app").unwrap();
        assert_eq!(doc.children(host).first(), Some(&view.element()));
        assert_eq!(doc.id(view.element()), Some("user-input"));
    }

    #[test]
    fn valid_submit_adds_project_and_clears_fields() {
        let (page, store, view) = setup();
        view.fill("Build API", "Design REST endpoints", "3");

        let outcome = view.submit();
        let SubmitOutcome::Added(id) = outcome else {
            panic!("expected project to be added, got {outcome:?}");
        };
        let project = store.project(id).unwrap();
        assert_eq!(project.title, "Build API");
        assert_eq!(project.people, 3);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(field_values(&page, &view), [String::new(), String::new(), String::new()]);
        assert!(page.document().alerts().is_empty());
    }

    #[test]
    fn invalid_submit_alerts_and_keeps_fields() {
        let (page, store, view) = setup();
        view.fill("", "Design REST endpoints", "3");

        assert_eq!(view.submit(), SubmitOutcome::Rejected);
        assert!(store.is_empty());
        assert_eq!(page.document().alerts(), &[INVALID_INPUT_MESSAGE.to_string()]);
        assert_eq!(
            field_values(&page, &view),
            [String::new(), "Design REST endpoints".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn gather_applies_exclusive_bounds() {
        let (page, _, view) = setup();
        let limits = FormLimits::default();
        let cases = [
            ("t", "d", "0", false),
            ("t", "d", "1", true),
            ("t", "d", "30", true),
            ("t", "d", "31", false),
            ("t", "d", "", false),
            ("t", "d", "many", false),
            ("t", "d", "0.5", false),
            ("t", "d", "2.9", false),
            ("t", "d", "2.0", true),
            ("t", "", "3", false),
            ("  ", "d", "3", false),
        ];
        for (title, description, people, expected) in cases {
            view.fill(title, description, people);
            let result = gather_user_input(&page.document(), &view.fields(), &limits);
            assert_eq!(result.is_some(), expected, "{title:?} {description:?} {people:?}");
        }

        view.fill("t", &"x".repeat(500), "2.0");
        let result = gather_user_input(&page.document(), &view.fields(), &limits);
        assert_eq!(result.map(|(_, _, people)| people), Some(2));
    }

    #[test]
    fn fractional_people_is_rejected_before_the_store() {
        let (page, store, view) = setup();
        view.fill("t", "d", "0.5");

        assert_eq!(view.submit(), SubmitOutcome::Rejected);
        assert!(store.is_empty());
        assert_eq!(page.document().alerts(), &[INVALID_INPUT_MESSAGE.to_string()]);
    }

    #[test]
    fn configured_limits_replace_defaults() {
        let ids = PageIds::default();
        let page = Page::new(build_page(&ids));
        let store = Rc::new(ProjectState::new());
        let limits = FormLimits {
            people_max: 5,
            ..FormLimits::default()
        };
        let view = ProjectInputView::new(&page, &ids, limits, Rc::clone(&store)).unwrap();

        view.fill("t", "d", "5");
        assert_eq!(view.submit(), SubmitOutcome::Rejected);
        view.fill("t", "d", "4");
        assert!(matches!(view.submit(), SubmitOutcome::Added(_)));
        assert_eq!(store.len(), 1);
    }
}
