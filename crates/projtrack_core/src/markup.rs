//! Canonical host page for the widget.
//!
//! Builds the three templates and the host element every view expects:
//! - input template: `form` with `#title`, `#description`, `#people`;
//! - list template: `section` with a `header > h2` and a `ul`;
//! - item template: draggable `li` with `h2`, `h3`, `p`;
//! - host: empty `div` the views attach to.

use crate::config::PageIds;
use crate::dom::{Document, NodeId};

/// Builds an empty page honouring the markup contract for `ids`.
pub fn build_page(ids: &PageIds) -> Document {
    let mut doc = Document::new();
    input_template(&mut doc, &ids.input_template);
    item_template(&mut doc, &ids.item_template);
    list_template(&mut doc, &ids.list_template);

    let host = doc.create_element("div");
    doc.set_id(host, Some(ids.host.as_str()));
    doc.append_child(doc.body(), host);
    doc
}

fn input_template(doc: &mut Document, id: &str) {
    let template = doc.create_template(id);
    let form = doc.create_element("form");
    for (field_id, label, tag, kind) in [
        ("title", "Title", "input", Some("text")),
        ("description", "Description", "textarea", None),
        ("people", "People", "input", Some("number")),
    ] {
        let control = child(doc, form, "div");
        doc.add_class(control, "form-control");
        let caption = child(doc, control, "label");
        doc.set_attribute(caption, "for", field_id);
        doc.set_text(caption, label);
        let field = child(doc, control, tag);
        doc.set_id(field, Some(field_id));
        if let Some(kind) = kind {
            doc.set_attribute(field, "type", kind);
        }
    }
    let button = child(doc, form, "button");
    doc.set_attribute(button, "type", "submit");
    doc.set_text(button, "ADD PROJECT");
    doc.append_template_content(template, form);
}

fn item_template(doc: &mut Document, id: &str) {
    let template = doc.create_template(id);
    let item = doc.create_element("li");
    doc.set_attribute(item, "draggable", "true");
    for tag in ["h2", "h3", "p"] {
        child(doc, item, tag);
    }
    doc.append_template_content(template, item);
}

fn list_template(doc: &mut Document, id: &str) {
    let template = doc.create_template(id);
    let section = doc.create_element("section");
    doc.add_class(section, "projects");
    let header = child(doc, section, "header");
    child(doc, header, "h2");
    child(doc, section, "ul");
    doc.append_template_content(template, section);
}

fn child(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let node = doc.create_element(tag);
    doc.append_child(parent, node);
    node
}
