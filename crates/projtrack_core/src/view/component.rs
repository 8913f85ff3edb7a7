//! Template instantiation shared by all views.

use super::MountError;
use crate::dom::{Document, InsertPosition, NodeId, Page};
use log::debug;

/// A template instance attached to its host element.
pub struct TemplateMount {
    page: Page,
    host: NodeId,
    element: NodeId,
}

impl TemplateMount {
    /// Clones `template_id`, optionally ids its root, resolves the parts the
    /// caller needs with `resolve`, then inserts the root into `host_id` at
    /// `position`.
    ///
    /// `resolve` runs on the detached root; when it fails nothing is
    /// inserted and the clone is released.
    ///
    /// # Errors
    /// - `TemplateNotFound` when no `<template>` has that id.
    /// - `HostNotFound` when no connected element has `host_id`.
    /// - `EmptyTemplate` when the template content has no root element.
    /// - Whatever `resolve` returns.
    pub fn attach<T>(
        page: &Page,
        template_id: &str,
        host_id: &str,
        position: InsertPosition,
        element_id: Option<&str>,
        resolve: impl FnOnce(&Document, NodeId) -> Result<T, MountError>,
    ) -> Result<(Self, T), MountError> {
        let mut doc = page.document_mut();
        let template = find_template(&doc, template_id)?;
        let host = doc
            .get_element_by_id(host_id)
            .ok_or_else(|| MountError::HostNotFound(host_id.to_string()))?;
        let element = instantiate(&mut doc, template, template_id)?;

        let parts = match resolve(&*doc, element) {
            Ok(parts) => parts,
            Err(err) => {
                doc.remove(element);
                return Err(err);
            }
        };
        if let Some(id) = element_id {
            doc.set_id(element, Some(id));
        }
        doc.insert_adjacent(host, position, element);
        debug!(
            "event=template_attached module=view status=ok template={} host={}",
            template_id, host_id
        );
        drop(doc);

        let mount = Self {
            page: page.clone(),
            host,
            element,
        };
        Ok((mount, parts))
    }

    /// Runs `resolve` against a throwaway instance of `template_id`.
    ///
    /// Lets a view reject a malformed template before it ever needs it.
    pub fn check_template<T>(
        page: &Page,
        template_id: &str,
        resolve: impl FnOnce(&Document, NodeId) -> Result<T, MountError>,
    ) -> Result<(), MountError> {
        let mut doc = page.document_mut();
        let template = find_template(&doc, template_id)?;
        let element = instantiate(&mut doc, template, template_id)?;
        let result = resolve(&*doc, element).map(|_| ());
        doc.remove(element);
        result
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    /// Root element of this instance.
    pub fn element(&self) -> NodeId {
        self.element
    }
}

/// Resolves a descendant of `root`, failing when it is missing.
pub fn select(
    doc: &Document,
    root: NodeId,
    view: &'static str,
    selector: &str,
) -> Result<NodeId, MountError> {
    doc.query_selector(root, selector)
        .ok_or_else(|| MountError::ElementNotFound {
            view,
            selector: selector.to_string(),
        })
}

fn find_template(doc: &Document, template_id: &str) -> Result<NodeId, MountError> {
    doc.get_element_by_id(template_id)
        .ok_or_else(|| MountError::TemplateNotFound(template_id.to_string()))
}

/// Clones the first root of `template`; any further roots are released.
fn instantiate(
    doc: &mut Document,
    template: NodeId,
    template_id: &str,
) -> Result<NodeId, MountError> {
    let roots = doc
        .clone_template_content(template)
        .ok_or_else(|| MountError::TemplateNotFound(template_id.to_string()))?;
    let Some((&element, extra)) = roots.split_first() else {
        return Err(MountError::EmptyTemplate(template_id.to_string()));
    };
    for root in extra {
        doc.remove(*root);
    }
    Ok(element)
}
