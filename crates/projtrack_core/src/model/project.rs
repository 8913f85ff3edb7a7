//! Project domain model.
//!
//! # Responsibility
//! - Define the record rendered by every list and item view.
//! - Provide the status tag used for list filtering.
//!
//! # Invariants
//! - `id` is generated once and never reused for another project.
//! - A project is immutable after creation; views only ever see copies.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a project.
///
/// Rendered as a string for element ids and drag payloads.
pub type ProjectId = Uuid;

/// Lifecycle bucket a project is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work in progress. Every new project starts here.
    Active,
    /// Completed.
    Finished,
    /// Dropped before completion.
    Canceled,
}

impl ProjectStatus {
    /// All statuses in list display order.
    pub const ALL: [ProjectStatus; 3] = [Self::Active, Self::Finished, Self::Canceled];

    /// Stable lowercase tag used in element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trackable work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned.
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    /// Pluralized assignee label, e.g. `1 person` or `3 persons`.
    pub fn persons_label(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectStatus};

    #[test]
    fn new_project_is_active_with_generated_id() {
        let project = Project::new("Build API", "Design REST endpoints", 3);
        assert!(!project.id.is_nil());
        assert_eq!(project.status, ProjectStatus::Active);
        assert_ne!(project.id, Project::new("Build API", "x", 3).id);
    }

    #[test]
    fn persons_label_pluralizes() {
        assert_eq!(Project::new("a", "b", 1).persons_label(), "1 person");
        assert_eq!(Project::new("a", "b", 2).persons_label(), "2 persons");
        assert_eq!(Project::new("a", "b", 0).persons_label(), "0 persons");
    }

    #[test]
    fn status_serializes_as_snake_case_tag() {
        let json = serde_json::to_value(ProjectStatus::Canceled).unwrap();
        assert_eq!(json, "canceled");
        assert_eq!(ProjectStatus::Finished.to_string(), "finished");
    }
}
