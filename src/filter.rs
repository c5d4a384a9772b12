//! Filter engine: exact-match criteria over an item list.
//!
//! Criteria AND-compose; an unset criterion imposes no constraint. Matching
//! is case-sensitive exact equality, no partial matches or wildcards. The
//! engine never mutates its input.

use serde::Serialize;

use crate::item::{Item, Priority, Status};

#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.status.is_none()
            && self.sprint.is_none()
            && self.epic.is_none()
            && self.assignee.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(priority) = self.priority {
            if item.priority != priority {
                return false;
            }
        }
        if let Some(status) = self.status {
            if item.status != status {
                return false;
            }
        }
        if let Some(sprint) = self.sprint.as_deref() {
            if item.sprint.as_deref() != Some(sprint) {
                return false;
            }
        }
        if let Some(epic) = self.epic.as_deref() {
            if item.epic.as_deref() != Some(epic) {
                return false;
            }
        }
        if let Some(assignee) = self.assignee.as_deref() {
            if item.assignee.as_deref() != Some(assignee) {
                return false;
            }
        }
        true
    }

    /// Matching subset of `items`, order preserved
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}
