//! Backlog item model.
//!
//! Items carry a closed priority/status vocabulary; values are validated at
//! the boundary (CLI flags, shell input, persisted data) and never stored as
//! free-form strings. Mutations flow through [`ItemDraft`] and [`ItemPatch`]
//! so the core never sees raw console input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Item priority, lowest to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(Error::Validation(format!(
                "unknown priority '{other}' (expected low|medium|high|critical)"
            ))),
        }
    }
}

/// Item workflow status. Any status may move to any other; there is no
/// enforced transition graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Done,
        Status::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
            Status::Blocked => "blocked",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            "blocked" => Ok(Status::Blocked),
            other => Err(Error::Validation(format!(
                "unknown status '{other}' (expected todo|in_progress|done|blocked)"
            ))),
        }
    }
}

/// A single backlog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// `<PROJECT-UPPER>-<n>`, unique within the project, immutable.
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build an item from a validated draft. The caller supplies the id and
    /// creation timestamp so drafts stay decoupled from id allocation.
    pub fn from_draft(id: String, draft: ItemDraft, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Item {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            priority: draft.priority.unwrap_or_default(),
            status: Status::default(),
            sprint: normalize_optional(draft.sprint),
            epic: normalize_optional(draft.epic),
            assignee: normalize_optional(draft.assignee),
            story_points: draft.story_points,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch, refreshing `updated_at`. Every changed field is
    /// validated before anything is written, so a failed patch leaves the
    /// item untouched.
    pub fn apply(&mut self, patch: ItemPatch, now: DateTime<Utc>) -> Result<()> {
        patch.validate()?;

        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(sprint) = patch.sprint {
            self.sprint = normalize_optional(Some(sprint));
        }
        if let Some(epic) = patch.epic {
            self.epic = normalize_optional(Some(epic));
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = normalize_optional(Some(assignee));
        }
        if let Some(story_points) = patch.story_points {
            self.story_points = Some(story_points);
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Fully-formed record for a new item. Collected by the CLI or shell, then
/// handed to the repository as one value.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub sprint: Option<String>,
    pub epic: Option<String>,
    pub assignee: Option<String>,
    pub story_points: Option<u32>,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Field changes for an existing item. `None` keeps the current value; for
/// the optional text fields an empty string clears the field.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub sprint: Option<String>,
    pub epic: Option<String>,
    pub assignee: Option<String>,
    pub story_points: Option<u32>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.sprint.is_none()
            && self.epic.is_none()
            && self.assignee.is_none()
            && self.story_points.is_none()
    }

    fn validate(&self) -> Result<()> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(Error::Validation("title cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item::from_draft(
            "WEB-1".to_string(),
            ItemDraft::new("Login", "Auth"),
            Utc::now(),
        )
        .expect("item")
    }

    #[test]
    fn priority_round_trips_through_strings() {
        for priority in Priority::ALL {
            assert_eq!(priority.as_str().parse::<Priority>().expect("parse"), priority);
        }
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let err = "urgent".parse::<Priority>().expect_err("invalid");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "paused".parse::<Status>().expect_err("invalid");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn draft_defaults_match_new_item_expectations() {
        let item = sample_item();
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.status, Status::Todo);
        assert_eq!(item.created_at, item.updated_at);
        assert!(item.sprint.is_none());
    }

    #[test]
    fn empty_title_draft_is_rejected() {
        let draft = ItemDraft::new("   ", "desc");
        let err = draft.validate().expect_err("empty title");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn blank_optional_fields_are_stored_unset() {
        let mut draft = ItemDraft::new("Login", "");
        draft.sprint = Some("  ".to_string());
        draft.assignee = Some("alice".to_string());
        let item = Item::from_draft("WEB-1".to_string(), draft, Utc::now()).expect("item");
        assert!(item.sprint.is_none());
        assert_eq!(item.assignee.as_deref(), Some("alice"));
    }

    #[test]
    fn patch_refreshes_updated_at_only() {
        let mut item = sample_item();
        let created = item.created_at;
        let later = created + chrono::Duration::seconds(5);

        let patch = ItemPatch {
            status: Some(Status::Done),
            ..ItemPatch::default()
        };
        item.apply(patch, later).expect("apply");

        assert_eq!(item.status, Status::Done);
        assert_eq!(item.created_at, created);
        assert_eq!(item.updated_at, later);
    }

    #[test]
    fn patch_with_empty_title_leaves_item_unchanged() {
        let mut item = sample_item();
        let before = item.clone();

        let patch = ItemPatch {
            title: Some("  ".to_string()),
            status: Some(Status::Done),
            ..ItemPatch::default()
        };
        let err = item.apply(patch, Utc::now()).expect_err("invalid patch");
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn patch_clears_optional_field_with_empty_string() {
        let mut item = sample_item();
        let patch = ItemPatch {
            sprint: Some("sprint-4".to_string()),
            ..ItemPatch::default()
        };
        item.apply(patch, Utc::now()).expect("set sprint");
        assert_eq!(item.sprint.as_deref(), Some("sprint-4"));

        let patch = ItemPatch {
            sprint: Some(String::new()),
            ..ItemPatch::default()
        };
        item.apply(patch, Utc::now()).expect("clear sprint");
        assert!(item.sprint.is_none());
    }
}
