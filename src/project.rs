//! Project document: a named item list plus its id counter.
//!
//! One project maps to one persisted file. The counter only moves forward;
//! deleting an item never frees its id for reuse.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::{Item, Status};

pub const PROJECT_SCHEMA_VERSION: &str = "backlog.project.v1";

fn default_schema_version() -> String {
    PROJECT_SCHEMA_VERSION.to_string()
}

fn default_next_id() -> u64 {
    1
}

/// A named collection of backlog items with its own id counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Unique name; doubles as the persisted file stem and the id prefix.
    pub name: String,
    /// Next item number to hand out. Monotone, never rewound.
    #[serde(default = "default_next_id")]
    pub next_id: u64,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            schema_version: default_schema_version(),
            name,
            next_id: 1,
            items: Vec::new(),
        })
    }

    /// Uppercased project name, used as the item id prefix.
    pub fn id_prefix(&self) -> String {
        self.name.to_uppercase()
    }

    /// Hand out the next item id and advance the counter.
    pub fn allocate_id(&mut self) -> String {
        let id = format!("{}-{}", self.id_prefix(), self.next_id);
        self.next_id += 1;
        id
    }

    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Remove an item by id, keeping the remaining order intact.
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Per-status item counts in status declaration order, skipping zeros.
    pub fn status_counts(&self) -> Vec<(Status, usize)> {
        Status::ALL
            .iter()
            .filter_map(|status| {
                let count = self
                    .items
                    .iter()
                    .filter(|item| item.status == *status)
                    .count();
                if count > 0 {
                    Some((*status, count))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Structural checks applied after deserialization: unique ids and a
    /// counter that has not fallen behind the items it issued.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        let mut seen = std::collections::HashSet::new();
        let prefix = format!("{}-", self.id_prefix());
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(Error::Validation(format!(
                    "duplicate item id: {}",
                    item.id
                )));
            }
            if let Some(n) = item.id.strip_prefix(&prefix).and_then(|s| s.parse::<u64>().ok()) {
                if n >= self.next_id {
                    return Err(Error::Validation(format!(
                        "id counter {} is behind item {}",
                        self.next_id, item.id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Project names become file stems and id prefixes, so keep them to a safe
/// character set.
pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("project name cannot be empty".to_string()));
    }
    if trimmed != name {
        return Err(Error::Validation(
            "project name cannot have leading or trailing whitespace".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(Error::Validation(format!(
            "project name '{name}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
