//! Item repository: CRUD over the items of one project.
//!
//! Every mutation is validated first, applied to the in-memory document,
//! then persisted through [`Storage`] in one atomic write. A validation
//! failure therefore never leaves a partial write behind.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::item::{Item, ItemDraft, ItemPatch};
use crate::project::Project;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct ItemRepository {
    storage: Storage,
}

impl ItemRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Add a new item to the project, assigning the next sequential id.
    /// A project that does not exist yet is created on its first add.
    pub fn add(&self, project_name: &str, draft: ItemDraft) -> Result<Item> {
        // Reject bad drafts before touching the file.
        draft.validate()?;

        let mut project = match self.storage.load(project_name) {
            Ok(project) => project,
            Err(Error::ProjectNotFound(_)) => Project::new(project_name)?,
            Err(err) => return Err(err),
        };
        let id = project.allocate_id();
        let item = Item::from_draft(id, draft, Utc::now())?;
        project.items.push(item.clone());
        self.storage.save(&project)?;
        tracing::debug!(project = %project_name, id = %item.id, "added item");
        Ok(item)
    }

    /// Fetch a single item by id
    pub fn get(&self, project_name: &str, id: &str) -> Result<Item> {
        let project = self.storage.load(project_name)?;
        project
            .find(id)
            .cloned()
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))
    }

    /// Apply field changes to an item, refreshing its `updated_at`
    pub fn update(&self, project_name: &str, id: &str, patch: ItemPatch) -> Result<Item> {
        if patch.is_empty() {
            return Err(Error::Validation(
                "no changes provided (set at least one field)".to_string(),
            ));
        }

        let mut project = self.storage.load(project_name)?;
        let item = project
            .find_mut(id)
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;
        item.apply(patch, Utc::now())?;
        let updated = item.clone();
        self.storage.save(&project)?;
        tracing::debug!(project = %project_name, id = %id, "updated item");
        Ok(updated)
    }

    /// Remove an item. Its id is never handed out again.
    pub fn remove(&self, project_name: &str, id: &str) -> Result<Item> {
        let mut project = self.storage.load(project_name)?;
        let removed = project
            .remove(id)
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;
        self.storage.save(&project)?;
        tracing::debug!(project = %project_name, id = %id, "deleted item");
        Ok(removed)
    }

    /// All items in insertion order, matching the on-disk sequence
    pub fn list(&self, project_name: &str) -> Result<Vec<Item>> {
        Ok(self.storage.load(project_name)?.items)
    }
}
