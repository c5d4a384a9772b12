//! Project registry: enumerate, create, select and delete projects.
//!
//! Persistence is delegated to [`Storage`]; the registry owns the rules
//! (unique names, selection bookkeeping) and never touches item contents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::item::Status;
use crate::project::{self, Project};
use crate::session::Session;
use crate::storage::Storage;

/// One row in the project listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub items: usize,
    pub status_counts: Vec<StatusCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Listing result; corrupt project files become warnings instead of killing
/// the whole command.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListing {
    pub projects: Vec<ProjectSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    storage: Storage,
}

impl ProjectRegistry {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Names of all persisted projects, sorted
    pub fn names(&self) -> Result<Vec<String>> {
        self.storage.list()
    }

    /// Summaries for all persisted projects. A project whose file fails to
    /// parse is reported as a warning and skipped.
    pub fn list(&self) -> Result<ProjectListing> {
        let mut projects = Vec::new();
        let mut warnings = Vec::new();

        for name in self.storage.list()? {
            match self.storage.load(&name) {
                Ok(project) => projects.push(summarize(&project)),
                Err(err @ Error::CorruptData { .. }) => {
                    tracing::warn!(project = %name, error = %err, "skipping corrupt project");
                    warnings.push(err.to_string());
                }
                Err(err) => return Err(err),
            }
        }

        Ok(ProjectListing { projects, warnings })
    }

    /// Create a new empty project and persist it immediately
    pub fn create(&self, name: &str) -> Result<Project> {
        project::validate_name(name)?;
        if self.storage.exists(name) {
            return Err(Error::ProjectExists(name.to_string()));
        }
        let project = Project::new(name)?;
        self.storage.save(&project)?;
        tracing::debug!(project = %name, "created project");
        Ok(project)
    }

    /// Point the session at an existing project
    pub fn select(&self, name: &str, session: &mut Session) -> Result<()> {
        if !self.storage.exists(name) {
            return Err(Error::ProjectNotFound(name.to_string()));
        }
        session.select(&self.storage, name)
    }

    /// Delete a project and its file. If the deleted project is currently
    /// selected, the selection becomes unset.
    pub fn delete(&self, name: &str, session: &mut Session) -> Result<()> {
        self.storage.delete(name)?;
        if session.current() == Some(name) {
            session.clear(&self.storage)?;
        }
        tracing::debug!(project = %name, "deleted project");
        Ok(())
    }
}

fn summarize(project: &Project) -> ProjectSummary {
    ProjectSummary {
        name: project.name.clone(),
        items: project.items.len(),
        status_counts: project
            .status_counts()
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
    }
}
