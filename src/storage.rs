//! Storage layer for backlog
//!
//! Persists one JSON document per project under the data directory, plus a
//! small `current` file holding the active project selection.
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/
//!   current             # Name of the selected project (absent = none)
//!   <project>.json      # One document per project
//! ```
//!
//! Writes go through a temp file + rename so a crash mid-write never
//! corrupts the previous good file.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::project::Project;

/// File extension for persisted project documents
pub const PROJECT_EXT: &str = "json";

/// Name of the current-selection file
pub const CURRENT_FILE: &str = "current";

/// Storage manager for backlog state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Root of the data directory
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to a project's document file
    pub fn project_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.{PROJECT_EXT}"))
    }

    /// Path to the current-selection file
    pub fn current_file(&self) -> PathBuf {
        self.data_dir.join(CURRENT_FILE)
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Create the data directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|err| Error::io_at(&self.data_dir, err))?;
        Ok(())
    }

    /// Whether a project document exists on disk
    pub fn exists(&self, name: &str) -> bool {
        self.project_file(name).is_file()
    }

    // =========================================================================
    // Project documents
    // =========================================================================

    /// Load a project document. Missing file maps to `ProjectNotFound`;
    /// unparseable or structurally invalid content maps to `CorruptData`
    /// carrying the offending path.
    pub fn load(&self, name: &str) -> Result<Project> {
        let path = self.project_file(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::ProjectNotFound(name.to_string()));
            }
            Err(err) => return Err(Error::io_at(&path, err)),
        };

        let project: Project = serde_json::from_str(&content).map_err(|err| {
            Error::CorruptData {
                path: path.clone(),
                message: err.to_string(),
            }
        })?;

        project.validate().map_err(|err| Error::CorruptData {
            path: path.clone(),
            message: err.to_string(),
        })?;

        tracing::debug!(project = %name, items = project.items.len(), "loaded project");
        Ok(project)
    }

    /// Persist a project document (atomic)
    pub fn save(&self, project: &Project) -> Result<()> {
        self.init()?;
        let path = self.project_file(&project.name);
        let json = serde_json::to_string_pretty(project)?;
        self.write_atomic(&path, json.as_bytes())?;
        tracing::debug!(project = %project.name, items = project.items.len(), "saved project");
        Ok(())
    }

    /// Names of all persisted projects, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = fs::read_dir(&self.data_dir)
            .map_err(|err| Error::io_at(&self.data_dir, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| Error::io_at(&self.data_dir, err))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PROJECT_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove a project document. The delete is irrecoverable.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.project_file(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(Error::ProjectNotFound(name.to_string()))
            }
            Err(err) => Err(Error::io_at(&path, err)),
        }
    }

    // =========================================================================
    // Current-selection persistence
    // =========================================================================

    /// Read the persisted project selection, if any
    pub fn read_current(&self) -> Option<String> {
        let path = self.current_file();
        let value = fs::read_to_string(&path).ok()?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Persist the project selection
    pub fn write_current(&self, name: &str) -> Result<()> {
        self.init()?;
        self.write_atomic(&self.current_file(), name.as_bytes())
    }

    /// Drop the persisted project selection
    pub fn clear_current(&self) -> Result<()> {
        let path = self.current_file();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::io_at(&path, err)),
        }
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Write data atomically using temp file + rename. The file is either
    /// fully written or not at all; readers never see partial content.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::io_at(parent, err))?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file =
            File::create(&temp_path).map_err(|err| Error::io_at(&temp_path, err))?;
        file.write_all(data)
            .map_err(|err| Error::io_at(&temp_path, err))?;
        file.sync_all()
            .map_err(|err| Error::io_at(&temp_path, err))?;

        fs::rename(&temp_path, path).map_err(|err| Error::io_at(path, err))?;

        Ok(())
    }
}
