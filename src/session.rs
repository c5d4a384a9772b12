//! Current-project selection.
//!
//! The selection is an explicit value passed to operations, not a hidden
//! global. It is persisted under the data directory so `use` composes with
//! one-shot invocations; a fresh data directory has no selection.

use crate::error::{Error, Result};
use crate::storage::Storage;

/// The active project selection for one invocation or shell session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<String>,
}

impl Session {
    /// Restore the persisted selection, if any
    pub fn load(storage: &Storage) -> Self {
        Self {
            current: storage.read_current(),
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The selected project name, or `NoProjectSelected`
    pub fn require_current(&self) -> Result<&str> {
        self.current.as_deref().ok_or(Error::NoProjectSelected)
    }

    /// Point the selection at a project and persist it. Existence checks
    /// belong to the registry; the session only tracks the name.
    pub fn select(&mut self, storage: &Storage, name: &str) -> Result<()> {
        storage.write_current(name)?;
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Drop the selection, both in memory and on disk
    pub fn clear(&mut self, storage: &Storage) -> Result<()> {
        storage.clear_current()?;
        self.current = None;
        Ok(())
    }
}
