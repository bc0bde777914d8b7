//! Saving and loading the workspace as one JSON record under a fixed key.
//!
//! Nothing in here propagates a storage failure to the caller: `save`,
//! `load` and `clear` log what went wrong and report a plain outcome, and the
//! in-memory workspace stays authoritative. The `try_*` variants expose the
//! underlying error for callers that want it.

mod record;
pub mod storage;

use thiserror::Error;

use crate::constants::WORKSPACE_STORAGE_KEY;
use crate::workspace::Workspace;

pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("workspace record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("workspace record is not a JSON object")]
    NotAnObject,
}

/// Workspace persistence over any [`KeyValueStore`].
///
/// Mutating calls take `&mut self`, so two saves (or a save and a clear)
/// can never interleave their writes to the key within one process.
#[derive(Debug)]
pub struct WorkspaceStorage<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> WorkspaceStorage<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, WORKSPACE_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    pub fn try_save(&mut self, workspace: &Workspace) -> Result<(), PersistError> {
        let text = serde_json::to_string(workspace)?;
        self.backend.set(&self.key, &text)?;
        Ok(())
    }

    /// Write the whole workspace. On failure the previous record is left as
    /// it was and `false` is returned.
    pub fn save(&mut self, workspace: &Workspace) -> bool {
        match self.try_save(workspace) {
            Ok(()) => {
                tracing::debug!(key = %self.key, windows = workspace.windows.len(), "saved workspace");
                true
            }
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to save workspace");
                false
            }
        }
    }

    /// `Ok(None)` when nothing is stored under the key.
    pub fn try_load(&self) -> Result<Option<Workspace>, PersistError> {
        let Some(text) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        import_workspace(&text).map(Some)
    }

    /// The stored workspace, or `None` if there is none or it cannot be read.
    pub fn load(&self) -> Option<Workspace> {
        match self.try_load() {
            Ok(found) => found,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to load workspace");
                None
            }
        }
    }

    /// Remove the stored record. Clearing an empty store succeeds.
    pub fn clear(&mut self) -> bool {
        match self.backend.remove(&self.key) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to clear workspace");
                false
            }
        }
    }
}

/// Pretty-printed JSON for a user-facing export file.
pub fn export_json(workspace: &Workspace) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(workspace)
}

/// Parse workspace JSON (a stored record or an exported file) with the same
/// defaulting `load` applies.
///
/// This only produces a value; applying it is up to the caller, e.g. through
/// [`crate::store::Store::replace_workspace`].
pub fn import_workspace(text: &str) -> Result<Workspace, PersistError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    record::decode_workspace(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn missing_record_loads_as_none() {
        let storage = WorkspaceStorage::new(MemoryStorage::new());
        assert!(matches!(storage.try_load(), Ok(None)));
        assert!(storage.load().is_none());
    }

    #[test]
    fn garbage_record_loads_as_none() {
        let mut backend = MemoryStorage::new();
        backend
            .set(WORKSPACE_STORAGE_KEY, "{not json")
            .expect("memory set");
        let storage = WorkspaceStorage::new(backend);
        assert!(matches!(storage.try_load(), Err(PersistError::Parse(_))));
        assert!(storage.load().is_none());
    }

    #[test]
    fn quota_failure_keeps_previous_record() {
        let mut storage = WorkspaceStorage::new(MemoryStorage::with_quota(400));
        let small = Workspace::default();
        assert!(storage.save(&small));
        let before = storage.backend().raw(WORKSPACE_STORAGE_KEY).map(str::to_string);

        let mut big = Workspace {
            theme: Theme::Dark,
            ..Workspace::default()
        };
        big.name = "x".repeat(1024);
        assert!(!storage.save(&big));
        assert_eq!(
            storage.backend().raw(WORKSPACE_STORAGE_KEY).map(str::to_string),
            before
        );
    }

    #[test]
    fn clear_is_idempotent() {
        let mut storage = WorkspaceStorage::new(MemoryStorage::new());
        assert!(storage.save(&Workspace::default()));
        assert!(storage.clear());
        assert!(storage.clear());
        assert!(storage.load().is_none());
    }

    #[test]
    fn export_is_importable() {
        let ws = Workspace {
            zoom: 1.25,
            ..Workspace::default()
        };
        let text = export_json(&ws).expect("serializes");
        assert!(text.contains('\n'));
        assert_eq!(import_workspace(&text).expect("parses"), ws);
    }
}
