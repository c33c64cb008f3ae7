//! Session snapshot persistence
//!
//! This module defines the repository seam between the game store and
//! durable local storage. The store writes the whole session snapshot
//! through a [`Repository`] after every mutation and reads it back once at
//! startup; implementations decide where the single named blob lives.

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{constants, store::SessionState};

/// Errors that can occur while loading or saving a snapshot
#[derive(Error, Debug)]
pub enum Error {
    /// The storage backend could not be read or written
    #[error("storage unavailable: {0}")]
    Io(#[from] io::Error),
    /// The stored blob does not deserialize into a session snapshot
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Trait for persisting the session snapshot
///
/// This trait abstracts the storage mechanism used to keep game state
/// across sessions. The store treats it as fire-and-forget: a failing
/// `save` degrades the session to in-memory-only operation, and a failing
/// `load` falls back to the empty initial state.
pub trait Repository {
    /// Loads the previously saved snapshot
    ///
    /// Returns `Ok(None)` when no snapshot has ever been saved.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the backend is unreadable or the blob is
    /// malformed.
    fn load(&self) -> Result<Option<SessionState>, Error>;

    /// Saves a snapshot, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the backend cannot be written.
    fn save(&self, snapshot: &SessionState) -> Result<(), Error>;
}

/// File-backed repository holding one named JSON blob
///
/// The blob lives at `<dir>/<storage name>.json`. Writes replace the whole
/// file; snapshots are small enough that no partial-write handling is
/// needed.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at the given directory
    ///
    /// The file name is derived from the fixed storage name constant so
    /// that every session of the application finds the same blob.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{}.json", constants::storage::STORAGE_NAME)),
        }
    }

    /// The full path of the snapshot blob
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for FileStore {
    fn load(&self) -> Result<Option<SessionState>, Error> {
        let source = match fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&source)?))
    }

    fn save(&self, snapshot: &SessionState) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(snapshot)?)?;
        Ok(())
    }
}

/// In-memory repository used by tests and storage-less sessions
///
/// The snapshot round-trips through the same JSON form as [`FileStore`],
/// so tests exercising it cover the serialization path too.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw blob
    ///
    /// Useful for testing rehydration from arbitrary (including corrupt)
    /// stored data.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }

    /// The raw blob currently held, if any
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl Repository for MemoryStore {
    fn load(&self) -> Result<Option<SessionState>, Error> {
        match &*self.blob.borrow() {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &SessionState) -> Result<(), Error> {
        *self.blob.borrow_mut() = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_empty_load() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let mut snapshot = SessionState::new(9);
        snapshot.completed_numbers.insert(3);
        snapshot.question_answers.insert(3, 1);

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.total_questions, 9);
        assert!(loaded.completed_numbers.contains(&3));
        assert_eq!(loaded.question_answers.get(&3), Some(&1));
    }

    #[test]
    fn test_memory_store_corrupt_blob() {
        let store = MemoryStore::with_blob("{ definitely not json");
        assert!(matches!(store.load(), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let store = FileStore::new(std::env::temp_dir().join("quizboard-test-none"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join("quizboard-test-roundtrip");
        let store = FileStore::new(&dir);

        let snapshot = SessionState::new(25);
        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.total_questions, 25);

        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_file_store_path_uses_storage_name() {
        let store = FileStore::new("/tmp/sessions");
        assert!(
            store
                .path()
                .to_string_lossy()
                .ends_with("quiz-game-storage.json")
        );
    }
}
