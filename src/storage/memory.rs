use std::collections::HashMap;

use super::{BlobStore, PersistError};

/// In-process blob store. Used by tests and as a fallback when no data
/// directory is writable.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    failing: bool,
    saves: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent load and save fail.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        if self.failing {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        if self.failing {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        self.blobs.insert(key.to_string(), blob.to_string());
        self.saves += 1;
        Ok(())
    }
}
