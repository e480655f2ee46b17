//! In-memory storage backend

use std::collections::{BTreeSet, HashMap};

use super::{StorageBackend, StorageKey, StoreError};

/// Keeps documents in a `HashMap`. Writes can be made to fail, which is
/// how callers' handling of a full or broken store is exercised.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<StorageKey, String>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes and removals always fail
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    /// Toggle write failures
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Put a raw document in place, bypassing serialization
    pub fn insert_raw(&mut self, key: StorageKey, contents: impl Into<String>) {
        self.entries.insert(key, contents.into());
    }

    /// Raw document for a key
    pub fn raw(&self, key: &StorageKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn check_writable(&self, key: &StorageKey) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::io(
                key.to_string(),
                std::io::Error::new(std::io::ErrorKind::StorageFull, "storage quota exceeded"),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &StorageKey, contents: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.insert(key.clone(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }

    fn profiles(&self) -> Result<Vec<String>, StoreError> {
        let names: BTreeSet<&str> = self.entries.keys().map(|k| k.profile.as_str()).collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}
