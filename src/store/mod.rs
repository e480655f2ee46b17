//! Per-profile persistence
//!
//! Learner state lives in a namespaced key-value backend: one entry per
//! (collection, profile) pair holding a JSON document. [`ProfileStore`] adds
//! typed load/save on top, where loads never fail and saves report errors
//! for the caller to log.

pub mod error;
pub mod file;
pub mod memory;
pub mod profile;

pub use error::StoreError;
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use profile::ProfileStore;

/// The kinds of document stored for each profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    MasteryMap,
    ActiveSet,
    ProgressSummary,
    UndoSnapshot,
    ReadingTally,
    TvMinutes,
}

impl Collection {
    /// Versioned name used as the storage key / file stem
    pub fn name(self) -> &'static str {
        match self {
            Collection::MasteryMap => "mastery_v1",
            Collection::ActiveSet => "active_set_v1",
            Collection::ProgressSummary => "progress_v1",
            Collection::UndoSnapshot => "undo_v1",
            Collection::ReadingTally => "reading_tally_v1",
            Collection::TvMinutes => "tv_minutes_v1",
        }
    }
}

/// Address of one stored document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub collection: Collection,
    pub profile: String,
}

impl StorageKey {
    pub fn new(collection: Collection, profile: &str) -> Self {
        Self { collection, profile: profile.to_string() }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.collection.name(), self.profile)
    }
}

/// A namespaced key-value store of JSON documents
pub trait StorageBackend {
    /// Read a document, `None` if it was never written
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError>;

    /// Write (or replace) a document
    fn write(&mut self, key: &StorageKey, contents: &str) -> Result<(), StoreError>;

    /// Delete a document; deleting a missing document is not an error
    fn remove(&mut self, key: &StorageKey) -> Result<(), StoreError>;

    /// Names of every profile with stored data, sorted
    fn profiles(&self) -> Result<Vec<String>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_displays_like_a_namespaced_key() {
        let key = StorageKey::new(Collection::MasteryMap, "Asha");
        assert_eq!(key.to_string(), "mastery_v1::Asha");
    }

    #[test]
    fn collection_names_are_distinct() {
        let all = [
            Collection::MasteryMap,
            Collection::ActiveSet,
            Collection::ProgressSummary,
            Collection::UndoSnapshot,
            Collection::ReadingTally,
            Collection::TvMinutes,
        ];
        let names: std::collections::HashSet<_> = all.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), all.len());
    }
}
