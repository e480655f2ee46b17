//! Typed load/save of learner state

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Collection, StorageBackend, StorageKey, StoreError};
use crate::mastery::{ActiveSet, MasteryMap, ProgressSummary, ReadingTally, UndoSnapshot};

/// Typed access to each profile's collections.
///
/// Loads degrade to defaults when data is missing or unreadable so a bad
/// record never blocks practice; saves return the error for the caller to log.
#[derive(Debug)]
pub struct ProfileStore<B> {
    backend: B,
}

impl<B: StorageBackend> ProfileStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the underlying backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection, profile: &str) -> Option<T> {
        let key = StorageKey::new(collection, profile);
        let raw = match self.backend.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(%key, error = %e, "Failed to read stored data, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%key, error = %e, "Stored data is malformed, using defaults");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(
        &mut self,
        collection: Collection,
        profile: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let key = StorageKey::new(collection, profile);
        let contents = serde_json::to_string_pretty(value)?;
        self.backend.write(&key, &contents)?;
        tracing::debug!(%key, "Saved");
        Ok(())
    }

    pub fn load_mastery_map(&self, profile: &str) -> MasteryMap {
        self.load(Collection::MasteryMap, profile).unwrap_or_default()
    }

    pub fn save_mastery_map(&mut self, profile: &str, map: &MasteryMap) -> Result<(), StoreError> {
        self.save(Collection::MasteryMap, profile, map)
    }

    pub fn load_active_set(&self, profile: &str) -> Option<ActiveSet> {
        self.load::<Option<ActiveSet>>(Collection::ActiveSet, profile).flatten()
    }

    /// Saving `None` records that there is no active set
    pub fn save_active_set(
        &mut self,
        profile: &str,
        set: Option<&ActiveSet>,
    ) -> Result<(), StoreError> {
        self.save(Collection::ActiveSet, profile, &set)
    }

    pub fn load_progress_summary(&self, profile: &str) -> ProgressSummary {
        self.load(Collection::ProgressSummary, profile).unwrap_or_default()
    }

    pub fn save_progress_summary(
        &mut self,
        profile: &str,
        summary: &ProgressSummary,
    ) -> Result<(), StoreError> {
        self.save(Collection::ProgressSummary, profile, summary)
    }

    pub fn load_undo_snapshot(&self, profile: &str) -> Option<UndoSnapshot> {
        self.load::<Option<UndoSnapshot>>(Collection::UndoSnapshot, profile).flatten()
    }

    pub fn save_undo_snapshot(
        &mut self,
        profile: &str,
        snapshot: &UndoSnapshot,
    ) -> Result<(), StoreError> {
        self.save(Collection::UndoSnapshot, profile, snapshot)
    }

    pub fn clear_undo_snapshot(&mut self, profile: &str) -> Result<(), StoreError> {
        self.backend.remove(&StorageKey::new(Collection::UndoSnapshot, profile))
    }

    pub fn load_reading_tally(&self, profile: &str) -> ReadingTally {
        self.load(Collection::ReadingTally, profile).unwrap_or_default()
    }

    pub fn save_reading_tally(
        &mut self,
        profile: &str,
        tally: &ReadingTally,
    ) -> Result<(), StoreError> {
        self.save(Collection::ReadingTally, profile, tally)
    }

    pub fn load_tv_minutes(&self, profile: &str) -> u32 {
        self.load(Collection::TvMinutes, profile).unwrap_or(0)
    }

    pub fn save_tv_minutes(&mut self, profile: &str, minutes: u32) -> Result<(), StoreError> {
        self.save(Collection::TvMinutes, profile, &minutes)
    }

    /// Profiles that have any stored data
    pub fn profiles(&self) -> Result<Vec<String>, StoreError> {
        self.backend.profiles()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::mastery::WordProgress;
    use crate::store::{FileBackend, MemoryBackend};

    fn sample_map() -> MasteryMap {
        let mut map = MasteryMap::new();
        for (i, word) in ["the", "and", "see"].iter().enumerate() {
            map.insert(word.to_string(), WordProgress::new(*word).apply_outcome(i % 2 == 0, 9));
        }
        map
    }

    #[test]
    fn empty_profile_loads_defaults() {
        let store = ProfileStore::new(MemoryBackend::new());

        assert!(store.load_mastery_map("new").is_empty());
        assert_eq!(store.load_active_set("new"), None);
        assert_eq!(store.load_progress_summary("new"), ProgressSummary::default());
        assert_eq!(store.load_undo_snapshot("new"), None);
        assert_eq!(store.load_reading_tally("new"), ReadingTally::default());
        assert_eq!(store.load_tv_minutes("new"), 0);
    }

    #[test]
    fn collections_round_trip() {
        let mut store = ProfileStore::new(MemoryBackend::new());
        let map = sample_map();
        let set = ActiveSet::new(vec!["the".into(), "and".into()], 2, 77);
        let summary = ProgressSummary::for_new_set(&set, 4);

        store.save_mastery_map("kid", &map).unwrap();
        store.save_active_set("kid", Some(&set)).unwrap();
        store.save_progress_summary("kid", &summary).unwrap();
        store.save_tv_minutes("kid", 15).unwrap();

        let loaded = store.load_mastery_map("kid");
        assert_eq!(loaded, map);
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["the", "and", "see"]);
        assert_eq!(store.load_active_set("kid"), Some(set));
        assert_eq!(store.load_progress_summary("kid"), summary);
        assert_eq!(store.load_tv_minutes("kid"), 15);
    }

    #[test]
    fn profiles_do_not_share_state() {
        let mut store = ProfileStore::new(MemoryBackend::new());
        store.save_mastery_map("one", &sample_map()).unwrap();
        assert!(store.load_mastery_map("two").is_empty());
    }

    #[test]
    fn null_active_set_loads_as_none() {
        let mut store = ProfileStore::new(MemoryBackend::new());
        let set = ActiveSet::new(vec!["a".into()], 1, 1);
        store.save_active_set("kid", Some(&set)).unwrap();
        store.save_active_set("kid", None).unwrap();
        assert_eq!(store.load_active_set("kid"), None);
    }

    #[test]
    fn malformed_data_degrades_to_defaults() {
        let mut backend = MemoryBackend::new();
        backend.insert_raw(StorageKey::new(Collection::MasteryMap, "kid"), "{not json");
        backend.insert_raw(StorageKey::new(Collection::ActiveSet, "kid"), "[1,2,3]");
        backend.insert_raw(StorageKey::new(Collection::ProgressSummary, "kid"), "\"oops\"");
        backend.insert_raw(StorageKey::new(Collection::TvMinutes, "kid"), "-4");
        let store = ProfileStore::new(backend);

        assert!(store.load_mastery_map("kid").is_empty());
        assert_eq!(store.load_active_set("kid"), None);
        assert_eq!(store.load_progress_summary("kid"), ProgressSummary::default());
        assert_eq!(store.load_tv_minutes("kid"), 0);
    }

    #[test]
    fn reads_records_written_by_the_web_app() {
        let mut backend = MemoryBackend::new();
        backend.insert_raw(
            StorageKey::new(Collection::MasteryMap, "kid"),
            r#"{"cat":{"word":"cat","streak":2,"attempts":3,"lastSeen":1700000000000,"mastered":false}}"#,
        );
        backend.insert_raw(
            StorageKey::new(Collection::ProgressSummary, "kid"),
            r#"{"currentSetId":null,"setNumber":0,"totalSets":0,"masteredCount":0}"#,
        );
        let store = ProfileStore::new(backend);

        let map = store.load_mastery_map("kid");
        assert_eq!(map["cat"].streak, 2);
        assert_eq!(map["cat"].last_seen, 1_700_000_000_000);
        assert_eq!(store.load_progress_summary("kid"), ProgressSummary::default());
    }

    #[test]
    fn failed_write_is_reported() {
        let mut store = ProfileStore::new(MemoryBackend::failing());
        assert!(store.save_tv_minutes("kid", 3).is_err());
        assert_eq!(store.load_tv_minutes("kid"), 0);
    }

    #[test]
    fn undo_snapshot_can_be_cleared() {
        let mut store = ProfileStore::new(MemoryBackend::new());
        let snapshot = UndoSnapshot::capture(
            &sample_map(),
            None,
            &ProgressSummary::default(),
            "the",
            true,
            1,
        );

        store.save_undo_snapshot("kid", &snapshot).unwrap();
        assert_eq!(store.load_undo_snapshot("kid"), Some(snapshot));

        store.clear_undo_snapshot("kid").unwrap();
        assert_eq!(store.load_undo_snapshot("kid"), None);
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let map = sample_map();

        let mut store = ProfileStore::new(FileBackend::new(dir.path()));
        store.save_mastery_map("kid", &map).unwrap();
        drop(store);

        let store = ProfileStore::new(FileBackend::new(dir.path()));
        assert_eq!(store.load_mastery_map("kid"), map);
        assert_eq!(store.profiles().unwrap(), vec!["kid"]);
    }
}
