//! Workout record store.
//!
//! Owns the canonical collection (newest first by insertion) and rewrites
//! the full snapshot under [`WORKOUTS_KEY`] after every mutation. Loading
//! never fails: missing or corrupt data yields an empty history.

use crate::storage::{Storage, WORKOUTS_KEY};
use crate::view::{self, ViewQuery};
use crate::{Error, Result, WorkoutRecord};
use uuid::Uuid;

/// Canonical workout history backed by a [`Storage`]
pub struct WorkoutStore<S: Storage> {
    storage: S,
    records: Vec<WorkoutRecord>,
}

impl<S: Storage> WorkoutStore<S> {
    /// Restore the collection from storage.
    ///
    /// Unreadable or unparsable snapshots are logged and treated as empty.
    /// Individual entries that fail to parse or violate record invariants
    /// are skipped.
    pub fn load(storage: S) -> Self {
        let records = match storage.get_item(WORKOUTS_KEY) {
            Ok(Some(contents)) => parse_snapshot(&contents),
            Ok(None) => {
                tracing::info!("No workout history found, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read workout history: {}. Starting empty.", e);
                Vec::new()
            }
        };

        Self { storage, records }
    }

    /// Records in canonical order (newest first)
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Insert a record at the head and persist the whole collection
    pub fn append(&mut self, record: WorkoutRecord) -> Result<&[WorkoutRecord]> {
        record.validate()?;
        let id = record.id;
        self.records.insert(0, record);

        if let Err(e) = self.persist() {
            self.records.remove(0);
            return Err(e);
        }

        tracing::info!("Logged workout {} ({} total)", id, self.records.len());
        Ok(&self.records)
    }

    /// Delete the record with `id` and persist the whole collection
    pub fn remove(&mut self, id: Uuid) -> Result<WorkoutRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::RecordNotFound(id))?;
        let removed = self.records.remove(index);

        if let Err(e) = self.persist() {
            self.records.insert(index, removed);
            return Err(e);
        }

        tracing::info!("Deleted workout {} ({} remaining)", id, self.records.len());
        Ok(removed)
    }

    /// Delete the record displayed at `position` of the view for `query`.
    ///
    /// The position is resolved to a record id first, so the canonical
    /// collection is never indexed with a view position.
    pub fn remove_at(&mut self, query: &ViewQuery, position: usize) -> Result<WorkoutRecord> {
        let id = {
            let entries = view::compute(&self.records, query);
            view::id_at(&entries, position).ok_or(Error::IndexOutOfRange {
                index: position,
                len: entries.len(),
            })?
        };
        self.remove(id)
    }

    fn persist(&mut self) -> Result<()> {
        let contents = serde_json::to_string(&self.records)?;
        self.storage.set_item(WORKOUTS_KEY, &contents)
    }
}

fn parse_snapshot(contents: &str) -> Vec<WorkoutRecord> {
    let entries = match serde_json::from_str::<Vec<serde_json::Value>>(contents) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to parse workout history: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    let total = entries.len();
    let records: Vec<WorkoutRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<WorkoutRecord>(entry) {
            Ok(record) => match record.validate() {
                Ok(()) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping workout at position {}: {}", i, e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to parse workout at position {}: {}", i, e);
                None
            }
        })
        .collect();

    tracing::debug!("Loaded {} of {} stored workouts", records.len(), total);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::{Category, SortOrder, WorkoutForm};

    fn workout(gym: &str, category: &str) -> WorkoutRecord {
        let mut form = WorkoutForm::default();
        form.gym_location = gym.into();
        form.category = category.into();
        form.name = "Deadlift".into();
        form.set_set_count("2");
        form.weights = vec!["315".into()];
        form.reps = vec!["5".into()];
        form.build_now().unwrap()
    }

    /// Storage whose writes always fail
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Other("read-only".into()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_append_inserts_newest_first() {
        crate::logging::init_test();
        let mut store = WorkoutStore::load(MemoryStorage::new());
        let first = workout("Downtown", "Legs");
        let second = workout("Uptown", "Back");

        store.append(first.clone()).unwrap();
        let records = store.append(second.clone()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[1].id, first.id);
    }

    #[test]
    fn test_persist_and_reload_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = WorkoutStore::load(FileStorage::new(temp_dir.path()));

        let mut cable = WorkoutForm::default();
        cable.gym_location = "Home".into();
        cable.name = "Face Pull".into();
        cable.exercise_type = "cable".into();
        cable.cable_height = "eye level".into();
        cable.weight_unit = "kg".into();
        cable.set_set_count("3");
        cable.set_same_weight(false);
        cable.weights = vec!["12.5".into(), "15".into(), "17.25".into()];
        cable.reps = vec!["15".into()];

        store.append(workout("Downtown", "Legs")).unwrap();
        store.append(cable.build_now().unwrap()).unwrap();

        let reloaded = WorkoutStore::load(FileStorage::new(temp_dir.path()));
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.records()[0].category, Category::Uncategorized);
    }

    #[test]
    fn test_missing_storage_loads_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = WorkoutStore::load(FileStorage::new(temp_dir.path().join("absent")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(WORKOUTS_KEY, "{ not an array").unwrap();
        let store = WorkoutStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let good = workout("Downtown", "Legs");
        let good_id = good.id;
        let mut bad = serde_json::to_value(workout("Uptown", "Arms")).unwrap();
        bad["reps"] = serde_json::json!([5]);

        let snapshot = serde_json::json!([good, bad, {"garbage": true}]).to_string();
        let mut storage = MemoryStorage::new();
        storage.set_item(WORKOUTS_KEY, &snapshot).unwrap();

        let store = WorkoutStore::load(storage);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, good_id);
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = WorkoutStore::load(MemoryStorage::new());
        let a = workout("A", "Legs");
        let b = workout("B", "Legs");
        store.append(a.clone()).unwrap();
        store.append(b.clone()).unwrap();

        let removed = store.remove(a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(store.len(), 1);
        assert!(store.get(b.id).is_some());

        assert!(matches!(store.remove(a.id), Err(Error::RecordNotFound(id)) if id == a.id));
    }

    #[test]
    fn test_remove_at_targets_filtered_record() {
        let mut store = WorkoutStore::load(MemoryStorage::new());
        let downtown = workout("Downtown", "Legs");
        let uptown = workout("Uptown", "Back");
        let home = workout("Home", "Arms");
        store.append(downtown.clone()).unwrap();
        store.append(uptown.clone()).unwrap();
        store.append(home.clone()).unwrap();

        // Only one visible record; position 0 of the view is index 2 canonically
        let query = ViewQuery::new("downtown", SortOrder::Newest);
        let removed = store.remove_at(&query, 0).unwrap();

        assert_eq!(removed.id, downtown.id);
        let remaining: Vec<Uuid> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![home.id, uptown.id]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = WorkoutStore::load(MemoryStorage::new());
        store.append(workout("Downtown", "Legs")).unwrap();

        let query = ViewQuery::new("uptown", SortOrder::Newest);
        assert!(matches!(
            store.remove_at(&query, 0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_rejects_invalid_record() {
        let mut store = WorkoutStore::load(MemoryStorage::new());
        let mut record = workout("Downtown", "Legs");
        record.weights.push(10.0);
        assert!(matches!(store.append(record), Err(Error::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let mut store = WorkoutStore::load(ReadOnlyStorage);
        assert!(store.append(workout("Downtown", "Legs")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins_across_stores() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut first = WorkoutStore::load(FileStorage::new(temp_dir.path()));
        let mut second = WorkoutStore::load(FileStorage::new(temp_dir.path()));

        let a = workout("A", "Legs");
        let b = workout("B", "Legs");
        first.append(a).unwrap();
        second.append(b.clone()).unwrap();

        // Each write persists its owner's whole in-memory collection
        let reloaded = WorkoutStore::load(FileStorage::new(temp_dir.path()));
        let ids: Vec<Uuid> = reloaded.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id]);
    }
}
