//! # The Record Store
//!
//! [`MahasiswaStore`] owns an ordered sequence of [`Mahasiswa`] records.
//! Insertion order is the display order and is preserved across a
//! save/load cycle; sorting is the only operation that rearranges it.
//!
//! ## Invariants
//!
//! - No two records share a NIM. `add` and `edit` enforce this before
//!   touching the sequence.
//! - The cursor is `None` exactly when the store is empty; otherwise it is
//!   a valid index. `remove` re-clamps it, `load` resets it to the first
//!   record.
//! - Records never leave the store by reference for mutation: readers get
//!   either a shared borrow or a clone, so every change flows through the
//!   store and keeps uniqueness and timestamps consistent.
//!
//! ## Sort history
//!
//! Every sort invocation appends a [`SortEntry`] to an append-only history.
//! The statistics module reports its length; nothing ever removes entries.
//!
//! ## Autosave
//!
//! When enabled, each successful `add`/`edit`/`remove` hands a snapshot of
//! the record list to a background worker which writes it to the data path.
//! The snapshot is cloned at dispatch time, so later mutations cannot leak
//! into an in-flight write. Worker failures are logged and swallowed; the
//! synchronous [`DataOperations::save_to_file`] is the durable path.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Result, SimakError};
use crate::field::Field;
use crate::model::{timestamp, Mahasiswa};
use crate::persist::{self, Autosaver};

/// The sort implementations the store offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Quick => "Quick Sort",
        };
        f.write_str(name)
    }
}

/// One entry in the append-only sort history.
#[derive(Debug, Clone, Serialize)]
pub struct SortEntry {
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub field: Field,
    pub ascending: bool,
    pub algorithm: SortAlgorithm,
    /// Record count at the time of the sort.
    pub count: usize,
}

/// Display/save/load capability. Collaborators (a GUI, a periodic save
/// timer) depend on this trait rather than on the concrete store.
pub trait DataOperations {
    /// Numbered listing of every record, one per line.
    fn display(&self) -> String;

    /// Synchronous save to the configured data path.
    fn save_to_file(&self) -> Result<()>;

    /// Load from the configured data path, replacing the current records.
    /// Returns `false` when no file exists (no prior data); a corrupt or
    /// unreadable file is an error.
    fn load_from_file(&mut self) -> Result<bool>;
}

/// Ordered, uniquely-keyed collection of student records with a navigation
/// cursor and a sort history.
pub struct MahasiswaStore {
    /// Exposed as pub(crate) for the search/sort impl blocks only.
    pub(crate) records: Vec<Mahasiswa>,
    pub(crate) history: Vec<SortEntry>,
    cursor: Option<usize>,
    data_path: PathBuf,
    autosaver: Option<Autosaver>,
}

impl Default for MahasiswaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MahasiswaStore {
    /// An empty store writing to the default data path, autosave off.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            history: Vec::new(),
            cursor: None,
            data_path: PathBuf::from(persist::DEFAULT_DATA_PATH),
            autosaver: None,
        }
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Enable background autosave: every successful mutation dispatches a
    /// snapshot to a worker thread. Failures there are logged, not raised.
    pub fn with_autosave(mut self) -> Self {
        self.autosaver = Some(Autosaver::spawn());
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosaver.is_some()
    }

    // --- CRUD ---

    /// Append a record. Fails with [`SimakError::DuplicateNim`] if the NIM
    /// is already registered.
    pub fn add(&mut self, record: Mahasiswa) -> Result<()> {
        if self.records.iter().any(|r| r.nim() == record.nim()) {
            return Err(SimakError::DuplicateNim(record.nim().to_string()));
        }
        self.records.push(record);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
        self.autosave();
        Ok(())
    }

    /// Replace the record at `index`. Returns `Ok(false)` when the index is
    /// out of range; fails with [`SimakError::DuplicateNim`] when another
    /// record already holds the new NIM.
    pub fn edit(&mut self, index: usize, record: Mahasiswa) -> Result<bool> {
        if index >= self.records.len() {
            return Ok(false);
        }
        let collision = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != index && r.nim() == record.nim());
        if collision {
            return Err(SimakError::DuplicateNim(record.nim().to_string()));
        }
        self.records[index] = record;
        self.autosave();
        Ok(true)
    }

    /// Remove and return the record at `index`, or `None` when out of
    /// range. The cursor is re-clamped to stay in bounds.
    pub fn remove(&mut self, index: usize) -> Option<Mahasiswa> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);
        if self.records.is_empty() {
            self.cursor = None;
        } else if let Some(c) = self.cursor {
            self.cursor = Some(c.min(self.records.len() - 1));
        }
        self.autosave();
        Some(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Mahasiswa> {
        self.records.get(index)
    }

    /// Defensive copy of the whole collection, in display order.
    pub fn get_all(&self) -> Vec<Mahasiswa> {
        self.records.clone()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // --- Cursor navigation ---

    /// Advance the cursor by one, clamped at the last record.
    pub fn next(&mut self) -> Option<usize> {
        if let Some(c) = self.cursor {
            if c + 1 < self.records.len() {
                self.cursor = Some(c + 1);
            }
        }
        self.cursor
    }

    /// Move the cursor back by one, clamped at the first record.
    pub fn prev(&mut self) -> Option<usize> {
        if let Some(c) = self.cursor {
            if c > 0 {
                self.cursor = Some(c - 1);
            }
        }
        self.cursor
    }

    pub fn first(&mut self) -> Option<usize> {
        if !self.records.is_empty() {
            self.cursor = Some(0);
        }
        self.cursor
    }

    pub fn last(&mut self) -> Option<usize> {
        if !self.records.is_empty() {
            self.cursor = Some(self.records.len() - 1);
        }
        self.cursor
    }

    /// Point the cursor at `index`. An out-of-range index falls back to the
    /// first record; on an empty store the cursor stays unset.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = if index < self.records.len() {
            Some(index)
        } else if !self.records.is_empty() {
            Some(0)
        } else {
            None
        };
    }

    /// Current cursor position; `None` when the store is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Mahasiswa> {
        self.cursor.and_then(|c| self.records.get(c))
    }

    // --- Sort history ---

    pub fn sort_history(&self) -> &[SortEntry] {
        &self.history
    }

    pub(crate) fn record_sort(&mut self, field: Field, ascending: bool, algorithm: SortAlgorithm) {
        self.history.push(SortEntry {
            timestamp: crate::model::now(),
            field,
            ascending,
            algorithm,
            count: self.records.len(),
        });
    }

    // --- Persistence plumbing ---

    /// Save to an explicit path instead of the configured one.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        persist::save(&self.records, path)
    }

    /// Load from an explicit path, replacing the current records and
    /// resetting the cursor. Returns `false` when the file does not exist.
    pub fn load_from(&mut self, path: &Path) -> Result<bool> {
        let Some(records) = persist::load(path)? else {
            return Ok(false);
        };
        self.cursor = if records.is_empty() { None } else { Some(0) };
        self.records = records;
        Ok(true)
    }

    /// Export every record to a CSV file.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        persist::export_csv(&self.records, path)
    }

    fn autosave(&self) {
        if let Some(saver) = &self.autosaver {
            saver.dispatch(self.records.clone(), self.data_path.clone());
        }
    }
}

impl DataOperations for MahasiswaStore {
    fn display(&self) -> String {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{}. {}", i + 1, record))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn save_to_file(&self) -> Result<()> {
        self.save_as(&self.data_path)
    }

    fn load_from_file(&mut self) -> Result<bool> {
        let path = self.data_path.clone();
        self.load_from(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nim: &str, nama: &str, ipk: f64) -> Mahasiswa {
        Mahasiswa::try_new(nim, nama, "Teknik Informatika", "", "", ipk).unwrap()
    }

    fn store_with(count: usize) -> MahasiswaStore {
        let mut store = MahasiswaStore::new();
        for i in 0..count {
            store
                .add(record(
                    &format!("{:012}", i + 1),
                    &format!("Mahasiswa {}", "A".repeat(i + 1)),
                    2.0,
                ))
                .unwrap();
        }
        store
    }

    // --- CRUD ---

    #[test]
    fn test_add_and_count() {
        let store = store_with(3);
        assert_eq!(store.count(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_add_duplicate_nim_rejected() {
        let mut store = MahasiswaStore::new();
        store.add(record("111111111111", "Siti Rahayu", 3.0)).unwrap();

        let result = store.add(record("111111111111", "Budi Santoso", 2.0));

        assert!(matches!(result, Err(SimakError::DuplicateNim(nim)) if nim == "111111111111"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut store = store_with(2);

        let replaced = store
            .edit(1, record("999999999999", "Putri Ayu", 3.9))
            .unwrap();

        assert!(replaced);
        assert_eq!(store.get(1).unwrap().nim(), "999999999999");
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_edit_out_of_range_is_not_an_error() {
        let mut store = store_with(1);
        let replaced = store.edit(5, record("999999999999", "Putri Ayu", 3.9)).unwrap();
        assert!(!replaced);
    }

    #[test]
    fn test_edit_duplicate_with_other_index_rejected() {
        let mut store = store_with(2);

        // Record 0 holds 000000000001; give record 1 the same NIM.
        let result = store.edit(1, record("000000000001", "Putri Ayu", 3.9));

        assert!(matches!(result, Err(SimakError::DuplicateNim(_))));
        assert_eq!(store.get(1).unwrap().nim(), "000000000002");
    }

    #[test]
    fn test_edit_keeping_own_nim_is_allowed() {
        let mut store = store_with(2);
        let replaced = store
            .edit(0, record("000000000001", "Putri Ayu", 3.9))
            .unwrap();
        assert!(replaced);
        assert_eq!(store.get(0).unwrap().nama(), "Putri Ayu");
    }

    #[test]
    fn test_remove_returns_record() {
        let mut store = store_with(3);
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.nim(), "000000000002");
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_remove_out_of_range_returns_none() {
        let mut store = store_with(1);
        assert!(store.remove(7).is_none());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_get_all_is_a_copy() {
        let store = store_with(2);
        let mut copy = store.get_all();
        copy.clear();
        assert_eq!(store.count(), 2);
    }

    // --- Cursor ---

    #[test]
    fn test_cursor_unset_on_empty_store() {
        let mut store = MahasiswaStore::new();
        assert_eq!(store.cursor(), None);
        assert_eq!(store.next(), None);
        assert_eq!(store.prev(), None);
        assert!(store.current().is_none());
    }

    #[test]
    fn test_cursor_points_at_first_record_after_add() {
        let store = store_with(1);
        assert_eq!(store.cursor(), Some(0));
    }

    #[test]
    fn test_next_clamps_at_last_index() {
        let mut store = store_with(2);
        assert_eq!(store.next(), Some(1));
        assert_eq!(store.next(), Some(1));
    }

    #[test]
    fn test_prev_clamps_at_zero() {
        let mut store = store_with(2);
        store.next();
        assert_eq!(store.prev(), Some(0));
        assert_eq!(store.prev(), Some(0));
    }

    #[test]
    fn test_first_and_last() {
        let mut store = store_with(3);
        assert_eq!(store.last(), Some(2));
        assert_eq!(store.first(), Some(0));
    }

    #[test]
    fn test_set_cursor_out_of_range_falls_back_to_first() {
        let mut store = store_with(2);
        store.set_cursor(9);
        assert_eq!(store.cursor(), Some(0));
    }

    #[test]
    fn test_set_cursor_on_empty_store_stays_unset() {
        let mut store = MahasiswaStore::new();
        store.set_cursor(0);
        assert_eq!(store.cursor(), None);
    }

    #[test]
    fn test_remove_reclamps_cursor() {
        let mut store = store_with(3);
        store.set_cursor(2);

        store.remove(2);

        assert_eq!(store.cursor(), Some(1));
    }

    #[test]
    fn test_remove_last_record_clears_cursor() {
        let mut store = store_with(1);
        store.remove(0);
        assert_eq!(store.cursor(), None);
    }

    #[test]
    fn test_current_follows_cursor() {
        let mut store = store_with(2);
        store.next();
        assert_eq!(store.current().unwrap().nim(), "000000000002");
    }

    // --- Display ---

    #[test]
    fn test_display_numbers_records() {
        let mut store = MahasiswaStore::new();
        store.add(record("111111111111", "Siti Rahayu", 3.5)).unwrap();
        store.add(record("222222222222", "Budi Santoso", 2.0)).unwrap();

        let listing = store.display();

        let mut lines = listing.lines();
        assert_eq!(
            lines.next().unwrap(),
            "1. 111111111111 - Siti Rahayu - Teknik Informatika - IPK: 3.50"
        );
        assert!(lines.next().unwrap().starts_with("2. 222222222222"));
    }

    #[test]
    fn test_display_through_trait_object() {
        let store = store_with(1);
        let ops: &dyn DataOperations = &store;
        assert!(ops.display().starts_with("1. "));
    }

    // --- Sort history ---

    #[test]
    fn test_history_starts_empty() {
        let store = store_with(2);
        assert!(store.sort_history().is_empty());
    }

    #[test]
    fn test_record_sort_appends_entry() {
        let mut store = store_with(2);
        store.record_sort(Field::Ipk, true, SortAlgorithm::Bubble);

        let entry = &store.sort_history()[0];
        assert_eq!(entry.field, Field::Ipk);
        assert!(entry.ascending);
        assert_eq!(entry.algorithm, SortAlgorithm::Bubble);
        assert_eq!(entry.count, 2);
    }

    #[test]
    fn test_sort_algorithm_display_names() {
        assert_eq!(SortAlgorithm::Bubble.to_string(), "Bubble Sort");
        assert_eq!(SortAlgorithm::Quick.to_string(), "Quick Sort");
    }
}
