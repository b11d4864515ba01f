//! Search strategies over the live record store.
//!
//! All three searches are read-only and return clones; result order is the
//! store's display order.

use std::cmp::Ordering;

use crate::field::Field;
use crate::model::Mahasiswa;
use crate::store::MahasiswaStore;

impl MahasiswaStore {
    /// Case-insensitive substring match of `keyword` against the string
    /// form of one field. Matches are returned in store order.
    pub fn linear_search(&self, keyword: &str, field: Field) -> Vec<Mahasiswa> {
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|record| field.text_of(record).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Exact-NIM lookup via binary search.
    ///
    /// Sorts a fresh copy of the records by NIM, binary-searches that copy,
    /// and on a hit rescans the live sequence so the returned record is the
    /// one at its original display position. The per-call re-sort makes
    /// this O(n log n) — a known inefficiency kept because presentation
    /// order must stay untouched and no sorted index is maintained.
    pub fn binary_search(&self, nim: &str) -> Option<Mahasiswa> {
        if self.records.is_empty() {
            return None;
        }

        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| a.nim().cmp(b.nim()));

        let mut lo = 0;
        let mut hi = sorted.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match sorted[mid].nim().cmp(nim) {
                Ordering::Equal => {
                    return self.records.iter().find(|r| r.nim() == nim).cloned();
                }
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }
        None
    }

    /// Conjunctive multi-field search: a record matches when every
    /// criterion with a non-empty value matches case-insensitively as a
    /// substring. An empty criteria list matches everything.
    pub fn multi_search(&self, criteria: &[(Field, &str)]) -> Vec<Mahasiswa> {
        let needles: Vec<(Field, String)> = criteria
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (*field, value.to_lowercase()))
            .collect();

        self.records
            .iter()
            .filter(|record| {
                needles
                    .iter()
                    .all(|(field, needle)| field.text_of(record).to_lowercase().contains(needle))
            })
            .cloned()
            .collect()
    }
}
