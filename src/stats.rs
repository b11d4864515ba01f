//! Aggregate statistics over the current collection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::MahasiswaStore;

/// Snapshot of the collection's aggregates at the moment of computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub avg_ipk: f64,
    pub max_ipk: f64,
    pub min_ipk: f64,
    /// Record count per jurusan.
    pub jurusan_distribution: BTreeMap<String, usize>,
    /// Number of sort invocations recorded in the history.
    pub total_sort_operations: usize,
}

impl MahasiswaStore {
    /// Compute aggregates for the current records, or `None` when the
    /// store is empty.
    pub fn statistics(&self) -> Option<Statistics> {
        if self.records.is_empty() {
            return None;
        }

        let total = self.records.len();
        let sum: f64 = self.records.iter().map(|r| r.ipk()).sum();
        let max_ipk = self.records.iter().map(|r| r.ipk()).fold(f64::MIN, f64::max);
        let min_ipk = self.records.iter().map(|r| r.ipk()).fold(f64::MAX, f64::min);

        let mut jurusan_distribution: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            *jurusan_distribution
                .entry(record.jurusan().to_string())
                .or_insert(0) += 1;
        }

        Some(Statistics {
            total,
            avg_ipk: sum / total as f64,
            max_ipk,
            min_ipk,
            jurusan_distribution,
            total_sort_operations: self.history.len(),
        })
    }
}
