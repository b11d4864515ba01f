//! The four classic sorts, operating on the live record sequence.
//!
//! Each public method sorts by one [`Field`] in the requested direction and
//! appends an entry to the store's sort history. Comparisons go through
//! [`crate::field::compare`], which is partial: an incomparable pair is
//! skipped as a no-op instead of aborting the sort.

use std::cmp::Ordering;

use crate::field::{compare, Field};
use crate::model::Mahasiswa;
use crate::store::{MahasiswaStore, SortAlgorithm};

impl MahasiswaStore {
    /// Bubble sort: adjacent swaps with an early exit once a full pass
    /// makes no swap.
    pub fn bubble_sort(&mut self, field: Field, ascending: bool) {
        bubble(&mut self.records, field, ascending);
        self.record_sort(field, ascending, SortAlgorithm::Bubble);
    }

    /// Selection sort: repeatedly swap the extreme remaining record into
    /// place.
    pub fn selection_sort(&mut self, field: Field, ascending: bool) {
        selection(&mut self.records, field, ascending);
        self.record_sort(field, ascending, SortAlgorithm::Selection);
    }

    /// Insertion sort: shift each record left until it sits in order.
    pub fn insertion_sort(&mut self, field: Field, ascending: bool) {
        insertion(&mut self.records, field, ascending);
        self.record_sort(field, ascending, SortAlgorithm::Insertion);
    }

    /// Quick sort with the middle record as pivot and a three-way
    /// partition. Descending order swaps the recursive less/greater halves
    /// instead of inverting the comparison, so equal-keyed records keep
    /// their relative order in both directions.
    pub fn quick_sort(&mut self, field: Field, ascending: bool) {
        let records = std::mem::take(&mut self.records);
        self.records = quick(records, field, ascending);
        self.record_sort(field, ascending, SortAlgorithm::Quick);
    }
}

/// True when `a` must come after `b` in the requested direction.
/// Incomparable pairs are never out of order.
fn out_of_order(a: &Mahasiswa, b: &Mahasiswa, field: Field, ascending: bool) -> bool {
    match compare(a, b, field) {
        Some(Ordering::Greater) => ascending,
        Some(Ordering::Less) => !ascending,
        _ => false,
    }
}

fn bubble(records: &mut [Mahasiswa], field: Field, ascending: bool) {
    let n = records.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if out_of_order(&records[j], &records[j + 1], field, ascending) {
                records.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

fn selection(records: &mut [Mahasiswa], field: Field, ascending: bool) {
    let n = records.len();
    for i in 0..n {
        let mut sel = i;
        for j in i + 1..n {
            if out_of_order(&records[sel], &records[j], field, ascending) {
                sel = j;
            }
        }
        if sel != i {
            records.swap(i, sel);
        }
    }
}

fn insertion(records: &mut [Mahasiswa], field: Field, ascending: bool) {
    for i in 1..records.len() {
        let mut j = i;
        while j > 0 && out_of_order(&records[j - 1], &records[j], field, ascending) {
            records.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn quick(records: Vec<Mahasiswa>, field: Field, ascending: bool) -> Vec<Mahasiswa> {
    if records.len() <= 1 {
        return records;
    }

    let pivot = records[records.len() / 2].clone();
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for record in records {
        match compare(&record, &pivot, field) {
            Some(Ordering::Less) => less.push(record),
            Some(Ordering::Greater) => greater.push(record),
            // Equal and incomparable records stay with the pivot.
            _ => equal.push(record),
        }
    }

    let (head, tail) = if ascending {
        (less, greater)
    } else {
        (greater, less)
    };
    let mut out = quick(head, field, ascending);
    out.extend(equal);
    out.extend(quick(tail, field, ascending));
    out
}
