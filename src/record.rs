//! Benchmark record structures and dataset operations.
//!
//! This module provides the core types produced by the log parser:
//! - [`Record`] — One observation for a `(rows, cols, processes)` configuration
//! - [`Dataset`] — The ordered collection of records parsed from one log
//!
//! # Examples
//!
//! ```
//! use spmv_report::{Dataset, Record};
//!
//! let mut record = Record::new(100, 100, 4);
//! record.set_metric("speedup", 3.2);
//!
//! let dataset = Dataset::from(vec![record]);
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.single_matrix_size().unwrap(), 10_000);
//! ```

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Name of the metric plotted by every report.
pub const SPEEDUP: &str = "speedup";

/// One benchmark observation.
///
/// The configuration triple always comes from a single header line. Metrics
/// are discovered from the log text and kept in the order they first
/// appeared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Matrix row count
    pub rows: u64,
    /// Matrix column count
    pub cols: u64,
    /// Number of processes the run used
    pub processes: u64,
    /// Metric name -> value, preserves insertion order
    pub metrics: IndexMap<String, f64>,
}

impl Record {
    /// Create a record with no metrics.
    #[must_use]
    pub fn new(rows: u64, cols: u64, processes: u64) -> Self {
        Record {
            rows,
            cols,
            processes,
            metrics: IndexMap::new(),
        }
    }

    /// Set (or overwrite) a metric value.
    ///
    /// Overwriting keeps the metric in its original position.
    pub fn set_metric(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.insert(name.into(), value);
    }

    /// Builder-style variant of [`Record::set_metric`].
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_metric(name, value);
        self
    }

    /// Look up a metric by name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// The `speedup` metric, if the log emitted one.
    #[must_use]
    pub fn speedup(&self) -> Option<f64> {
        self.metric(SPEEDUP)
    }

    /// Whether any metric has been attached.
    #[must_use]
    pub fn has_metrics(&self) -> bool {
        !self.metrics.is_empty()
    }

    /// Number of matrix elements (`rows * cols`), saturating on overflow.
    #[must_use]
    pub fn matrix_size(&self) -> u64 {
        self.rows.saturating_mul(self.cols)
    }

    /// Side length of the square matrix with the same element count.
    ///
    /// Used for `N×N` labels; non-square matrices round down.
    #[must_use]
    pub fn matrix_side(&self) -> u64 {
        matrix_side(self.matrix_size())
    }
}

/// Integer square root of a matrix size, rounded down.
#[must_use]
pub fn matrix_side(size: u64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut side = (size as f64).sqrt() as u64;
    // Float rounding can land one off for large sizes.
    while square_exceeds(side, size) {
        side -= 1;
    }
    while !square_exceeds(side + 1, size) {
        side += 1;
    }
    side
}

fn square_exceeds(side: u64, size: u64) -> bool {
    side.checked_mul(side).map_or(true, |square| square > size)
}

/// Ordered collection of records, in the order the log listed them.
///
/// The dataset never reorders itself. Callers that need a particular order
/// ask for it explicitly, e.g. [`Dataset::sorted_by_processes`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sealed record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Copy of the dataset sorted by process count.
    ///
    /// The sort is stable: records with equal process counts keep file order.
    #[must_use]
    pub fn sorted_by_processes(&self) -> Dataset {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.processes);
        Dataset { records }
    }

    /// Distinct matrix sizes, ascending.
    #[must_use]
    pub fn distinct_matrix_sizes(&self) -> Vec<u64> {
        let mut sizes: Vec<u64> = self.records.iter().map(Record::matrix_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// The one matrix size every record shares.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InconsistentMatrixSize`] if the dataset holds
    /// zero or several distinct sizes.
    pub fn single_matrix_size(&self) -> Result<u64> {
        match self.distinct_matrix_sizes().as_slice() {
            [size] => Ok(*size),
            sizes => Err(ReportError::InconsistentMatrixSize {
                sizes: sizes.to_vec(),
            }),
        }
    }

    /// Records grouped by matrix size, keys ascending, groups in file order.
    #[must_use]
    pub fn group_by_matrix_size(&self) -> BTreeMap<u64, Vec<&Record>> {
        self.group_by(Record::matrix_size)
    }

    /// Records grouped by process count, keys ascending, groups in file order.
    #[must_use]
    pub fn group_by_processes(&self) -> BTreeMap<u64, Vec<&Record>> {
        self.group_by(|r| r.processes)
    }

    fn group_by<F>(&self, key: F) -> BTreeMap<u64, Vec<&Record>>
    where
        F: Fn(&Record) -> u64,
    {
        let mut groups: BTreeMap<u64, Vec<&Record>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(key(record)).or_default().push(record);
        }
        groups
    }

    /// Largest process count, `None` when empty.
    #[must_use]
    pub fn max_processes(&self) -> Option<u64> {
        self.records.iter().map(|r| r.processes).max()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset { records }
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rows: u64, cols: u64, processes: u64, speedup: f64) -> Record {
        Record::new(rows, cols, processes).with_metric(SPEEDUP, speedup)
    }

    #[test]
    fn test_metric_overwrite_keeps_position() {
        let mut r = Record::new(10, 10, 2);
        r.set_metric("avg_comp_time", 0.5);
        r.set_metric("speedup", 1.5);
        r.set_metric("avg_comp_time", 0.25);

        let names: Vec<&str> = r.metrics.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["avg_comp_time", "speedup"]);
        assert_eq!(r.metric("avg_comp_time"), Some(0.25));
        assert_eq!(r.speedup(), Some(1.5));
    }

    #[test]
    fn test_matrix_size_and_side() {
        let r = Record::new(1000, 1000, 8);
        assert_eq!(r.matrix_size(), 1_000_000);
        assert_eq!(r.matrix_side(), 1000);
        assert_eq!(Record::new(10, 20, 1).matrix_side(), 14);
        assert_eq!(matrix_side(0), 0);
        assert_eq!(matrix_side(u64::MAX), 4_294_967_295);
    }

    #[test]
    fn test_sorted_by_processes_is_stable() {
        let ds = Dataset::from(vec![
            record(10, 10, 8, 6.0),
            record(10, 10, 2, 1.9),
            record(20, 20, 2, 1.8),
            record(10, 10, 4, 3.7),
        ]);
        let sorted = ds.sorted_by_processes();
        let order: Vec<(u64, u64)> = sorted.iter().map(|r| (r.processes, r.rows)).collect();
        assert_eq!(order, vec![(2, 10), (2, 20), (4, 10), (8, 10)]);
        // Original untouched
        assert_eq!(ds.records()[0].processes, 8);
    }

    #[test]
    fn test_single_matrix_size() {
        let ds = Dataset::from(vec![record(10, 10, 1, 1.0), record(10, 10, 2, 1.9)]);
        assert_eq!(ds.single_matrix_size().unwrap(), 100);

        let mixed = Dataset::from(vec![record(10, 10, 1, 1.0), record(20, 20, 2, 1.9)]);
        match mixed.single_matrix_size() {
            Err(ReportError::InconsistentMatrixSize { sizes }) => assert_eq!(sizes, vec![100, 400]),
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(
            Dataset::new().single_matrix_size(),
            Err(ReportError::InconsistentMatrixSize { sizes }) if sizes.is_empty()
        ));
    }

    #[test]
    fn test_grouping_keys_ascending() {
        let ds = Dataset::from(vec![
            record(20, 20, 4, 3.0),
            record(10, 10, 4, 2.5),
            record(20, 20, 2, 1.9),
        ]);
        let by_size = ds.group_by_matrix_size();
        assert_eq!(by_size.keys().copied().collect::<Vec<_>>(), vec![100, 400]);
        let big: Vec<u64> = by_size[&400].iter().map(|r| r.processes).collect();
        assert_eq!(big, vec![4, 2]);

        let by_procs = ds.group_by_processes();
        assert_eq!(by_procs.keys().copied().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(by_procs[&4].len(), 2);
        assert_eq!(ds.max_processes(), Some(4));
    }

    #[test]
    fn test_record_json_shape() {
        let r = Record::new(4, 4, 2).with_metric("speedup", 1.5);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"rows":4,"cols":4,"processes":2,"metrics":{"speedup":1.5}}"#
        );
    }
}
