//! Turning datasets into plottable speedup series.
//!
//! Each function here is a caller-side view over a [`Dataset`]: it sorts and
//! groups explicitly, since the dataset itself stays in file order.

use tracing::warn;

use crate::error::{ReportError, Result};
use crate::record::{matrix_side, Dataset, Record, SPEEDUP};

/// One labelled curve of `(x, speedup)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label
    pub label: String,
    /// Points in drawing order
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Create a series from its label and points.
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Series {
            label: label.into(),
            points,
        }
    }

    /// Largest y value, `None` for an empty series.
    #[must_use]
    pub fn max_y(&self) -> Option<f64> {
        self.points.iter().map(|&(_, y)| y).reduce(f64::max)
    }
}

/// Strong-scaling view: one matrix size, speedup against process count.
#[derive(Debug, Clone, PartialEq)]
pub struct StrongScaling {
    /// Side of the (square) matrix used by every run
    pub matrix_side: u64,
    /// Measured speedup, ascending process count
    pub measured: Series,
    /// Linear reference `y = x`
    pub ideal: Series,
}

/// Ideal linear speedup over `1..=max_processes`.
///
/// The line is straight, so only its endpoints are kept.
///
/// # Examples
///
/// ```
/// use spmv_report::aggregate::ideal_speedup;
///
/// let ideal = ideal_speedup(8);
/// assert_eq!(ideal.points, vec![(1.0, 1.0), (8.0, 8.0)]);
/// ```
#[must_use]
pub fn ideal_speedup(max_processes: u64) -> Series {
    let points = match max_processes {
        0 => Vec::new(),
        1 => vec![(1.0, 1.0)],
        max => {
            let max = max as f64;
            vec![(1.0, 1.0), (max, max)]
        },
    };
    Series::new("Ideal speedup", points)
}

/// `N×N` label for a matrix size.
#[must_use]
pub fn matrix_label(size: u64) -> String {
    let side = matrix_side(size);
    format!("{side}×{side}")
}

/// Build the strong-scaling series.
///
/// # Errors
///
/// - [`ReportError::EmptyDataset`] if there are no records
/// - [`ReportError::InconsistentMatrixSize`] if the runs used several sizes
/// - [`ReportError::MissingMetric`] if no record carries `speedup`
pub fn strong_scaling(dataset: &Dataset) -> Result<StrongScaling> {
    if dataset.is_empty() {
        return Err(ReportError::EmptyDataset(
            "strong scaling needs at least one record".to_string(),
        ));
    }
    let size = dataset.single_matrix_size()?;
    let sorted = dataset.sorted_by_processes();
    let measured = Series::new(
        "Measured speedup",
        speedup_points(sorted.iter(), |r| r.processes as f64),
    );
    if measured.points.is_empty() {
        return Err(ReportError::MissingMetric(SPEEDUP.to_string()));
    }

    Ok(StrongScaling {
        matrix_side: matrix_side(size),
        measured,
        ideal: ideal_speedup(dataset.max_processes().unwrap_or(0)),
    })
}

/// One speedup-vs-processes curve per matrix size, sizes ascending.
///
/// # Errors
///
/// Returns [`ReportError::EmptyDataset`] or [`ReportError::MissingMetric`]
/// when there is nothing to draw.
pub fn speedup_by_processes(dataset: &Dataset) -> Result<Vec<Series>> {
    let series = dataset
        .group_by_matrix_size()
        .into_iter()
        .map(|(size, mut group)| {
            group.sort_by_key(|r| r.processes);
            Series::new(
                matrix_label(size),
                speedup_points(group.into_iter(), |r| r.processes as f64),
            )
        })
        .collect();
    non_empty(dataset, series)
}

/// One speedup-vs-matrix-size curve per process count, counts ascending.
///
/// # Errors
///
/// Returns [`ReportError::EmptyDataset`] or [`ReportError::MissingMetric`]
/// when there is nothing to draw.
pub fn speedup_by_matrix_size(dataset: &Dataset) -> Result<Vec<Series>> {
    let series = dataset
        .group_by_processes()
        .into_iter()
        .map(|(processes, mut group)| {
            group.sort_by_key(|r| r.matrix_size());
            Series::new(
                format!("{processes} processes"),
                speedup_points(group.into_iter(), |r| r.matrix_size() as f64),
            )
        })
        .collect();
    non_empty(dataset, series)
}

fn speedup_points<'a, I, F>(records: I, x: F) -> Vec<(f64, f64)>
where
    I: Iterator<Item = &'a Record>,
    F: Fn(&Record) -> f64,
{
    records
        .filter_map(|r| match r.speedup() {
            Some(speedup) => Some((x(r), speedup)),
            None => {
                warn!(
                    rows = r.rows,
                    cols = r.cols,
                    processes = r.processes,
                    "record has no speedup, left out of chart"
                );
                None
            },
        })
        .collect()
}

fn non_empty(dataset: &Dataset, series: Vec<Series>) -> Result<Vec<Series>> {
    if dataset.is_empty() {
        return Err(ReportError::EmptyDataset(
            "no benchmark records to plot".to_string(),
        ));
    }
    let series: Vec<Series> = series.into_iter().filter(|s| !s.points.is_empty()).collect();
    if series.is_empty() {
        return Err(ReportError::MissingMetric(SPEEDUP.to_string()));
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(side: u64, processes: u64, speedup: f64) -> Record {
        Record::new(side, side, processes).with_metric(SPEEDUP, speedup)
    }

    #[test]
    fn test_ideal_speedup_empty() {
        assert!(ideal_speedup(0).points.is_empty());
        assert_eq!(ideal_speedup(1).points, vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_ideal_speedup_huge_process_count() {
        let ideal = ideal_speedup(4_000_000_000);
        assert_eq!(ideal.points, vec![(1.0, 1.0), (4.0e9, 4.0e9)]);
    }

    #[test]
    fn test_matrix_label() {
        assert_eq!(matrix_label(1_000_000), "1000×1000");
    }

    #[test]
    fn test_strong_scaling_sorted() {
        let ds = Dataset::from(vec![record(100, 8, 6.1), record(100, 2, 1.9), record(100, 4, 3.5)]);
        let s = strong_scaling(&ds).unwrap();
        assert_eq!(s.matrix_side, 100);
        assert_eq!(s.measured.points, vec![(2.0, 1.9), (4.0, 3.5), (8.0, 6.1)]);
        assert_eq!(s.ideal.points, vec![(1.0, 1.0), (8.0, 8.0)]);
        assert_eq!(s.measured.max_y(), Some(6.1));
    }

    #[test]
    fn test_strong_scaling_rejects_mixed_sizes() {
        let ds = Dataset::from(vec![record(100, 2, 1.9), record(200, 4, 3.5)]);
        assert!(matches!(
            strong_scaling(&ds),
            Err(ReportError::InconsistentMatrixSize { .. })
        ));
    }

    #[test]
    fn test_strong_scaling_errors_when_nothing_to_plot() {
        assert!(matches!(
            strong_scaling(&Dataset::new()),
            Err(ReportError::EmptyDataset(_))
        ));
        let ds = Dataset::from(vec![Record::new(10, 10, 2).with_metric("avg_comp_time", 0.1)]);
        assert!(matches!(strong_scaling(&ds), Err(ReportError::MissingMetric(_))));
    }

    #[test]
    fn test_speedup_by_processes_groups() {
        let ds = Dataset::from(vec![
            record(2000, 4, 3.9),
            record(1000, 4, 3.1),
            record(2000, 2, 1.95),
            record(1000, 2, 1.6),
        ]);
        let series = speedup_by_processes(&ds).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "1000×1000");
        assert_eq!(series[0].points, vec![(2.0, 1.6), (4.0, 3.1)]);
        assert_eq!(series[1].label, "2000×2000");
        assert_eq!(series[1].points, vec![(2.0, 1.95), (4.0, 3.9)]);
    }

    #[test]
    fn test_speedup_by_matrix_size_groups() {
        let ds = Dataset::from(vec![
            record(2000, 4, 3.9),
            record(1000, 4, 3.1),
            record(1000, 2, 1.6),
        ]);
        let series = speedup_by_matrix_size(&ds).unwrap();
        assert_eq!(series[0].label, "2 processes");
        assert_eq!(series[0].points, vec![(1_000_000.0, 1.6)]);
        assert_eq!(series[1].label, "4 processes");
        assert_eq!(series[1].points, vec![(1_000_000.0, 3.1), (4_000_000.0, 3.9)]);
    }

    #[test]
    fn test_records_without_speedup_dropped() {
        let ds = Dataset::from(vec![
            record(1000, 2, 1.6),
            Record::new(1000, 1000, 4).with_metric("avg_comp_time", 0.3),
        ]);
        let series = speedup_by_processes(&ds).unwrap();
        assert_eq!(series[0].points, vec![(2.0, 1.6)]);
    }
}
