//! Error types for benchmark report operations.
//!
//! This module provides the [`ReportError`] type for all library operations
//! and the [`Result`] convenience type.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all report operations.
///
/// Malformed benchmark lines are never errors; the parser skips them. The
/// variants here cover unreadable inputs, caller-side invariant checks, and
/// rendering failures.
#[derive(Error, Debug)]
pub enum ReportError {
    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// More (or fewer) than one distinct matrix size where exactly one is expected.
    #[error("Expected exactly one matrix size, found {}: {:?}", .sizes.len(), .sizes)]
    InconsistentMatrixSize {
        /// Every distinct `rows * cols` value found, ascending.
        sizes: Vec<u64>,
    },

    /// A report needed a metric that no record carries.
    #[error("No record carries the '{0}' metric")]
    MissingMetric(String),

    /// Nothing to plot.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A comparison result file could not be interpreted.
    #[error("Invalid comparison results in {}: {reason}", .path.display())]
    InvalidComparison {
        /// File that failed to parse.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Drawing backend failure.
    #[error("Chart error: {0}")]
    Chart(String),
}

/// Convenience type alias for [`std::result::Result`] with [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
