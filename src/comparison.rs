//! Per-matrix speedup triples for the CSR variant comparison.
//!
//! The OpenMP benchmark writes one `<matrix>.mtx_results.txt` file per input
//! matrix, each holding a list literal `[base, csr2, csr3]` with the speedup
//! of the plain parallel kernel and of the two blocked CSR variants.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReportError, Result};

/// File name suffix appended to the matrix name.
pub const RESULTS_SUFFIX: &str = ".mtx_results.txt";

/// Speedups measured for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Matrix name, e.g. `1138_bus`
    pub matrix: String,
    /// Speedup of the base parallel kernel
    pub base: f64,
    /// Speedup of the two-level (CSR-2) kernel
    pub csr2: f64,
    /// Speedup of the three-level (CSR-3) kernel
    pub csr3: f64,
}

impl ComparisonResult {
    /// Parse the contents of a results file.
    ///
    /// Only the first three values are used; extra values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if the text is not a list of numbers and
    /// [`ReportError::InvalidComparison`] if it holds fewer than three.
    ///
    /// # Examples
    ///
    /// ```
    /// use spmv_report::comparison::ComparisonResult;
    ///
    /// let r = ComparisonResult::parse("bcspwr08", "[1.5, 2.25, 3.0]").unwrap();
    /// assert_eq!(r.csr2, 2.25);
    /// ```
    pub fn parse(matrix: impl Into<String>, text: &str) -> Result<Self> {
        let matrix = matrix.into();
        let values: Vec<f64> = serde_json::from_str(text.trim())?;
        match values.as_slice() {
            [base, csr2, csr3, ..] => Ok(ComparisonResult {
                matrix,
                base: *base,
                csr2: *csr2,
                csr3: *csr3,
            }),
            _ => Err(ReportError::InvalidComparison {
                path: PathBuf::from(format!("{matrix}{RESULTS_SUFFIX}")),
                reason: format!("expected 3 values, found {}", values.len()),
            }),
        }
    }

    /// The three speedups in plotting order.
    #[must_use]
    pub fn speedups(&self) -> [f64; 3] {
        [self.base, self.csr2, self.csr3]
    }
}

/// Path of the results file for `matrix` inside `dir`.
#[must_use]
pub fn results_path(dir: &Path, matrix: &str) -> PathBuf {
    dir.join(format!("{matrix}{RESULTS_SUFFIX}"))
}

/// Read the results file for one matrix.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a list of at
/// least three numbers.
pub fn read_comparison(dir: &Path, matrix: &str) -> Result<ComparisonResult> {
    let path = results_path(dir, matrix);
    debug!(path = %path.display(), "reading comparison results");
    let text = fs::read_to_string(&path)?;
    ComparisonResult::parse(matrix, &text).map_err(|e| match e {
        ReportError::InvalidComparison { reason, .. } => ReportError::InvalidComparison {
            path: path.clone(),
            reason,
        },
        ReportError::Json(json) => ReportError::InvalidComparison {
            path: path.clone(),
            reason: json.to_string(),
        },
        other => other,
    })
}

/// Read the results for every matrix, in the given order.
///
/// # Errors
///
/// Fails on the first matrix whose file is missing or malformed.
pub fn read_comparisons<S: AsRef<str>>(
    dir: &Path,
    matrices: &[S],
) -> Result<Vec<ComparisonResult>> {
    matrices
        .iter()
        .map(|m| read_comparison(dir, m.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triple() {
        let r = ComparisonResult::parse("1138_bus", "[0.8, 1.9, 2.4]\n").unwrap();
        assert_eq!(r.matrix, "1138_bus");
        assert_eq!(r.speedups(), [0.8, 1.9, 2.4]);
    }

    #[test]
    fn test_parse_integers_and_extras() {
        let r = ComparisonResult::parse("m", "[1, 2, 3, 4]").unwrap();
        assert_eq!(r.speedups(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_too_short() {
        let err = ComparisonResult::parse("m", "[1.0, 2.0]").unwrap_err();
        assert!(matches!(err, ReportError::InvalidComparison { .. }));
        assert!(err.to_string().contains("expected 3 values, found 2"));
    }

    #[test]
    fn test_parse_not_a_list() {
        assert!(matches!(
            ComparisonResult::parse("m", "speedup: 2.0"),
            Err(ReportError::Json(_))
        ));
    }

    #[test]
    fn test_results_path() {
        assert_eq!(
            results_path(Path::new("to_plot"), "bcspwr10"),
            PathBuf::from("to_plot/bcspwr10.mtx_results.txt")
        );
    }

    #[test]
    fn test_read_comparisons_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(results_path(dir.path(), "b"), "[2.0, 3.0, 4.0]").unwrap();
        fs::write(results_path(dir.path(), "a"), "[1.0, 1.5, 1.75]").unwrap();

        let results = read_comparisons(dir.path(), &["b", "a"]).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.matrix.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_read_comparison_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = results_path(dir.path(), "bad");
        fs::write(&path, "[oops]").unwrap();

        match read_comparison(dir.path(), "bad") {
            Err(ReportError::InvalidComparison { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            read_comparison(dir.path(), "missing"),
            Err(ReportError::Io(_))
        ));
    }
}
