//! Input and output locations for the report binaries.
//!
//! The binaries take no arguments: every path and figure size comes from
//! [`ReportConfig::default`]. Tests and library callers override fields with
//! struct update syntax.
//!
//! # Examples
//!
//! ```
//! use spmv_report::config::{ReportConfig, ScalingConfig};
//!
//! let config = ReportConfig {
//!     strong_scaling: ScalingConfig::new("runs/ss.txt", "out"),
//!     ..Default::default()
//! };
//! assert_eq!(config.line_figure.width, 2400);
//! ```

use std::path::PathBuf;

/// Pixel dimensions of a rendered figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FigureSize {
    /// Create a figure size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        FigureSize { width, height }
    }
}

/// 8×5 inches at 300 dpi.
pub const LINE_FIGURE: FigureSize = FigureSize::new(2400, 1500);

/// 12×8 inches at 100 dpi.
pub const BAR_FIGURE: FigureSize = FigureSize::new(1200, 800);

/// Where a scaling report reads its log and writes its charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingConfig {
    /// Benchmark log to parse
    pub input: PathBuf,
    /// Directory for the rendered charts, created if absent
    pub output_dir: PathBuf,
}

impl ScalingConfig {
    /// Create a scaling config.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        ScalingConfig {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Where the CSR comparison report reads result files and writes its chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// Directory holding `<matrix>.mtx_results.txt` files
    pub results_dir: PathBuf,
    /// Matrices to plot, in x axis order
    pub matrices: Vec<String>,
    /// Chart file; its parent directory is created if absent
    pub output: PathBuf,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            results_dir: PathBuf::from("to_plot"),
            matrices: ["1138_bus", "bcspwr08", "bcspwr10", "bcsstk25", "illc1850"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            output: PathBuf::from("speedup_plot.png"),
        }
    }
}

/// Configuration for all three reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Single-matrix runs across process counts
    pub strong_scaling: ScalingConfig,
    /// Runs across matrix sizes and process counts
    pub weak_scaling: ScalingConfig,
    /// Base vs CSR-2 vs CSR-3 speedups
    pub comparison: ComparisonConfig,
    /// Size of the line charts
    pub line_figure: FigureSize,
    /// Size of the bar chart
    pub bar_figure: FigureSize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            strong_scaling: ScalingConfig::new("results/to_plot/del2_ss.txt", "plots"),
            weak_scaling: ScalingConfig::new("results/to_plot/del2_ws.txt", "plots"),
            comparison: ComparisonConfig::default(),
            line_figure: LINE_FIGURE,
            bar_figure: BAR_FIGURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ReportConfig::default();
        assert_eq!(
            config.strong_scaling.input,
            PathBuf::from("results/to_plot/del2_ss.txt")
        );
        assert_eq!(
            config.weak_scaling.input,
            PathBuf::from("results/to_plot/del2_ws.txt")
        );
        assert_eq!(config.weak_scaling.output_dir, PathBuf::from("plots"));
        assert_eq!(config.comparison.matrices.len(), 5);
        assert_eq!(config.comparison.matrices[0], "1138_bus");
        assert_eq!(config.bar_figure, FigureSize::new(1200, 800));
    }
}
