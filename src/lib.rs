#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # spmv-report
//!
//! Parse the text logs written by the SpMV benchmark runs and turn them into
//! speedup charts.
//!
//! ## Quick Start
//!
//! ```
//! use spmv_report::{aggregate, parse_benchmark};
//!
//! let log = concat!(
//!     "# Row: 1000 - Columns: 1000 - Processes: 2\nspeedup: 1.9\n",
//!     "# Row: 1000 - Columns: 1000 - Processes: 4\nspeedup: 3.6\n",
//! );
//! let dataset = parse_benchmark(log);
//! let view = aggregate::strong_scaling(&dataset)?;
//! assert_eq!(view.matrix_side, 1000);
//! assert_eq!(view.measured.points, vec![(2.0, 1.9), (4.0, 3.6)]);
//! # Ok::<(), spmv_report::ReportError>(())
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — Benchmark log parsing (`BenchmarkParser`, `parse_benchmark`)
//! - [`record`] — `Record` and `Dataset`
//! - [`aggregate`] — Sorting and grouping datasets into chart series
//! - [`comparison`] — Per-matrix base / CSR-2 / CSR-3 speedup files
//! - [`chart`] — PNG line and grouped bar charts
//! - [`report`] — The three end-to-end report pipelines
//! - [`config`] — Default input and output locations
//! - [`error`] — Error types and result type
//! - [`logging`] — `tracing` subscriber setup for the binaries

pub mod aggregate;
pub mod chart;
pub mod comparison;
pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod record;
pub mod report;

pub use aggregate::{Series, StrongScaling};
pub use comparison::ComparisonResult;
pub use config::{ComparisonConfig, FigureSize, ReportConfig, ScalingConfig};
pub use error::{ReportError, Result};
pub use parser::{
    parse_benchmark, parse_benchmark_file, parse_benchmark_reader, BenchmarkLine, BenchmarkParser,
};
pub use record::{Dataset, Record};
