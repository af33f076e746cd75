//! Parsing benchmark logs into datasets.
//!
//! The benchmark program appends one block per run to its result file:
//!
//! ```text
//! # Row: 1000 - Columns: 1000 - Processes: 4
//! avg_comp_time: 0.012000
//! speedup: 3.412000
//! ```
//!
//! A `#` line carrying a `Row/Columns/Processes` triple opens a new record and
//! the `name: value` lines that follow attach metrics to it. Everything else is
//! skipped without error.
//!
//! # Examples
//!
//! ```
//! use spmv_report::parser::parse_benchmark;
//!
//! let dataset = parse_benchmark("# Row: 10 - Columns: 10 - Processes: 4\nspeedup: 3.5\n");
//! let record = &dataset.records()[0];
//! assert_eq!((record.rows, record.cols, record.processes), (10, 10, 4));
//! assert_eq!(record.speedup(), Some(3.5));
//! ```
//!
//! # Flush rules
//!
//! A header only seals the in-progress record if that record already has a
//! metric; a metric-less record is replaced by the new header. At end of input
//! the in-progress record is sealed unconditionally, so a trailing header with
//! no metrics still produces a record. Existing result files depend on this
//! asymmetry, so it is kept as is.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::record::{Dataset, Record};

const COMMENT_MARKER: char = '#';

lazy_static! {
    static ref HEADER_PATTERN: Regex =
        Regex::new(r"Row:\s*(\d+)\s*-\s*Columns:\s*(\d+)\s*-\s*Processes:\s*(\d+)")
            .expect("header pattern is valid");
    static ref METRIC_PATTERN: Regex =
        Regex::new(r"^(\w+):\s*([0-9.]+)").expect("metric pattern is valid");
}

/// Classification of a single (trimmed) log line.
#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkLine<'a> {
    /// `# Row: <int> - Columns: <int> - Processes: <int>`
    Header {
        /// Matrix row count
        rows: u64,
        /// Matrix column count
        cols: u64,
        /// Process count
        processes: u64,
    },
    /// `<identifier>: <number>`
    Metric {
        /// Metric name
        name: &'a str,
        /// Parsed value
        value: f64,
    },
    /// Anything else.
    Ignored,
}

impl<'a> BenchmarkLine<'a> {
    /// Classify one line of a benchmark log.
    ///
    /// Surrounding whitespace is trimmed first. Comment lines are only ever
    /// headers; metric lines must start with the identifier. A metric whose
    /// captured number is not a valid float (e.g. `1.2.3`) is
    /// [`BenchmarkLine::Ignored`], as is a header whose integers overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use spmv_report::parser::BenchmarkLine;
    ///
    /// assert_eq!(
    ///     BenchmarkLine::classify("speedup: 2.5"),
    ///     BenchmarkLine::Metric { name: "speedup", value: 2.5 }
    /// );
    /// assert_eq!(BenchmarkLine::classify("speedup: abc"), BenchmarkLine::Ignored);
    /// ```
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();

        if line.starts_with(COMMENT_MARKER) {
            return Self::parse_header(line).unwrap_or(BenchmarkLine::Ignored);
        }

        Self::parse_metric(line).unwrap_or(BenchmarkLine::Ignored)
    }

    fn parse_header(line: &str) -> Option<Self> {
        let caps = HEADER_PATTERN.captures(line)?;
        Some(BenchmarkLine::Header {
            rows: caps.get(1)?.as_str().parse().ok()?,
            cols: caps.get(2)?.as_str().parse().ok()?,
            processes: caps.get(3)?.as_str().parse().ok()?,
        })
    }

    fn parse_metric(line: &'a str) -> Option<Self> {
        let caps = METRIC_PATTERN.captures(line)?;
        Some(BenchmarkLine::Metric {
            name: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str().parse().ok()?,
        })
    }
}

/// Line-at-a-time accumulator that turns a benchmark log into a [`Dataset`].
///
/// Most callers want [`parse_benchmark`] or [`parse_benchmark_file`]; the
/// accumulator is exposed for feeding lines from other sources.
///
/// # Examples
///
/// ```
/// use spmv_report::parser::BenchmarkParser;
///
/// let mut parser = BenchmarkParser::new();
/// parser.feed_line("# Row: 8 - Columns: 8 - Processes: 2");
/// parser.feed_line("speedup: 1.9");
/// let dataset = parser.finish();
/// assert_eq!(dataset.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct BenchmarkParser {
    dataset: Dataset,
    current: Option<Record>,
    lines_seen: usize,
}

impl BenchmarkParser {
    /// Create an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line.
    pub fn feed_line(&mut self, line: &str) {
        self.lines_seen += 1;

        match BenchmarkLine::classify(line) {
            BenchmarkLine::Header {
                rows,
                cols,
                processes,
            } => {
                if let Some(previous) = self.current.take() {
                    if previous.has_metrics() {
                        self.seal(previous);
                    } else {
                        trace!(
                            line = self.lines_seen,
                            "header replaces a record with no metrics"
                        );
                    }
                }
                self.current = Some(Record::new(rows, cols, processes));
            },
            BenchmarkLine::Metric { name, value } => match self.current.as_mut() {
                Some(record) => record.set_metric(name, value),
                None => trace!(
                    line = self.lines_seen,
                    metric = name,
                    "metric before any header ignored"
                ),
            },
            BenchmarkLine::Ignored => {
                trace!(line = self.lines_seen, "ignored line");
            },
        }
    }

    /// Seal the in-progress record (even without metrics) and return the dataset.
    #[must_use]
    pub fn finish(mut self) -> Dataset {
        if let Some(last) = self.current.take() {
            self.seal(last);
        }
        debug!(
            lines = self.lines_seen,
            records = self.dataset.len(),
            "benchmark log parsed"
        );
        self.dataset
    }

    fn seal(&mut self, record: Record) {
        debug!(
            rows = record.rows,
            cols = record.cols,
            processes = record.processes,
            metrics = record.metrics.len(),
            "sealed benchmark record"
        );
        self.dataset.push(record);
    }
}

/// Parse the full text of a benchmark log.
///
/// Never fails: lines that match neither pattern are skipped.
#[must_use]
pub fn parse_benchmark(text: &str) -> Dataset {
    let mut parser = BenchmarkParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Parse a benchmark log from any buffered reader.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8.
pub fn parse_benchmark_reader<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut parser = BenchmarkParser::new();
    for line in reader.lines() {
        parser.feed_line(&line?);
    }
    Ok(parser.finish())
}

/// Parse a benchmark log file.
///
/// # Errors
///
/// Returns [`ReportError::Io`](crate::ReportError::Io) if the file is missing
/// or unreadable.
pub fn parse_benchmark_file(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading benchmark log");
    let file = File::open(path)?;
    parse_benchmark_reader(BufReader::new(file))
}
