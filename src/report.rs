//! End-to-end report pipelines: read, parse, aggregate, render.
//!
//! Each function creates its output directory before reading any input.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::aggregate;
use crate::chart::{self, BarChart, BarSeries, LineChart};
use crate::comparison::{self, ComparisonResult};
use crate::config::{ComparisonConfig, FigureSize, ScalingConfig};
use crate::error::Result;
use crate::parser::parse_benchmark_file;

/// File name of the strong-scaling chart.
pub const STRONG_SCALING_CHART: &str = "del2_ss_speedup_vs_processes.png";
/// File name of the weak-scaling speedup-vs-processes chart.
pub const WEAK_SCALING_PROCESSES_CHART: &str = "del2_ws_speedup_vs_processes.png";
/// File name of the weak-scaling speedup-vs-matrix-size chart.
pub const WEAK_SCALING_SIZE_CHART: &str = "del2_ws_speedup_vs_matrix_size.png";

const PROCESSES_DESC: &str = "Number of processes";
const SPEEDUP_DESC: &str = "Speedup";

/// Labels of the comparison bar series, in file value order.
pub const COMPARISON_LABELS: [&str; 3] = [
    "BASE PARALLEL SPEEDUP",
    "CSR-2 PARALLEL SPEEDUP",
    "CSR-3 PARALLEL SPEEDUP",
];

/// Render the strong-scaling chart for a single-matrix benchmark log.
///
/// Returns the path of the written chart.
///
/// # Errors
///
/// Fails if the log cannot be read, if it covers more than one matrix size,
/// if no record carries a speedup, or if drawing fails.
pub fn strong_scaling_report(config: &ScalingConfig, size: FigureSize) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir)?;
    let dataset = parse_benchmark_file(&config.input)?;
    info!(records = dataset.len(), input = %config.input.display(), "strong scaling dataset");

    let view = aggregate::strong_scaling(&dataset)?;
    let side = view.matrix_side;
    let path = config.output_dir.join(STRONG_SCALING_CHART);
    chart::render_line_chart(
        &path,
        size,
        &LineChart {
            title: format!("Speedup vs Number of Processes ({side}×{side} matrix)"),
            x_desc: PROCESSES_DESC,
            y_desc: SPEEDUP_DESC,
            legend_title: None,
            series: std::slice::from_ref(&view.measured),
            reference: Some(&view.ideal),
            log_x: false,
        },
    )?;
    Ok(path)
}

/// Render both weak-scaling charts for a multi-size benchmark log.
///
/// Returns the chart paths: speedup vs processes, then speedup vs matrix size.
///
/// # Errors
///
/// Fails if the log cannot be read, if no record carries a speedup, or if
/// drawing fails.
pub fn weak_scaling_report(config: &ScalingConfig, size: FigureSize) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&config.output_dir)?;
    let dataset = parse_benchmark_file(&config.input)?;
    info!(
        records = dataset.len(),
        sizes = dataset.distinct_matrix_sizes().len(),
        input = %config.input.display(),
        "weak scaling dataset"
    );

    let by_processes = aggregate::speedup_by_processes(&dataset)?;
    let by_size = aggregate::speedup_by_matrix_size(&dataset)?;
    let ideal = aggregate::ideal_speedup(dataset.max_processes().unwrap_or(0));

    let processes_path = config.output_dir.join(WEAK_SCALING_PROCESSES_CHART);
    chart::render_line_chart(
        &processes_path,
        size,
        &LineChart {
            title: "Speedup vs Number of Processes".to_string(),
            x_desc: PROCESSES_DESC,
            y_desc: SPEEDUP_DESC,
            legend_title: Some("Matrix size"),
            series: &by_processes,
            reference: Some(&ideal),
            log_x: false,
        },
    )?;

    let size_path = config.output_dir.join(WEAK_SCALING_SIZE_CHART);
    chart::render_line_chart(
        &size_path,
        size,
        &LineChart {
            title: "Speedup vs Matrix Size".to_string(),
            x_desc: "Matrix size (rows × cols)",
            y_desc: SPEEDUP_DESC,
            legend_title: Some("Parallelism"),
            series: &by_size,
            reference: None,
            log_x: true,
        },
    )?;

    Ok(vec![processes_path, size_path])
}

/// Render the base / CSR-2 / CSR-3 comparison bar chart.
///
/// # Errors
///
/// Fails if any result file is missing or malformed, or if drawing fails.
pub fn comparison_report(config: &ComparisonConfig, size: FigureSize) -> Result<PathBuf> {
    ensure_parent(&config.output)?;
    let results = comparison::read_comparisons(&config.results_dir, &config.matrices)?;
    info!(matrices = results.len(), "comparison results loaded");

    let (categories, series) = comparison_bars(&results);
    chart::render_bar_chart(
        &config.output,
        size,
        &BarChart {
            x_desc: "Matrixes",
            y_desc: "Speedup %",
            categories: &categories,
            series: &series,
        },
    )?;
    Ok(config.output.clone())
}

/// Split comparison results into category names and one bar series per kernel.
#[must_use]
pub fn comparison_bars(results: &[ComparisonResult]) -> (Vec<String>, Vec<BarSeries>) {
    let categories = results.iter().map(|r| r.matrix.clone()).collect();
    let series = COMPARISON_LABELS
        .iter()
        .enumerate()
        .map(|(k, label)| BarSeries {
            label: (*label).to_string(),
            values: results.iter().map(|r| r.speedups()[k]).collect(),
        })
        .collect();
    (categories, series)
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
