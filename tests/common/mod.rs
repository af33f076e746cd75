//! Common test helpers and fixtures shared across the test suite.

use std::fmt::Write;
use std::path::PathBuf;

/// Path of a file under `tests/data`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Render one benchmark block the way the MPI benchmark writes it.
#[allow(dead_code)]
pub fn block(rows: u64, cols: u64, processes: u64, metrics: &[(&str, f64)]) -> String {
    let mut out = format!("# Row: {rows} - Columns: {cols} - Processes: {processes}\n");
    for (name, value) in metrics {
        writeln!(out, "{name}: {value:.6}").ok();
    }
    out
}
