//! Speedup curves across matrix sizes and process counts.
//!
//! Reads `results/to_plot/del2_ws.txt` and writes
//! `plots/del2_ws_speedup_vs_processes.png` and
//! `plots/del2_ws_speedup_vs_matrix_size.png`.

use anyhow::Context;
use spmv_report::{logging, report, ReportConfig};

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = ReportConfig::default();

    let paths = report::weak_scaling_report(&config.weak_scaling, config.line_figure)
        .with_context(|| {
            format!(
                "weak scaling report from '{}' failed",
                config.weak_scaling.input.display()
            )
        })?;

    for path in &paths {
        tracing::info!(chart = %path.display(), "weak scaling chart written");
    }
    Ok(())
}
