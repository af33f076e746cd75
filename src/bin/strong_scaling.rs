//! Speedup vs number of processes for a single matrix size.
//!
//! Reads `results/to_plot/del2_ss.txt` and writes
//! `plots/del2_ss_speedup_vs_processes.png`.

use anyhow::Context;
use spmv_report::{logging, report, ReportConfig};

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = ReportConfig::default();

    let path = report::strong_scaling_report(&config.strong_scaling, config.line_figure)
        .with_context(|| {
            format!(
                "strong scaling report from '{}' failed",
                config.strong_scaling.input.display()
            )
        })?;

    tracing::info!(chart = %path.display(), "strong scaling report done");
    Ok(())
}
