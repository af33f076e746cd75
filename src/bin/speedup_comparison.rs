//! Grouped bars comparing the base, CSR-2, and CSR-3 parallel kernels.
//!
//! Reads `to_plot/<matrix>.mtx_results.txt` for each configured matrix and
//! writes `speedup_plot.png`.

use anyhow::Context;
use spmv_report::{logging, report, ReportConfig};

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = ReportConfig::default();

    let path = report::comparison_report(&config.comparison, config.bar_figure)
        .with_context(|| {
            format!(
                "comparison report from '{}' failed",
                config.comparison.results_dir.display()
            )
        })?;

    tracing::info!(chart = %path.display(), "comparison report done");
    Ok(())
}
