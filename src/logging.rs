//! Log output for the report binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a formatted subscriber honouring `RUST_LOG`, defaulting to
/// `spmv_report=info`.
///
/// Calling it twice in one process is a no-op the second time.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spmv_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
