use std::io;

use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// `RUST_LOG` wins over `default_filter`. Output goes to stderr, stdout is
/// reserved for results.
pub fn setup_telemetry(default_filter: &str) {
    let filter = filter(default_filter);
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true);

    // a subscriber may already be installed, e.g. by a test harness
    let installed = tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .try_init()
        .is_ok();
    if installed {
        debug!(default_filter, "telemetry initialized");
    }
}

fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
