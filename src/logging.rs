use std::io;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays reserved for the feed itself in dry runs.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn configure_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_log = fmt::layer().with_writer(io::stderr).with_filter(filter);

    tracing_subscriber::registry().with(stderr_log).init();
}
