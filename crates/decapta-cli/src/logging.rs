//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or everything from
/// debug up with `--verbose`. Logs go to stderr so command output stays
/// clean.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    // A second init in the same process keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
    tracing::debug!("verbose mode enabled");
}
