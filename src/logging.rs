//! Logging initialization.
//!
//! Logs go to stderr; stdout is reserved for line protocol output.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted when `RUST_LOG` is not set.
pub const LOG_LEVEL_ENV: &str = "SALTER_LOG_LEVEL";

/// Pick the filter directive: `RUST_LOG` wins, then [`LOG_LEVEL_ENV`], then
/// `debug` for verbose runs and `info` otherwise.
pub fn filter_directive(rust_log: Option<String>, level: Option<String>, verbose: bool) -> String {
    let set = |d: &String| !d.trim().is_empty();
    rust_log
        .filter(set)
        .or_else(|| level.filter(set))
        .unwrap_or_else(|| if verbose { "debug" } else { "info" }.to_string())
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter directive cannot be parsed or a global
/// subscriber is already set.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directive = filter_directive(
        std::env::var("RUST_LOG").ok(),
        std::env::var(LOG_LEVEL_ENV).ok(),
        verbose,
    );
    let env_filter = EnvFilter::try_new(directive)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
