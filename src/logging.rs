//! Tracing subscriber setup driven by [`LoggingConfig`]

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level when set. Calling this more
/// than once (e.g. from multiple tests) is harmless; later calls are
/// ignored.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    // A subscriber set elsewhere (tests, embedding application) wins.
    let _ = result;
    Ok(())
}
