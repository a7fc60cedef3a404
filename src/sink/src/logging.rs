use crate::config::LogFormat;
use crate::constants::DEFAULT_LOG_FILTER;
use anyhow::{Context, Result};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

/// Install the global subscriber. Logs go to stdout, where the hosting
/// platform collects them.
pub fn setup_logging(format: LogFormat) -> Result<()> {
    // RUST_LOG wins when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_timer(SystemTime)
                .with_writer(std::io::stdout);
            tracing::subscriber::set_global_default(registry.with(layer))
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_timer(SystemTime)
                .with_writer(std::io::stdout);
            tracing::subscriber::set_global_default(registry.with(layer))
        }
    };
    result.context("Failed to set tracing subscriber")?;

    tracing::debug!("Logging system initialized ({:?})", format);

    Ok(())
}
