//! Logging utilities wrapping `tracing` initialisation

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LoggingOptions;
use crate::error::{Error, Result};

/// Initialise the global tracing subscriber according to the provided logging options.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// because stdout carries the QR renderings. Subsequent calls are ignored.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = filter(options)?;

    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(options.color)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

fn filter(options: &LoggingOptions) -> Result<EnvFilter> {
    let level = std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| options.level.clone());
    EnvFilter::try_new(level.as_str()).map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}
