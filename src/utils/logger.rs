//! Logging setup
//!
//! Diagnostics go to stderr so the demonstration transcript on stdout stays
//! readable and can be asserted on.

use crate::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialise the global tracing subscriber
///
/// # Arguments
/// * `log_level` - filter directive (e.g. `debug`, `proclab=trace`); when `None`
///   the `PROCLAB_LOG` then `RUST_LOG` environment variables are consulted,
///   falling back to `warn`
///
/// # Examples
/// ```no_run
/// use proclab::utils::logger::init_logger;
///
/// init_logger(None).unwrap();
/// ```
pub fn init_logger(log_level: Option<&str>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logger initialized");
    Ok(())
}
