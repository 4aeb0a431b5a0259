//! File logging setup.
//!
//! The TUI owns the terminal, so logs always go to
//! `$OJO_HOME/logs/ojo.log` through a non-blocking appender. The filter
//! comes from `OJO_LOG` when set, otherwise from `[log] level` in config.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "OJO_LOG";

/// File name of the log inside the logs directory.
pub const LOG_FILE_NAME: &str = "ojo.log";

/// Keeps the background log writer alive; flushes on drop.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Initializes the global subscriber writing to the default logs directory.
///
/// # Errors
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &Config) -> Result<LogGuard> {
    init_in(&paths::logs_dir(), config)
}

/// Initializes the global subscriber writing to `dir/ojo.log`.
///
/// # Errors
/// Returns an error if `dir` cannot be created or a global subscriber is
/// already installed.
pub fn init_in(dir: &Path, config: &Config) -> Result<LogGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter_for(config))
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LogGuard { _guard: guard })
}

/// Builds the log filter: `OJO_LOG` > config > "info".
fn filter_for(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
