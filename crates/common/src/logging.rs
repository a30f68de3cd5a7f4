//! Logging and tracing initialization.
//!
//! Library crates only emit `tracing` events; binaries call [`init_logging`]
//! once at startup. `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::SmilyResult;

/// Initialize the tracing subscriber with the given configuration.
///
/// When `config.file` is set, log lines are appended to that file instead of
/// stderr. Installing a second global subscriber is silently ignored.
pub fn init_logging(config: &LoggingConfig) -> SmilyResult<()> {
    let env_filter = filter_for(&config.level);

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match (&config.file, config.json) {
        (Some(path), true) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = builder.json().with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (Some(path), false) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, true) => {
            let subscriber = builder.json().with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, false) => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }

    Ok(())
}

/// Route log output through the test harness so it is captured per test.
pub fn init_test_logging() {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter_for("debug"))
        .with_test_writer()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
