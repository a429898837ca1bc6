//! `tracing` subscriber setup.
//!
//! Without a log file, events go to stderr filtered at `warn`, so nothing
//! lands on the screen while the TUI owns it. With `--log-file`, events are
//! appended to that file at `info`. `RUST_LOG` overrides either default.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_directive = if log_file.is_some() { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .context("logging already initialised")?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("logging already initialised")?;
        }
    }
    Ok(())
}

/// Whether a fatal error should also go through `tracing`.
///
/// `main` always prints fatal errors to stderr. Without a log file the
/// subscriber writes to stderr too, so logging it would print it twice.
pub fn records_failures(log_file: Option<&Path>) -> bool {
    log_file.is_some()
}
