//! Tracing setup.
//!
//! The terminal front-end owns stdout and stderr, so log lines either go to
//! a file or nowhere.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Without a log file nothing is installed and every event is dropped.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init(log_file: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .ok();
    Ok(())
}
