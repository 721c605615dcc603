//! Tracing setup.
//!
//! The terminal belongs to the TUI, so events go to a log file in the data
//! directory. `TASKDESK_LOG` overrides the configured filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TASKDESK_LOG";

/// Install the global subscriber writing to `log_path`.
///
/// If the file cannot be opened logging stays disabled; it never falls back
/// to stderr while the TUI is drawing.
pub fn init(log_path: &Path, default_filter: &str) {
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => file,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if installed.is_ok() {
        tracing::info!(path = %log_path.display(), "logging initialised");
    }
}
