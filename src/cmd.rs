//! Command implementations for the CLI interface.

use std::fs;
use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::config::Config;
use crate::db::TaskStore;
use crate::error::AppError;
use crate::session::Session;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::tui::run::run_tui;

/// Open the task store described by `config` and run the TUI on it.
pub fn cmd_ui(config: &Config) -> Result<(), AppError> {
    prepare_data_dir(config)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        page_size = config.page_size,
        in_memory = config.in_memory,
        "starting session"
    );

    let backend: Box<dyn Storage> = if config.in_memory {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(FileStorage::new(&config.data_dir))
    };
    let store = TaskStore::open(backend, config.seed);
    let mut session = Session::new(store, config.page_size);

    run_tui(&mut session)?;

    if session.store().has_unsaved_changes() {
        eprintln!(
            "Warning: the last changes could not be saved; see {}",
            config.log_path().display()
        );
    }
    tracing::info!(tasks = session.list_all().len(), "session closed");
    Ok(())
}

/// Create the data directory and start file logging. In-memory sessions
/// leave the disk untouched and run without a log.
fn prepare_data_dir(config: &Config) -> Result<(), AppError> {
    if config.in_memory {
        return Ok(());
    }
    fs::create_dir_all(&config.data_dir).map_err(|source| AppError::DataDir {
        path: config.data_dir.clone(),
        source,
    })?;
    crate::logging::init(&config.log_path(), &config.log_filter);
    Ok(())
}

/// Print shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::SeedMode;
    use tempfile::TempDir;

    fn config(data_dir: std::path::PathBuf, in_memory: bool) -> Config {
        Config {
            data_dir,
            page_size: 5,
            seed: SeedMode::Empty,
            log_filter: "info".to_string(),
            in_memory,
        }
    }

    #[test]
    fn test_in_memory_session_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        prepare_data_dir(&config(dir.clone(), true)).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_file_session_creates_data_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("data");
        prepare_data_dir(&config(dir.clone(), false)).unwrap();
        assert!(dir.is_dir());
    }
}
