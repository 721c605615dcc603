//! # taskdesk
//!
//! A single-user task tracker for the terminal.
//!
//! ## Key Features
//!
//! - **Create, edit and delete tasks** with a title, description, status,
//!   priority and due date
//! - **Search** across title, description, status and priority
//! - **Sort** by any column, toggling direction on repeat
//! - **Paginated list** with a configurable page size
//! - **Local storage**: one JSON file in `~/.taskdesk`, written after every
//!   change; a missing or damaged file falls back to example tasks
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI
//! taskdesk
//!
//! # Try it without touching disk, starting empty
//! taskdesk --in-memory --seed empty
//!
//! # Shell completions
//! taskdesk completions zsh
//! ```
//!
//! Settings can be placed in `~/.taskdesk/config.toml`:
//!
//! ```toml
//! page_size = 10
//! seed = "empty"
//! log_filter = "taskdesk=debug"
//! ```

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod seed;
pub mod session;
pub mod storage;
pub mod task;
pub mod validate;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::{Cli, Commands};
use cmd::*;
use config::Config;
use error::AppError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("taskdesk: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Ui => {
            let config = Config::load(cli)?;
            cmd_ui(&config)
        }
    }
}
