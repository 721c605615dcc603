use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::fields::SeedMode;

/// Single-user task tracker with a terminal UI.
/// Tasks are saved under ~/.taskdesk or the directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "taskdesk", version, about = "Track tasks from the terminal")]
pub struct Cli {
    /// Directory holding saved tasks, config.toml and the log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Read settings from this file instead of <data-dir>/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Rows per page in the task list.
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Tasks to start with when nothing has been saved yet.
    #[arg(long, value_enum, global = true)]
    pub seed: Option<SeedMode>,

    /// Keep tasks in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
