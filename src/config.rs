//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional `config.toml` in the
//! data directory (or the file passed with `--config`), then CLI flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::fields::SeedMode;
use crate::view::DEFAULT_PAGE_SIZE;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub page_size: Option<usize>,
    pub seed: Option<SeedMode>,
    pub log_filter: Option<String>,
}

/// Fully resolved settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub page_size: usize,
    pub seed: SeedMode,
    pub log_filter: String,
    pub in_memory: bool,
}

impl Config {
    /// Resolve configuration for `cli`, reading the config file if present.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        let file = match &cli.config {
            // an explicitly named file must exist
            Some(path) => Some(read_file_config(path)?),
            None => read_optional_file_config(&data_dir.join(CONFIG_FILE_NAME))?,
        };
        Self::resolve(cli, data_dir, file.unwrap_or_default())
    }

    fn resolve(cli: &Cli, data_dir: PathBuf, file: FileConfig) -> Result<Self, ConfigError> {
        let page_size = cli.page_size.or(file.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(Config {
            data_dir,
            page_size,
            seed: cli.seed.or(file.seed).unwrap_or_default(),
            log_filter: file.log_filter.unwrap_or_else(|| "info".to_string()),
            in_memory: cli.in_memory,
        })
    }

    /// Where the log file lives.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("taskdesk.log")
    }
}

/// `$HOME/.taskdesk`, or `./.taskdesk` when `HOME` is unset.
pub fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".taskdesk")
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_config(path, &text)
}

fn read_optional_file_config(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => parse_file_config(path, &text).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_file_config(path: &Path, text: &str) -> Result<FileConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("taskdesk").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let config = Config::load(&cli(&["--data-dir", dir_arg])).unwrap();
        assert_eq!(
            config,
            Config {
                data_dir: dir.path().to_path_buf(),
                page_size: 5,
                seed: SeedMode::Examples,
                log_filter: "info".into(),
                in_memory: false,
            }
        );
    }

    #[test]
    fn test_file_values_then_cli_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "page_size = 8\nseed = \"empty\"\nlog_filter = \"taskdesk=debug\"\n",
        )
        .unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        let from_file = Config::load(&cli(&["--data-dir", dir_arg])).unwrap();
        assert_eq!(from_file.page_size, 8);
        assert_eq!(from_file.seed, SeedMode::Empty);
        assert_eq!(from_file.log_filter, "taskdesk=debug");

        let overridden =
            Config::load(&cli(&["--data-dir", dir_arg, "--page-size", "3", "--seed", "examples"]))
                .unwrap();
        assert_eq!(overridden.page_size, 3);
        assert_eq!(overridden.seed, SeedMode::Examples);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = TempDir::new().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let err = Config::load(&cli(&["--data-dir", dir_arg, "--page-size", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "page_size = \"many\"").unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let err = Config::load(&cli(&["--data-dir", dir_arg])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(&cli(&["--config", missing.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
