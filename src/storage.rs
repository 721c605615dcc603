//! Key-value slots the task store persists into.
//!
//! `FileStorage` keeps one JSON file per key inside the data directory.
//! `MemoryStorage` keeps values in a map for throwaway sessions and tests.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::StorageError;

/// A durable string slot addressed by key.
pub trait Storage {
    /// Read the value under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Human-readable location of `key`, used in log lines.
    fn describe(&self, key: &str) -> String;
}

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let to_error = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        // write a sibling temp file, then rename over the slot
        let mut f = File::create(&tmp).map_err(to_error)?;
        f.write_all(value.as_bytes()).map_err(to_error)?;
        f.flush().map_err(to_error)?;
        fs::rename(&tmp, &path).map_err(to_error)?;
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        self.path_for(key).display().to_string()
    }
}

/// In-process storage. Nothing outlives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with `value` already present under `key`.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        MemoryStorage { slots }
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        format!("memory:{key}")
    }
}
