//! Error types shared across the task store, controller and start-up code.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    DueDate,
}

impl Field {
    /// Field name as it appears in the saved task format.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::DueDate => "dueDate",
        }
    }
}

/// Field name to message mapping. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the message for one field, e.g. once the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.name(), message)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors returned by task store operations and user intents.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("invalid task: {0}")]
    Validation(FieldErrors),
    #[error("task #{id} not found")]
    NotFound { id: u64 },
    #[error("a dialog is open; dismiss it first")]
    DialogPending,
    #[error("no delete is waiting for confirmation")]
    NothingToConfirm,
}

/// Errors raised while reading or writing the saved task slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read slot {key}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },
    #[error("could not write slot {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },
    #[error("could not encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("saved tasks are not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("saved tasks are not a list of tasks")]
    NotAnArray,
    #[error("saved tasks contain duplicate id {0}")]
    DuplicateId(u64),
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("page_size must be at least 1")]
    InvalidPageSize,
}

/// Top-level error reported by `main`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_display_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::DueDate, "Please pick a Due Date.");
        errors.insert(Field::Title, "too short");
        assert_eq!(
            errors.to_string(),
            "title: too short; dueDate: Please pick a Due Date."
        );
    }

    #[test]
    fn test_clear_removes_single_field() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Title, "a");
        errors.insert(Field::Description, "b");
        errors.clear(Field::Title);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Title), None);
        assert_eq!(errors.get(Field::Description), Some("b"));
    }
}
