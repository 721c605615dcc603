//! Enumerations and field types for task management.
//!
//! This module defines the structured values a task carries (status and
//! priority), the keys the task list can be sorted by, and the seed mode
//! used when no saved task list exists.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Task completion status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    #[serde(alias = "pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "InProgress", alias = "in-progress")]
    InProgress,
    #[serde(alias = "complete")]
    Complete,
}

impl Status {
    /// Every status in form selector order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Complete];

    /// Label shown in the UI, matched by search and compared when sorting.
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Complete => "Complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Priority {
    /// Every priority in form selector order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Label shown in the UI, matched by search and compared when sorting.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Columns the task list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

impl SortKey {
    /// Compare two tasks on this key, ascending.
    ///
    /// Text fields and enum labels compare lexicographically, due dates
    /// chronologically.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::Status => a.status.label().cmp(b.status.label()),
            SortKey::Priority => a.priority.label().cmp(b.priority.label()),
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
        }
    }

    /// Column heading for this key.
    pub fn heading(self) -> &'static str {
        match self {
            SortKey::Title => "Task Name",
            SortKey::Description => "Description",
            SortKey::Status => "Status",
            SortKey::Priority => "Priority",
            SortKey::DueDate => "Due Date",
        }
    }
}

/// Direction applied on top of a [`SortKey`] comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active column heading.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Dataset loaded when there is no usable saved task list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SeedMode {
    /// A handful of example tasks.
    #[default]
    Examples,
    /// Start with no tasks at all.
    Empty,
}
