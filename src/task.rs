//! Task data structure and the draft a form edits before it is saved.
//!
//! `Task` is the only persisted entity. Its JSON shape is part of the saved
//! slot format, so field names are camelCase (`dueDate`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A saved to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

/// An unsaved, possibly invalid task.
///
/// `id` is `None` for a task that has never been stored and `Some` when the
/// draft was opened from an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// A blank draft: pending, medium priority, due `today`.
    pub fn blank(today: NaiveDate) -> Self {
        TaskDraft {
            id: None,
            title: String::new(),
            description: String::new(),
            status: Status::Pending,
            priority: Priority::Medium,
            due_date: Some(today),
        }
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        TaskDraft {
            id: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: Some(task.due_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_json_uses_camel_case_due_date() {
        let task = Task {
            id: 7,
            title: "Buy milk".into(),
            description: "Two litres, semi-skimmed".into(),
            status: Status::InProgress,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "title": "Buy milk",
                "description": "Two litres, semi-skimmed",
                "status": "In Progress",
                "priority": "High",
                "dueDate": "2024-05-01",
            })
        );
    }

    #[test]
    fn test_draft_from_task_keeps_id() {
        let task = Task {
            id: 3,
            title: "Clean".into(),
            description: "Kitchen and hallway".into(),
            status: Status::Pending,
            priority: Priority::Low,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        let draft = TaskDraft::from(&task);
        assert_eq!(draft.id, Some(3));
        assert_eq!(draft.due_date, Some(task.due_date));
    }

    #[test]
    fn test_blank_draft_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let draft = TaskDraft::blank(today);
        assert_eq!(draft.id, None);
        assert_eq!(draft.status, Status::Pending);
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.due_date, Some(today));
    }
}
