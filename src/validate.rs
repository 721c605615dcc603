//! Field validation for task drafts.
//!
//! Rules only look at the shape of each field: there are no cross-field or
//! uniqueness checks.

use crate::error::{Field, FieldErrors};
use crate::task::{Task, TaskDraft};

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;

pub const TITLE_TOO_SHORT: &str = "Title must be at least 3 letters long.";
pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 10 letters long.";
pub const DUE_DATE_MISSING: &str = "Please pick a Due Date.";

/// Check a draft and return one message per failing field.
pub fn validate(draft: &TaskDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.title.chars().count() < MIN_TITLE_LEN {
        errors.insert(Field::Title, TITLE_TOO_SHORT);
    }
    if draft.description.chars().count() < MIN_DESCRIPTION_LEN {
        errors.insert(Field::Description, DESCRIPTION_TOO_SHORT);
    }
    if draft.due_date.is_none() {
        errors.insert(Field::DueDate, DUE_DATE_MISSING);
    }
    errors
}

/// Validate a draft and turn it into a task carrying `id`.
pub fn accept(draft: &TaskDraft, id: u64) -> Result<Task, FieldErrors> {
    let errors = validate(draft);
    match draft.due_date {
        Some(due_date) if errors.is_empty() => Ok(Task {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            due_date,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(title: &str, description: &str, due: bool) -> TaskDraft {
        let mut d = TaskDraft::blank(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        d.title = title.into();
        d.description = description.into();
        if !due {
            d.due_date = None;
        }
        d
    }

    #[test]
    fn test_title_length_boundary() {
        let short = validate(&draft("ab", "long enough text", true));
        assert_eq!(short.get(Field::Title), Some(TITLE_TOO_SHORT));

        let ok = validate(&draft("abc", "long enough text", true));
        assert!(ok.is_empty());
    }

    #[test]
    fn test_description_length_boundary() {
        assert!(validate(&draft("abc", "123456789", true)).get(Field::Description).is_some());
        assert!(validate(&draft("abc", "1234567890", true)).is_empty());
    }

    #[test]
    fn test_missing_due_date_rejected() {
        let errors = validate(&draft("abc", "1234567890", false));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::DueDate), Some(DUE_DATE_MISSING));
    }

    #[test]
    fn test_all_failures_reported_together() {
        let errors = validate(&draft("", "", false));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // three characters, six bytes
        assert!(validate(&draft("äöü", "1234567890", true)).is_empty());
    }

    #[test]
    fn test_accept_builds_task_with_id() {
        let task = accept(&draft("Buy milk", "From the corner shop", true), 9).unwrap();
        assert_eq!(task.id, 9);
        assert_eq!(task.title, "Buy milk");

        let rejected = accept(&draft("ab", "From the corner shop", true), 9).unwrap_err();
        assert_eq!(rejected.len(), 1);
    }
}
