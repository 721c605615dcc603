//! Example tasks loaded when there is no usable saved task list.

use chrono::NaiveDate;

use crate::fields::*;
use crate::task::Task;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Tasks for `mode`, with ids 1..=n in insertion order.
pub fn seed_tasks(mode: SeedMode) -> Vec<Task> {
    match mode {
        SeedMode::Empty => Vec::new(),
        SeedMode::Examples => example_tasks(),
    }
}

fn example_tasks() -> Vec<Task> {
    let rows = [
        (
            "Plan weekly groceries",
            "Write the shopping list and check what is left in the fridge.",
            Status::Pending,
            Priority::Medium,
            date(2025, 1, 6),
        ),
        (
            "Finish quarterly report",
            "Collect the numbers from finance and draft the summary section.",
            Status::InProgress,
            Priority::High,
            date(2025, 1, 3),
        ),
        (
            "Book dentist appointment",
            "Call the clinic and ask for an early morning slot next month.",
            Status::Pending,
            Priority::Low,
            date(2025, 1, 20),
        ),
        (
            "Renew car insurance",
            "Compare at least three quotes before the current policy lapses.",
            Status::Complete,
            Priority::High,
            date(2024, 12, 28),
        ),
        (
            "Clean out the garage",
            "Sort boxes into keep, donate and recycle piles over the weekend.",
            Status::Pending,
            Priority::Low,
            date(2025, 2, 1),
        ),
        (
            "Update project README",
            "Document the new configuration options and the install steps.",
            Status::InProgress,
            Priority::Medium,
            date(2025, 1, 10),
        ),
    ];

    rows.into_iter()
        .zip(1u64..)
        .map(|((title, description, status, priority, due_date), id)| Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status,
            priority,
            due_date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use crate::task::TaskDraft;

    #[test]
    fn test_empty_mode_has_no_tasks() {
        assert!(seed_tasks(SeedMode::Empty).is_empty());
    }

    #[test]
    fn test_examples_are_valid_with_sequential_ids() {
        let tasks = seed_tasks(SeedMode::Examples);
        assert!(!tasks.is_empty());
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.id, i as u64 + 1);
            assert!(validate(&TaskDraft::from(task)).is_empty(), "{}", task.title);
        }
    }
}
