//! Task form handling for the terminal user interface.
//!
//! `TaskForm` holds the text the user is typing, turns it into a
//! [`TaskDraft`] on submit, and keeps the per-field error messages shown
//! under each input.

use chrono::NaiveDate;

use crate::db::parse_due_input;
use crate::error::{Field, FieldErrors};
use crate::fields::{Priority, Status};
use crate::task::{Task, TaskDraft};
use crate::tui::enums::FormField;
use crate::tui::input::InputField;

pub const DUE_DATE_UNREADABLE: &str =
    "Use YYYY-MM-DD, today, tomorrow, a weekday or \"in 3d\".";

/// Task form for editing fields.
pub struct TaskForm {
    pub id: Option<u64>,
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub status: usize,
    pub priority: usize,
    pub current_field: usize,
    pub errors: FieldErrors,
}

impl TaskForm {
    /// A blank form: Pending, Medium, due today.
    pub fn new(today: NaiveDate) -> Self {
        Self::from_draft(&TaskDraft::blank(today))
    }

    /// A form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self::from_draft(&TaskDraft::from(task))
    }

    fn from_draft(draft: &TaskDraft) -> Self {
        TaskForm {
            id: draft.id,
            title: InputField::with_value(&draft.title),
            description: InputField::with_value(&draft.description),
            due: InputField::with_value(
                &draft.due_date.map(|d| d.to_string()).unwrap_or_default(),
            ),
            status: Status::ALL.iter().position(|&s| s == draft.status).unwrap_or(0),
            priority: Priority::ALL.iter().position(|&p| p == draft.priority).unwrap_or(1),
            current_field: 0,
            errors: FieldErrors::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn field(&self) -> FormField {
        FormField::ORDER[self.current_field]
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL[self.status]
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL[self.priority]
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FormField::ORDER.len();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FormField::ORDER.len() - 1
        } else {
            self.current_field - 1
        };
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.field() {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due),
            FormField::Status | FormField::Priority => None,
        }
    }

    /// The active text input, for cursor placement.
    pub fn active_text(&self) -> Option<&InputField> {
        match self.field() {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::DueDate => Some(&self.due),
            FormField::Status | FormField::Priority => None,
        }
    }

    /// Editing a field clears its error message.
    fn touched(&mut self) {
        if let Some(field) = self.field().validated() {
            self.errors.clear(field);
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(input) = self.active_input() {
            input.handle_char(c);
            self.touched();
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_backspace();
            self.touched();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_delete();
            self.touched();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.field() {
            FormField::Status => self.status = cycle(self.status, Status::ALL.len(), right),
            FormField::Priority => self.priority = cycle(self.priority, Priority::ALL.len(), right),
            _ => {
                if let Some(input) = self.active_input() {
                    if right {
                        input.move_cursor_right();
                    } else {
                        input.move_cursor_left();
                    }
                }
            }
        }
    }

    /// The draft the form currently describes. Due text that cannot be read
    /// as a date leaves `due_date` empty.
    pub fn to_draft(&self, today: NaiveDate) -> TaskDraft {
        let due_text = self.due.value.trim();
        TaskDraft {
            id: self.id,
            title: self.title.value.clone(),
            description: self.description.value.clone(),
            status: self.selected_status(),
            priority: self.selected_priority(),
            due_date: if due_text.is_empty() {
                None
            } else {
                parse_due_input(due_text, today)
            },
        }
    }

    /// Show validation errors, replacing the generic due-date message when
    /// text was typed but could not be parsed.
    pub fn set_errors(&mut self, mut errors: FieldErrors) {
        if errors.get(Field::DueDate).is_some() && !self.due.value.trim().is_empty() {
            errors.insert(Field::DueDate, DUE_DATE_UNREADABLE);
        }
        self.errors = errors;
    }
}

fn cycle(idx: usize, len: usize, forward: bool) -> usize {
    if forward {
        (idx + 1) % len
    } else if idx == 0 {
        len - 1
    } else {
        idx - 1
    }
}
