//! Enumerations for TUI state management.

use crate::error::Field;

/// Fields of the task form in tab order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

impl FormField {
    pub const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::DueDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Task Title",
            FormField::Description => "Description",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::DueDate => "Due Date",
        }
    }

    /// The validated field this input feeds, if any.
    pub fn validated(self) -> Option<Field> {
        match self {
            FormField::Title => Some(Field::Title),
            FormField::Description => Some(Field::Description),
            FormField::DueDate => Some(Field::DueDate),
            FormField::Status | FormField::Priority => None,
        }
    }

    /// Selectors cycle with left/right instead of taking text.
    pub fn is_selector(self) -> bool {
        matches!(self, FormField::Status | FormField::Priority)
    }
}

/// Input mode for the task list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Search,
}
