//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

pub const ACCENT: Color = Color::Rgb(37, 99, 235);
pub const DANGER: Color = Color::Rgb(220, 38, 38);
pub const MUTED: Color = Color::Rgb(107, 114, 128);

/// High red, Medium yellow, Low green.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Rgb(220, 38, 38),
        Priority::Medium => Color::Rgb(202, 138, 4),
        Priority::Low => Color::Rgb(22, 163, 74),
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Complete => Color::Rgb(5, 150, 105),
        Status::InProgress => Color::Rgb(37, 99, 235),
        Status::Pending => MUTED,
    }
}
