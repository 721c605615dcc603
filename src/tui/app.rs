//! Main application logic for the terminal user interface.
//!
//! `App` turns key presses into [`Session`] intents and renders the
//! session's screen, projection and dialog every frame. It keeps only
//! presentation state of its own: the form being typed, the highlighted row
//! and the status line.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::db::format_due_date;
use crate::error::TaskError;
use crate::fields::SortKey;
use crate::session::{Dialog, Screen, Session};
use crate::tui::{
    colors::{priority_color, status_color, ACCENT, DANGER, MUTED},
    enums::{FormField, InputMode},
    task_form::TaskForm,
    utils::centered_rect,
};

/// Table columns in display order; the digit keys 1..=4 sort by them.
const COLUMNS: [SortKey; 4] = [
    SortKey::Title,
    SortKey::DueDate,
    SortKey::Priority,
    SortKey::Status,
];

/// Terminal front end over a [`Session`].
pub struct App<'a> {
    session: &'a mut Session,
    form: TaskForm,
    table_state: TableState,
    input_mode: InputMode,
    status_message: String,
}

impl<'a> App<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        let mut table_state = TableState::default();
        if !session.projection().items.is_empty() {
            table_state.select(Some(0));
        }
        App {
            session,
            form: TaskForm::new(today()),
            table_state,
            input_mode: InputMode::Normal,
            status_message: String::new(),
        }
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Id of the highlighted row on the current page.
    fn selected_task_id(&self) -> Option<u64> {
        let idx = self.table_state.selected()?;
        self.session.projection().items.get(idx).map(|t| t.id)
    }

    /// Keep the highlight inside the current page.
    fn clamp_selection(&mut self) {
        let len = self.session.projection().items.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(idx) if idx >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if !event::poll(Duration::from_millis(100))? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            return Ok(self.handle_key(key.code, key.modifiers));
        }
        Ok(false)
    }

    /// Dispatch a key to the dialog, form or list handler.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status_message.clear();

        let quit = if self.session.dialog().is_some() {
            self.handle_dialog_input(key);
            false
        } else {
            match self.session.screen() {
                Screen::Home => self.handle_list_input(key),
                Screen::Create | Screen::Edit(_) => {
                    self.handle_form_input(key);
                    false
                }
            }
        };
        self.clamp_selection();
        quit
    }

    fn handle_dialog_input(&mut self, key: KeyCode) {
        let confirming = match self.session.dialog() {
            Some(Dialog::ConfirmDelete { .. }) => true,
            Some(Dialog::Notice { .. }) => false,
            None => return,
        };
        if confirming {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    match self.session.confirm_delete() {
                        Ok(Some(task)) => self.set_status_message(format!("Deleted \"{}\"", task.title)),
                        Ok(None) => {}
                        Err(e) => self.set_status_message(format!("Error: {e}")),
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.session.cancel_delete();
                }
                _ => {}
            }
        } else if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.session.dismiss_dialog();
        }
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_list_input(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Search {
            let mut search = self.session.view().search.clone();
            match key {
                KeyCode::Esc => {
                    search.clear();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Enter => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => {
                    search.pop();
                }
                KeyCode::Char(c) => search.push(c),
                _ => return false,
            }
            if search != self.session.view().search {
                self.session.set_search(&search);
                self.table_state.select(Some(0));
            }
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.session.view().search.is_empty() {
                    return true;
                }
                self.session.set_search("");
            }
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Up => {
                if let Some(selected) = self.table_state.selected() {
                    self.table_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.table_state.selected() {
                    self.table_state.select(Some(selected + 1));
                }
            }
            KeyCode::Left | KeyCode::PageUp => {
                if self.session.prev_page() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::Right | KeyCode::PageDown => {
                if self.session.next_page() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::Char('n') | KeyCode::Char('a') => {
                if self.session.request_create().is_ok() {
                    self.form = TaskForm::new(today());
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    self.open_edit(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    if let Err(e) = self.session.request_delete(id) {
                        self.set_status_message(format!("Error: {e}"));
                    }
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.session.set_sort(COLUMNS[idx]);
            }
            _ => {}
        }
        false
    }

    fn open_edit(&mut self, id: u64) {
        if self.session.request_edit(id).is_err() {
            return;
        }
        if let Some(Ok(task)) = self.session.edit_target() {
            self.form = TaskForm::from_task(task);
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        let missing = matches!(self.session.edit_target(), Some(Err(_)));
        if missing {
            // nothing to edit; any key leads back home
            let _ = self.session.cancel();
            return;
        }
        match key {
            KeyCode::Esc => {
                let _ = self.session.cancel();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let draft = self.form.to_draft(today());
        match self.session.submit_draft(&draft) {
            Ok(_) => self.form = TaskForm::new(today()),
            Err(TaskError::Validation(errors)) => self.form.set_errors(errors),
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    /// Render the task list with search box, sortable header and pager.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search
                Constraint::Min(0),    // table
                Constraint::Length(1), // pager
            ])
            .split(area);

        let search_style = if self.input_mode == InputMode::Search {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        };
        let search = &self.session.view().search;
        let search_text = if search.is_empty() && self.input_mode == InputMode::Normal {
            Span::styled("Press / to search tasks...", Style::default().fg(MUTED))
        } else {
            Span::raw(search.as_str())
        };
        let search_box = Paragraph::new(Line::from(search_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(search_style),
        );
        f.render_widget(search_box, chunks[0]);
        if self.input_mode == InputMode::Search {
            f.set_cursor_position((
                chunks[0].x + search.chars().count() as u16 + 1,
                chunks[0].y + 1,
            ));
        }

        let projection = self.session.projection();
        let list_title = format!("Your Task List ({})", self.session.list_all().len());

        if projection.items.is_empty() {
            let message = if self.session.view().search.is_empty() {
                "No tasks added yet!"
            } else {
                "Couldn't find any tasks matching your search."
            };
            let empty = Paragraph::new(vec![Line::from(""), Line::from(message)])
                .style(Style::default().fg(MUTED))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(list_title));
            f.render_widget(empty, chunks[1]);
        } else {
            let view = self.session.view();
            let header_cells = COLUMNS.iter().enumerate().map(|(i, &key)| {
                let arrow = if view.sort_key == key {
                    format!(" {}", view.direction.arrow())
                } else {
                    String::new()
                };
                Cell::from(format!("[{}] {}{}", i + 1, key.heading(), arrow))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            });
            let header = Row::new(header_cells)
                .style(Style::default().bg(ACCENT).fg(Color::White))
                .height(1);

            let rows: Vec<Row> = projection
                .items
                .iter()
                .map(|task| {
                    Row::new(vec![
                        Cell::from(task.title.clone()),
                        Cell::from(format_due_date(task.due_date)),
                        Cell::from(task.priority.label())
                            .style(Style::default().fg(priority_color(task.priority))),
                        Cell::from(task.status.label())
                            .style(Style::default().fg(status_color(task.status))),
                    ])
                })
                .collect();

            let widths = [
                Constraint::Min(25),    // Title
                Constraint::Length(16), // Due
                Constraint::Length(16), // Priority
                Constraint::Length(18), // Status
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .block(Block::default().borders(Borders::ALL).title(list_title))
                .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[1], &mut self.table_state);
        }

        if projection.total_pages > 1 {
            let pager = Paragraph::new(format!(
                "Page {} of {}  (←/→ to change page)",
                self.session.view().page,
                projection.total_pages
            ))
            .alignment(Alignment::Right);
            f.render_widget(pager, chunks[2]);
        }
    }

    /// Render the create or edit form.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let heading = if self.form.is_edit() {
            "Change Task Details"
        } else {
            "Add a Brand New Task"
        };
        let outer = Block::default().borders(Borders::ALL).title(heading);
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let constraints: Vec<Constraint> = FormField::ORDER
            .iter()
            .flat_map(|_| [Constraint::Length(3), Constraint::Length(1)])
            .chain([Constraint::Min(0)])
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in FormField::ORDER.iter().copied().enumerate() {
            let box_area = chunks[i * 2];
            let error_area = chunks[i * 2 + 1];
            let error = field.validated().and_then(|v| self.form.errors.get(v));

            let border_style = if self.form.current_field == i {
                Style::default().fg(ACCENT)
            } else if error.is_some() {
                Style::default().fg(DANGER)
            } else {
                Style::default()
            };
            let text = match field {
                FormField::Title => self.form.title.value.clone(),
                FormField::Description => self.form.description.value.clone(),
                FormField::DueDate => self.form.due.value.clone(),
                FormField::Status => format!("< {} >", self.form.selected_status()),
                FormField::Priority => format!("< {} >", self.form.selected_priority()),
            };
            let input = Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(field.label())
                    .border_style(border_style),
            );
            f.render_widget(input, box_area);

            if let Some(message) = error {
                let line = Paragraph::new(message.to_string()).style(Style::default().fg(DANGER));
                f.render_widget(line, error_area);
            }
            if self.form.current_field == i && !field.is_selector() {
                if let Some(input) = self.form.active_text() {
                    f.set_cursor_position((box_area.x + input.cursor as u16 + 1, box_area.y + 1));
                }
            }
        }

        let submit = if self.form.is_edit() { "Save Changes" } else { "Add Task" };
        let help = Paragraph::new(vec![
            Line::from(""),
            Line::from(format!("Enter: {submit}   Esc: Never Mind   Tab/↑↓: Move   ←/→: Change selection")),
        ])
        .style(Style::default().fg(MUTED))
        .wrap(Wrap { trim: true });
        f.render_widget(help, chunks[FormField::ORDER.len() * 2]);
    }

    fn render_not_found(&mut self, f: &mut Frame, area: Rect) {
        let text = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Error: Task not found!",
                Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press any key to go back."),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Change Task Details"));
        f.render_widget(text, area);
    }

    /// Render the confirmation or acknowledgment dialog on top.
    fn render_dialog(&mut self, f: &mut Frame, area: Rect, dialog: &Dialog) {
        let (border, buttons) = match dialog {
            Dialog::ConfirmDelete { .. } => (DANGER, "[y] Delete It   [n] Cancel"),
            Dialog::Notice { .. } => (ACCENT, "[Enter] Got It"),
        };
        let block = Block::default()
            .title(dialog.heading().to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(dialog.message()),
            Line::from(""),
            Line::from(Span::styled(buttons, Style::default().add_modifier(Modifier::BOLD))),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let mut text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.session.screen() {
                Screen::Home if self.input_mode == InputMode::Search => {
                    "Searching (Enter to keep, Esc to clear)".to_string()
                }
                Screen::Home => {
                    "n: New  e: Edit  d: Delete  /: Search  1-4: Sort  q: Quit".to_string()
                }
                Screen::Create => "Add New Task".to_string(),
                Screen::Edit(id) => format!("Edit Task #{id}"),
            }
        };
        if self.session.store().has_unsaved_changes() {
            text.push_str("  [unsaved: changes could not be written]");
        }
        let status = Paragraph::new(text)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        let title = Paragraph::new(Span::styled(
            "Task Management",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        match self.session.screen() {
            Screen::Home => self.render_task_list(f, chunks[1]),
            Screen::Create => self.render_task_form(f, chunks[1]),
            Screen::Edit(_) => {
                if matches!(self.session.edit_target(), Some(Ok(_))) {
                    self.render_task_form(f, chunks[1]);
                } else {
                    self.render_not_found(f, chunks[1]);
                }
            }
        }

        if let Some(dialog) = self.session.dialog().cloned() {
            self.render_dialog(f, chunks[1], &dialog);
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
