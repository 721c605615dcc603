//! Screen navigation and modal dialogs on top of the task store.
//!
//! `Session` is the single owner of the store and the view parameters. The
//! UI turns key presses into the intent methods below and renders whatever
//! state they leave behind.

use crate::db::TaskStore;
use crate::error::TaskError;
use crate::fields::SortKey;
use crate::task::{Task, TaskDraft};
use crate::validate;
use crate::view::{self, Projection, ViewParams};

/// Which screen is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Create,
    Edit(u64),
}

/// A modal dialog shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Waiting for the user to confirm deleting `id`.
    ConfirmDelete { id: u64, title: String },
    /// Acknowledgment after a successful save.
    Notice { title: String, message: String },
}

impl Dialog {
    pub fn heading(&self) -> &str {
        match self {
            Dialog::ConfirmDelete { .. } => "Are you sure?",
            Dialog::Notice { title, .. } => title,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Dialog::ConfirmDelete { title, .. } => {
                format!("This will delete the task: \"{title}\". You cannot undo this!")
            }
            Dialog::Notice { message, .. } => message.clone(),
        }
    }
}

/// Task list state machine: store, view parameters, screen and dialog.
pub struct Session {
    store: TaskStore,
    view: ViewParams,
    page_size: usize,
    screen: Screen,
    dialog: Option<Dialog>,
}

impl Session {
    pub fn new(store: TaskStore, page_size: usize) -> Self {
        Session {
            store,
            view: ViewParams::default(),
            page_size,
            screen: Screen::Home,
            dialog: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn list_all(&self) -> &[Task] {
        self.store.list_all()
    }

    pub fn view(&self) -> &ViewParams {
        &self.view
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// The current page of the task list.
    pub fn projection(&self) -> Projection<'_> {
        view::project(self.store.list_all(), &self.view, self.page_size)
    }

    /// The task behind the `Edit` screen. `None` on other screens; an
    /// `Edit` whose task has gone away yields `NotFound`.
    pub fn edit_target(&self) -> Option<Result<&Task, TaskError>> {
        match self.screen {
            Screen::Edit(id) => Some(self.store.get(id).ok_or(TaskError::NotFound { id })),
            _ => None,
        }
    }

    fn ensure_no_dialog(&self) -> Result<(), TaskError> {
        if self.dialog.is_some() {
            return Err(TaskError::DialogPending);
        }
        Ok(())
    }

    pub fn request_create(&mut self) -> Result<(), TaskError> {
        self.ensure_no_dialog()?;
        tracing::debug!("open create screen");
        self.screen = Screen::Create;
        Ok(())
    }

    pub fn request_edit(&mut self, id: u64) -> Result<(), TaskError> {
        self.ensure_no_dialog()?;
        tracing::debug!(id, "open edit screen");
        self.screen = Screen::Edit(id);
        Ok(())
    }

    /// Leave the create or edit screen without saving.
    pub fn cancel(&mut self) -> Result<(), TaskError> {
        self.ensure_no_dialog()?;
        self.go_home();
        Ok(())
    }

    fn go_home(&mut self) {
        self.screen = Screen::Home;
    }

    /// Validate and save a draft: new tasks are created, drafts with an id
    /// replace the stored task. Success opens an acknowledgment dialog.
    pub fn submit_draft(&mut self, draft: &TaskDraft) -> Result<Task, TaskError> {
        self.ensure_no_dialog()?;
        let saved = match draft.id {
            None => {
                let task = self.store.create(draft)?;
                self.dialog = Some(Dialog::Notice {
                    title: "Success!".to_string(),
                    message: format!("Task \"{}\" was added!", task.title),
                });
                task
            }
            Some(id) => {
                let task = validate::accept(draft, id).map_err(TaskError::Validation)?;
                self.store.update(task.clone())?;
                // an edit can move the task out of the active search
                self.clamp_page();
                self.dialog = Some(Dialog::Notice {
                    title: "Task Updated!".to_string(),
                    message: format!("Task \"{}\" changes saved.", task.title),
                });
                task
            }
        };
        Ok(saved)
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: u64) -> Result<(), TaskError> {
        self.ensure_no_dialog()?;
        let task = self.store.get(id).ok_or(TaskError::NotFound { id })?;
        tracing::debug!(id, "confirm delete");
        self.dialog = Some(Dialog::ConfirmDelete {
            id,
            title: task.title.clone(),
        });
        Ok(())
    }

    /// Delete the task named by the open confirmation dialog.
    pub fn confirm_delete(&mut self) -> Result<Option<Task>, TaskError> {
        let id = match self.dialog {
            Some(Dialog::ConfirmDelete { id, .. }) => id,
            _ => return Err(TaskError::NothingToConfirm),
        };
        self.dialog = None;
        let removed = self.store.delete(id);
        self.clamp_page();
        Ok(removed)
    }

    /// Close a pending delete confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        if matches!(self.dialog, Some(Dialog::ConfirmDelete { .. })) {
            tracing::debug!("delete cancelled");
            self.dialog = None;
        }
    }

    /// Close whatever dialog is open. Dismissing a save acknowledgment
    /// returns to the home screen.
    pub fn dismiss_dialog(&mut self) {
        match self.dialog.take() {
            Some(Dialog::Notice { .. }) => self.go_home(),
            Some(Dialog::ConfirmDelete { .. }) => tracing::debug!("delete cancelled"),
            None => {}
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.view.set_search(text);
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.view.set_sort(key);
    }

    /// Jump to page `n`. Pages outside `1..=total_pages` are ignored.
    pub fn set_page(&mut self, n: usize) -> bool {
        let total = self.projection().total_pages;
        if n >= 1 && n <= total {
            self.view.page = n;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.view.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.view.page > 1 && self.set_page(self.view.page - 1)
    }

    /// Pull the current page back into range after the list shrank.
    fn clamp_page(&mut self) {
        let total = self.projection().total_pages.max(1);
        if self.view.page > total {
            self.view.page = total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use crate::fields::{SeedMode, SortDirection, Status};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(TaskStore::open(Box::new(MemoryStorage::new()), SeedMode::Empty), 5)
    }

    fn draft(title: &str) -> TaskDraft {
        let mut d = TaskDraft::blank(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        d.title = title.into();
        d.description = "a long enough description".into();
        d
    }

    fn add(session: &mut Session, title: &str) -> Task {
        session.request_create().unwrap();
        let task = session.submit_draft(&draft(title)).unwrap();
        session.dismiss_dialog();
        task
    }

    #[test]
    fn test_starts_home_without_dialog() {
        let s = session();
        assert_eq!(s.screen(), Screen::Home);
        assert!(s.dialog().is_none());
    }

    #[test]
    fn test_create_flow_acknowledges_then_returns_home() {
        let mut s = session();
        s.request_create().unwrap();
        assert_eq!(s.screen(), Screen::Create);

        let task = s.submit_draft(&draft("Buy milk")).unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(s.screen(), Screen::Create);
        assert_eq!(
            s.dialog(),
            Some(&Dialog::Notice {
                title: "Success!".into(),
                message: "Task \"Buy milk\" was added!".into(),
            })
        );

        s.dismiss_dialog();
        assert_eq!(s.screen(), Screen::Home);
        assert_eq!(s.list_all().len(), 1);
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut s = session();
        s.request_create().unwrap();
        let err = s.submit_draft(&draft("ab")).unwrap_err();
        match err {
            TaskError::Validation(errors) => assert!(errors.get(Field::Title).is_some()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(s.screen(), Screen::Create);
        assert!(s.dialog().is_none());
        assert!(s.list_all().is_empty());
    }

    #[test]
    fn test_edit_flow_updates_in_place() {
        let mut s = session();
        let task = add(&mut s, "Original");
        s.request_edit(task.id).unwrap();

        let mut edited = TaskDraft::from(s.edit_target().unwrap().unwrap());
        edited.title = "Renamed".into();
        edited.status = Status::Complete;
        s.submit_draft(&edited).unwrap();
        assert_eq!(s.dialog().map(Dialog::heading), Some("Task Updated!"));
        s.dismiss_dialog();

        assert_eq!(s.screen(), Screen::Home);
        assert_eq!(s.list_all()[0].title, "Renamed");
        assert_eq!(s.list_all()[0].id, task.id);
    }

    #[test]
    fn test_invalid_edit_leaves_task_unchanged() {
        let mut s = session();
        let task = add(&mut s, "Original");
        s.request_edit(task.id).unwrap();

        let mut edited = TaskDraft::from(&task);
        edited.title = "ab".into();
        match s.submit_draft(&edited).unwrap_err() {
            TaskError::Validation(errors) => assert!(errors.get(Field::Title).is_some()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(s.screen(), Screen::Edit(task.id));
        assert!(s.dialog().is_none());
        assert_eq!(s.list_all(), &[task]);
    }

    #[test]
    fn test_edit_out_of_search_clamps_page() {
        let mut s = session();
        let mut last = None;
        for i in 0..6 {
            last = Some(add(&mut s, &format!("alpha {i}")));
        }
        s.set_search("alpha");
        assert!(s.set_page(2));

        let last = last.unwrap();
        s.request_edit(last.id).unwrap();
        let mut edited = TaskDraft::from(&last);
        edited.title = "beta".into();
        s.submit_draft(&edited).unwrap();
        s.dismiss_dialog();

        let p = s.projection();
        assert_eq!(s.view().page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_filtered, 5);
        assert_eq!(p.items.len(), 5);
    }

    #[test]
    fn test_edit_of_missing_task_reports_not_found() {
        let mut s = session();
        s.request_edit(77).unwrap();
        assert_eq!(s.screen(), Screen::Edit(77));
        assert!(matches!(s.edit_target(), Some(Err(TaskError::NotFound { id: 77 }))));
    }

    #[test]
    fn test_edit_target_deleted_after_opening() {
        let mut s = session();
        let task = add(&mut s, "Short lived");
        s.request_edit(task.id).unwrap();

        let mut stale = TaskDraft::from(s.edit_target().unwrap().unwrap());
        s.store.delete(task.id);
        stale.title = "Too late".into();

        assert!(matches!(s.edit_target(), Some(Err(TaskError::NotFound { .. }))));
        assert!(matches!(s.submit_draft(&stale), Err(TaskError::NotFound { .. })));
        assert!(s.dialog().is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut s = session();
        let task = add(&mut s, "Doomed task");

        s.request_delete(task.id).unwrap();
        assert_eq!(
            s.dialog().map(Dialog::message),
            Some("This will delete the task: \"Doomed task\". You cannot undo this!".to_string())
        );
        assert_eq!(s.list_all().len(), 1);

        let removed = s.confirm_delete().unwrap();
        assert_eq!(removed.map(|t| t.id), Some(task.id));
        assert!(s.list_all().is_empty());
        assert!(s.dialog().is_none());
    }

    #[test]
    fn test_cancel_delete_keeps_task() {
        let mut s = session();
        let task = add(&mut s, "Survivor");
        s.request_delete(task.id).unwrap();
        s.cancel_delete();
        assert!(s.dialog().is_none());
        assert_eq!(s.list_all().len(), 1);
        assert!(matches!(s.confirm_delete(), Err(TaskError::NothingToConfirm)));
    }

    #[test]
    fn test_open_dialog_blocks_conflicting_intents() {
        let mut s = session();
        let a = add(&mut s, "First one");
        let b = add(&mut s, "Second one");

        s.request_delete(a.id).unwrap();
        assert!(matches!(s.request_delete(b.id), Err(TaskError::DialogPending)));
        assert!(matches!(s.request_create(), Err(TaskError::DialogPending)));
        assert!(matches!(s.request_edit(b.id), Err(TaskError::DialogPending)));
        assert!(matches!(s.submit_draft(&draft("Sneaky")), Err(TaskError::DialogPending)));

        s.confirm_delete().unwrap();
        let ids: Vec<u64> = s.list_all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[test]
    fn test_dismiss_cancels_pending_delete() {
        let mut s = session();
        let task = add(&mut s, "Keep this");
        s.request_delete(task.id).unwrap();
        s.dismiss_dialog();
        assert!(s.dialog().is_none());
        assert_eq!(s.list_all().len(), 1);
    }

    #[test]
    fn test_request_delete_of_missing_task() {
        let mut s = session();
        assert!(matches!(s.request_delete(5), Err(TaskError::NotFound { id: 5 })));
        assert!(s.dialog().is_none());
    }

    #[test]
    fn test_paging_ignores_out_of_range() {
        let mut s = session();
        for i in 0..12 {
            add(&mut s, &format!("Task number {i}"));
        }
        assert_eq!(s.projection().total_pages, 3);
        assert!(s.set_page(3));
        assert_eq!(s.projection().items.len(), 2);
        assert!(!s.set_page(4));
        assert!(!s.next_page());
        assert_eq!(s.view().page, 3);
        assert!(s.prev_page());
        assert_eq!(s.view().page, 2);
        assert!(!s.set_page(0));
    }

    #[test]
    fn test_search_resets_page_and_sort_toggles() {
        let mut s = session();
        for i in 0..7 {
            add(&mut s, &format!("Task number {i}"));
        }
        s.set_page(2);
        s.set_search("number 6");
        assert_eq!(s.view().page, 1);
        assert_eq!(s.projection().total_filtered, 1);

        s.set_sort(SortKey::DueDate);
        assert_eq!(s.view().direction, SortDirection::Desc);
    }

    #[test]
    fn test_delete_on_last_page_clamps_page() {
        let mut s = session();
        let mut last = None;
        for i in 0..6 {
            last = Some(add(&mut s, &format!("Task number {i}")));
        }
        assert!(s.set_page(2));
        s.request_delete(last.unwrap().id).unwrap();
        s.confirm_delete().unwrap();
        assert_eq!(s.view().page, 1);
        assert_eq!(s.projection().items.len(), 5);
    }
}
