//! Filter, sort and paginate the task list for display.
//!
//! Everything here is a pure function of the stored tasks and the current
//! [`ViewParams`]; the stored order is never touched.

use crate::fields::{SortDirection, SortKey};
use crate::task::Task;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Search, sort and paging state of the task list. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub search: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// 1-based.
    pub page: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        ViewParams {
            search: String::new(),
            sort_key: SortKey::DueDate,
            direction: SortDirection::Asc,
            page: 1,
        }
    }
}

impl ViewParams {
    /// Replace the search text and go back to the first page.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.page = 1;
    }

    /// Sort by `key`; choosing the current key again flips the direction.
    pub fn set_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.flipped();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

/// One page of the derived task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub items: Vec<&'a Task>,
    pub total_pages: usize,
    pub total_filtered: usize,
}

/// Case-insensitive substring match on title, description, status and
/// priority. An empty search matches everything.
pub fn matches_search(task: &Task, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        task.title.as_str(),
        task.description.as_str(),
        task.status.label(),
        task.priority.label(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Stable sort by `key`; ties keep their incoming order.
pub fn sort_tasks(tasks: &mut [&Task], key: SortKey, direction: SortDirection) {
    tasks.sort_by(|a, b| direction.apply(key.compare(a, b)));
}

/// Number of pages needed for `count` rows.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Derive the visible page from the full task list.
pub fn project<'a>(tasks: &'a [Task], params: &ViewParams, page_size: usize) -> Projection<'a> {
    let mut filtered: Vec<&Task> = tasks
        .iter()
        .filter(|t| matches_search(t, &params.search))
        .collect();
    sort_tasks(&mut filtered, params.sort_key, params.direction);

    let total_filtered = filtered.len();
    let total_pages = total_pages(total_filtered, page_size);

    let items = if params.page >= 1 && params.page <= total_pages {
        filtered
            .into_iter()
            .skip((params.page - 1) * page_size)
            .take(page_size)
            .collect()
    } else {
        Vec::new()
    };

    Projection {
        items,
        total_pages,
        total_filtered,
    }
}
