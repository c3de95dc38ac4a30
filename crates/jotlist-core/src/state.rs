use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::persist::{self, KeyValueStore};
use crate::task::{TaskRecord, is_blank};
use crate::theme::ThemeMode;

/// Contents of the new-task form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub note: String,
}

impl Draft {
    pub fn is_submittable(&self) -> bool {
        !is_blank(&self.title) && !is_blank(&self.note)
    }
}

/// The whole view-model. Update functions never mutate in place; each returns
/// the next state and leaves persistence to the caller.
///
/// Ids derive from creation time and may repeat. Toggle and delete both act
/// on the first record carrying the id, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub tasks: Vec<TaskRecord>,
    pub draft: Draft,
    pub form_open: bool,
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl AppState {
    #[tracing::instrument(skip_all)]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, config: &AppConfig) -> Self {
        let tasks = persist::load_tasks(store, &config.storage.tasks_key);
        let theme = persist::load_theme(store, &config.storage.theme_key);
        debug!(
            tasks = tasks.len(),
            theme = theme.storage_value(),
            "restored app state"
        );

        Self {
            tasks,
            draft: Draft::default(),
            form_open: config.ui.form_open_on_start,
            theme,
        }
    }

    pub fn persist_tasks<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        config: &AppConfig,
    ) -> bool {
        persist::persist_tasks(store, &config.storage.tasks_key, &self.tasks)
    }

    pub fn persist_theme<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        config: &AppConfig,
    ) -> bool {
        persist::persist_theme(store, &config.storage.theme_key, self.theme)
    }

    /// Appends a new incomplete task, then clears the draft and collapses the
    /// form. Blank title or note leaves the state as it was.
    pub fn add(&self, title: &str, note: &str, now: DateTime<Utc>) -> Self {
        if is_blank(title) || is_blank(note) {
            warn!(
                blank_title = is_blank(title),
                blank_note = is_blank(note),
                "ignoring add with blank field"
            );
            return self.clone();
        }

        let task = TaskRecord::new(title, note, now);
        debug!(id = task.id, "adding task");

        let mut tasks = self.tasks.clone();
        tasks.push(task);

        Self {
            tasks,
            draft: Draft::default(),
            form_open: false,
            theme: self.theme,
        }
    }

    pub fn submit_draft(&self, now: DateTime<Utc>) -> Self {
        self.add(&self.draft.title, &self.draft.note, now)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn toggle(&self, id: i64) -> Self {
        let mut next = self.clone();
        match self.position(id) {
            Some(idx) => {
                let task = &mut next.tasks[idx];
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "toggled task");
            }
            None => debug!(id, "toggle for unknown task"),
        }
        next
    }

    pub fn delete(&self, id: i64) -> Self {
        let mut next = self.clone();
        match self.position(id) {
            Some(idx) => {
                next.tasks.remove(idx);
                debug!(id, "deleted task");
            }
            None => debug!(id, "delete for unknown task"),
        }
        next
    }

    pub fn with_draft_title(&self, title: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.draft.title = title.into();
        next
    }

    pub fn with_draft_note(&self, note: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.draft.note = note.into();
        next
    }

    pub fn toggle_form(&self) -> Self {
        let mut next = self.clone();
        next.form_open = !next.form_open;
        next
    }

    pub fn toggle_theme(&self) -> Self {
        let mut next = self.clone();
        next.theme = next.theme.next();
        next
    }

    pub fn find(&self, id: i64) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn ordered_for_display(&self) -> Vec<&TaskRecord> {
        newest_first(&self.tasks)
    }

    pub fn summary(&self) -> TaskSummary {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskSummary {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }
}

/// Newest creation time first. Records without a timestamp go last, and equal
/// keys keep insertion order.
pub fn newest_first(tasks: &[TaskRecord]) -> Vec<&TaskRecord> {
    let mut ordered: Vec<&TaskRecord> = tasks.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered
}
