use std::collections::BTreeMap;

use anyhow::{Context, anyhow};
use tracing::{debug, error};

use crate::task::TaskRecord;
use crate::theme::ThemeMode;

/// String-keyed storage the application state is mirrored into.
///
/// The browser frontend implements this over `localStorage`; tests use
/// [`MemoryStore`].
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, the way a full or disabled
    /// `localStorage` behaves.
    pub fn read_only() -> Self {
        Self {
            entries: BTreeMap::new(),
            fail_writes: true,
        }
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow!("store rejected write to {key}"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn encode_tasks(tasks: &[TaskRecord]) -> anyhow::Result<String> {
    serde_json::to_string(tasks).context("failed to serialize task collection")
}

pub fn decode_tasks(raw: &str) -> anyhow::Result<Vec<TaskRecord>> {
    serde_json::from_str(raw).context("failed to parse persisted task collection")
}

/// Reads the persisted snapshot. A missing key, an unreadable store and a
/// corrupt snapshot all yield an empty collection.
#[tracing::instrument(skip(store))]
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<TaskRecord> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no persisted tasks; starting empty");
            return Vec::new();
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed reading tasks from store");
            return Vec::new();
        }
    };

    match decode_tasks(&raw) {
        Ok(tasks) => {
            debug!(count = tasks.len(), "loaded persisted tasks");
            tasks
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "discarding unreadable task snapshot");
            Vec::new()
        }
    }
}

/// Writes the full collection under `key`. Returns whether the write landed;
/// failures are logged here and go no further.
#[tracing::instrument(skip(store, tasks), fields(count = tasks.len()))]
pub fn persist_tasks<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    tasks: &[TaskRecord],
) -> bool {
    let result = encode_tasks(tasks).and_then(|json| {
        store
            .set_item(key, &json)
            .with_context(|| format!("failed to write {key}"))
    });

    match result {
        Ok(()) => {
            debug!("persisted tasks");
            true
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed persisting tasks");
            false
        }
    }
}

#[tracing::instrument(skip(store))]
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> ThemeMode {
    match store.get_item(key) {
        Ok(stored) => ThemeMode::from_storage(stored.as_deref()),
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed reading theme from store");
            ThemeMode::default()
        }
    }
}

#[tracing::instrument(skip(store))]
pub fn persist_theme<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    theme: ThemeMode,
) -> bool {
    match store.set_item(key, theme.storage_value()) {
        Ok(()) => {
            debug!(theme = theme.storage_value(), "persisted theme");
            true
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed persisting theme");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow!("storage disabled"))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow!("storage disabled"))
        }
    }

    fn record(id: i64) -> TaskRecord {
        TaskRecord {
            id,
            title: format!("title {id}"),
            note: format!("note {id}"),
            completed: id % 2 == 0,
            created_at: None,
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_tasks(&store, "tasks").is_empty());
    }

    #[test]
    fn corrupt_snapshot_loads_empty() {
        let store = MemoryStore::new().with_item("tasks", "{not json");
        assert!(load_tasks(&store, "tasks").is_empty());

        let wrong_shape = MemoryStore::new().with_item("tasks", r#"{"id":1}"#);
        assert!(load_tasks(&wrong_shape, "tasks").is_empty());
    }

    #[test]
    fn unreadable_store_loads_defaults() {
        assert!(load_tasks(&BrokenStore, "tasks").is_empty());
        assert_eq!(load_theme(&BrokenStore, "theme"), ThemeMode::Light);
    }

    #[test]
    fn persist_writes_json_array_under_key() {
        let mut store = MemoryStore::new();
        let tasks = vec![record(1), record(2)];

        assert!(persist_tasks(&mut store, "tasks", &tasks));

        let raw = store.raw("tasks").expect("tasks written");
        assert!(raw.starts_with('['));
        assert_eq!(decode_tasks(raw).expect("decode"), tasks);
    }

    #[test]
    fn failed_write_reports_false_and_keeps_previous_snapshot() {
        let mut store = MemoryStore::new();
        assert!(persist_tasks(&mut store, "tasks", &[record(1)]));

        store.set_fail_writes(true);
        assert!(!persist_tasks(&mut store, "tasks", &[record(1), record(2)]));
        assert!(!persist_theme(&mut store, "theme", ThemeMode::Dark));

        assert_eq!(load_tasks(&store, "tasks"), vec![record(1)]);
        assert_eq!(load_theme(&store, "theme"), ThemeMode::Light);
    }

    #[test]
    fn theme_is_stored_as_literal_string() {
        let mut store = MemoryStore::new();
        assert!(persist_theme(&mut store, "theme", ThemeMode::Dark));
        assert_eq!(store.raw("theme"), Some("dark"));
        assert_eq!(load_theme(&store, "theme"), ThemeMode::Dark);

        assert!(persist_theme(&mut store, "theme", ThemeMode::Light));
        assert_eq!(store.raw("theme"), Some("light"));
    }

    #[test]
    fn boxed_store_works_through_trait_object() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        assert!(persist_tasks(&mut *store, "tasks", &[record(3)]));
        assert_eq!(load_tasks(&*store, "tasks"), vec![record(3)]);
    }
}
