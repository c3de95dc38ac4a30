pub mod config;
pub mod persist;
pub mod state;
pub mod task;
pub mod theme;

pub use config::AppConfig;
pub use persist::{KeyValueStore, MemoryStore};
pub use state::{AppState, Draft, TaskSummary};
pub use task::TaskRecord;
pub use theme::ThemeMode;
