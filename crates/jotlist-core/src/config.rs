use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, error};

/// Storage keys and presentation defaults, read from the TOML asset bundled
/// with the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_tasks_key")]
    pub tasks_key: String,
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub form_open_on_start: bool,
}

pub const DEFAULT_TASKS_KEY: &str = "jotlist.tasks";
pub const DEFAULT_THEME_KEY: &str = "jotlist.theme";

fn default_tasks_key() -> String {
    DEFAULT_TASKS_KEY.to_string()
}

fn default_theme_key() -> String {
    DEFAULT_THEME_KEY.to_string()
}

fn default_title() -> String {
    "Jotlist".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tasks_key: default_tasks_key(),
            theme_key: default_theme_key(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            form_open_on_start: false,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse app config TOML")?;
        if config.storage.tasks_key == config.storage.theme_key {
            anyhow::bail!(
                "tasks_key and theme_key must differ (both are {:?})",
                config.storage.tasks_key
            );
        }
        Ok(config)
    }

    pub fn load_or_default(raw: &str) -> Self {
        match Self::from_toml_str(raw) {
            Ok(config) => {
                debug!(
                    tasks_key = %config.storage.tasks_key,
                    theme_key = %config.storage.theme_key,
                    "loaded app config"
                );
                config
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "invalid app config; using defaults");
                Self::default()
            }
        }
    }
}
