use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::presentation::{FilterMode, ViewMode};
use crate::storage::defaults::{SharedDefaults, StorageError};
use crate::storage::file::FileDefaults;
use crate::storage::shared_store::APP_GROUP;
use crate::storage::sqlite::SqliteDefaults;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub app_group_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub default_view: ViewMode,
    pub default_filter: FilterMode,
    pub theme: String,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("countday")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn open_defaults(&self) -> Result<Arc<dyn SharedDefaults>, StorageError> {
        let dir = &self.storage.app_group_dir;
        match self.storage.backend {
            StorageBackend::Sqlite => Ok(Arc::new(SqliteDefaults::open(&dir.join("defaults.sqlite"))?)),
            StorageBackend::File => Ok(Arc::new(FileDefaults::new(dir.clone()))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let app_group_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("countday")
            .join(APP_GROUP);

        Self {
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                app_group_dir,
            },
            ui: UiConfig {
                default_view: ViewMode::Cards,
                default_filter: FilterMode::All,
                theme: "default".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_uses_sqlite_backend() {
        let config = Config::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn default_app_group_dir_ends_with_namespace() {
        let config = Config::default();
        assert!(config.storage.app_group_dir.ends_with(APP_GROUP));
    }

    #[test]
    fn default_config_shows_cards_of_all_events() {
        let config = Config::default();
        assert_eq!(config.ui.default_view, ViewMode::Cards);
        assert_eq!(config.ui.default_filter, FilterMode::All);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [storage]
            backend = "file"
            app_group_dir = "/tmp/group.com.windsurf.countday"

            [ui]
            default_view = "grid"
            default_filter = "upcoming"
            theme = "nord"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.app_group_dir, PathBuf::from("/tmp/group.com.windsurf.countday"));
        assert_eq!(config.ui.default_view, ViewMode::Grid);
        assert_eq!(config.ui.default_filter, FilterMode::Upcoming);
        assert_eq!(config.ui.theme, "nord");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn serialized_default_parses_back() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&content).unwrap(), config);
    }

    #[tokio::test]
    async fn file_backend_writes_into_app_group_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.backend = StorageBackend::File;
        config.storage.app_group_dir = temp_dir.path().to_path_buf();

        let defaults = config.open_defaults().unwrap();
        defaults.set_data("savedEvents", b"[]").await.unwrap();

        assert!(temp_dir.path().join("savedEvents.json").exists());
    }
}
