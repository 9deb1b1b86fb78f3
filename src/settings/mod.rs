pub mod passcode;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{SharedDefaults, StorageError};

pub use passcode::{PasscodeError, MIN_PASSCODE_LENGTH};

pub const SETTINGS_KEY: &str = "appSettings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark];

    pub fn title(&self) -> &'static str {
        match self {
            ThemeMode::System => "System",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.title().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "tr")]
    Turkish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Turkish => "tr",
        }
    }

    /// Accepts `tr`, `tr_TR.UTF-8` and similar locale strings.
    pub fn from_code(code: &str) -> Option<Self> {
        let prefix: String = code
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .flat_map(|c| c.to_lowercase())
            .collect();
        match prefix.as_str() {
            "en" => Some(Language::English),
            "tr" => Some(Language::Turkish),
            _ => None,
        }
    }

    pub fn system() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::from_code(&value))
            .unwrap_or(Language::English)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::system()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub language: Language,
    pub use_biometric_auth: bool,
    pub use_passcode_auth: bool,
    pub passcode: Option<String>,
    pub notifications_enabled: bool,
    pub theme: ThemeMode,
    pub is_premium: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            use_biometric_auth: false,
            use_passcode_auth: false,
            passcode: None,
            notifications_enabled: true,
            theme: ThemeMode::System,
            is_premium: false,
        }
    }
}

impl AppSettings {
    pub fn requires_authentication(&self) -> bool {
        self.use_biometric_auth || self.use_passcode_auth
    }

    /// Restores appearance defaults. Authentication and purchases are kept.
    pub fn reset_appearance(&mut self) {
        self.theme = ThemeMode::System;
    }
}

pub struct SettingsStore {
    defaults: Arc<dyn SharedDefaults>,
}

impl SettingsStore {
    pub fn new(defaults: Arc<dyn SharedDefaults>) -> Self {
        Self { defaults }
    }

    pub async fn load(&self) -> AppSettings {
        match self.defaults.data(SETTINGS_KEY).await {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Stored settings could not be decoded, using defaults: {}", e);
                AppSettings::default()
            }),
            Ok(None) => AppSettings::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings: {}", e);
                AppSettings::default()
            }
        }
    }

    pub async fn save(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(settings)?;
        self.defaults.set_data(SETTINGS_KEY, &encoded).await
    }
}
