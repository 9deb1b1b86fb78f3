use serde::{Deserialize, Serialize};

use crate::settings::AppSettings;
use crate::storage::{SharedDefaults, StorageError};

pub const SESSION_KEY: &str = "appState";

/// Launch-time flags handed explicitly to the front end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub has_completed_onboarding: bool,
    #[serde(skip)]
    pub requires_authentication: bool,
}

impl Session {
    pub async fn load(defaults: &dyn SharedDefaults, settings: &AppSettings) -> Self {
        let mut session: Session = match defaults.data(SESSION_KEY).await {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Stored session could not be decoded: {}", e);
                Session::default()
            }),
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!("Failed to read session: {}", e);
                Session::default()
            }
        };
        session.requires_authentication = settings.requires_authentication();
        session
    }

    pub async fn save(&self, defaults: &dyn SharedDefaults) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(self)?;
        defaults.set_data(SESSION_KEY, &encoded).await
    }

    pub async fn complete_onboarding(&mut self, defaults: &dyn SharedDefaults) -> Result<(), StorageError> {
        self.has_completed_onboarding = true;
        self.save(defaults).await
    }

    /// Shows onboarding again on next launch.
    pub async fn reset(&mut self, defaults: &dyn SharedDefaults) -> Result<(), StorageError> {
        self.has_completed_onboarding = false;
        self.save(defaults).await
    }
}
