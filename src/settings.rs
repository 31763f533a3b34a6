use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    api: ApiSettings,
    profile_id: Option<String>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn api(&self) -> ApiSettings {
        self.data.read().unwrap().api.clone()
    }

    /// The remembered profile, if any. Callers pass it on explicitly; nothing
    /// in the core reads it ambiently.
    pub fn profile_id(&self) -> Option<String> {
        self.data.read().unwrap().profile_id.clone()
    }

    pub fn update_api(&self, api: ApiSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.api = api;
        self.persist(&guard)
    }

    pub fn update_profile_id(&self, profile_id: Option<String>) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.profile_id = profile_id;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

/// `<config dir>/bearmode/settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("could not determine the user configuration directory"))?;
    Ok(dir.join("bearmode").join("settings.json"))
}
