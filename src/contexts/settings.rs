use dioxus::{logger::tracing, prelude::*};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::{SettingsError, SettingsResult};
use crate::utils::file_utils;

/// UI preferences that survive a restart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Hide pods in the kube-system namespace on the Pods page
    pub hide_kube_system_pods: bool,
    /// Hide deployments in the kube-system namespace on the Deployments page
    pub hide_kube_system_deployments: bool,
}

/// Persistence port for [`Settings`]
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> SettingsResult<Settings>;
    fn save(&self, settings: &Settings) -> SettingsResult<()>;
}

/// Stores settings as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located in the dashboard directory under the user's home
    pub fn in_home_dir() -> SettingsResult<Self> {
        file_utils::settings_file_path()
            .map(Self::new)
            .map_err(|_| SettingsError::NoHomeDirectory)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> SettingsResult<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, settings: &Settings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Load settings, falling back to defaults when the store is unreadable
pub fn load_or_default(store: &dyn SettingsStore) -> Settings {
    match store.load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

/// Context giving pages access to the persisted preferences
#[derive(Clone)]
pub struct SettingsContext {
    pub settings: Signal<Settings>,
    store: Arc<dyn SettingsStore>,
}

impl SettingsContext {
    pub fn new(settings: Signal<Settings>, store: Arc<dyn SettingsStore>) -> Self {
        Self { settings, store }
    }

    /// Apply a change and write it through to the store
    pub fn update(&mut self, change: impl FnOnce(&mut Settings)) {
        let snapshot = {
            let mut settings = self.settings.write();
            change(&mut settings);
            settings.clone()
        };

        if let Err(e) = self.store.save(&snapshot) {
            tracing::error!("Failed to save settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));

        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_hide_kube_system_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = JsonFileStore::new(&path);
        let settings = Settings {
            hide_kube_system_pods: true,
            hide_kube_system_deployments: false,
        };
        store.save(&settings).unwrap();

        // a fresh store stands in for an application restart
        let reloaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"hideKubeSystemDeployments": true}"#).unwrap();

        let settings = JsonFileStore::new(&path).load().unwrap();
        assert!(!settings.hide_kube_system_pods);
        assert!(settings.hide_kube_system_deployments);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(SettingsError::Serialization(_))));
        assert_eq!(load_or_default(&store), Settings::default());
    }
}
