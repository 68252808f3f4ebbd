//! Settings container: home/work stations and outfit preferences.
//!
//! Persisted in full under [`SETTINGS_STORAGE_KEY`].

use std::sync::Arc;

use outfitcast_outfit::{Style, TemperatureSensitivity, UserPreferences};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::container::Container;
use crate::storage::{read_record, write_record, DurableStorage};

pub const SETTINGS_STORAGE_KEY: &str = "settings-storage";

/// Free-text station names. Empty means unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StationSettings {
    pub home: String,
    pub work: String,
}

impl StationSettings {
    pub fn new(home: impl Into<String>, work: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            work: work.into(),
        }
    }

    /// True when at least one slot has a station.
    pub fn any_set(&self) -> bool {
        !self.home.is_empty() || !self.work.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StationUpdate {
    pub home: Option<String>,
    pub work: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PreferencesUpdate {
    pub temperature_sensitivity: Option<TemperatureSensitivity>,
    pub style: Option<Style>,
    pub favorite_colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsState {
    pub stations: StationSettings,
    pub preferences: UserPreferences,
}

#[derive(Clone)]
pub struct SettingsStore {
    container: Arc<Container<SettingsState>>,
    storage: Arc<dyn DurableStorage>,
}

impl SettingsStore {
    /// Open the store, rehydrating from `storage`. A missing or unreadable
    /// record starts from defaults.
    pub fn open(storage: Arc<dyn DurableStorage>) -> Self {
        let initial = match read_record::<SettingsState>(storage.as_ref(), SETTINGS_STORAGE_KEY) {
            Ok(Some(state)) => {
                tracing::info!("Rehydrated settings (home={:?}, work={:?})", state.stations.home, state.stations.work);
                state
            }
            Ok(None) => SettingsState::default(),
            Err(e) => {
                tracing::warn!("Failed to rehydrate settings, using defaults: {:#}", e);
                SettingsState::default()
            }
        };

        Self {
            container: Arc::new(Container::new(initial)),
            storage,
        }
    }

    pub fn snapshot(&self) -> SettingsState {
        self.container.snapshot()
    }

    pub fn stations(&self) -> StationSettings {
        self.container.read(|s| s.stations.clone())
    }

    pub fn preferences(&self) -> UserPreferences {
        self.container.read(|s| s.preferences.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettingsState> {
        self.container.subscribe()
    }

    pub fn set_stations(&self, stations: StationSettings) {
        self.mutate(|s| s.stations = stations);
    }

    pub fn set_preferences(&self, preferences: UserPreferences) {
        self.mutate(|s| s.preferences = preferences);
    }

    pub fn update_stations(&self, update: StationUpdate) {
        self.mutate(|s| {
            if let Some(home) = update.home {
                s.stations.home = home;
            }
            if let Some(work) = update.work {
                s.stations.work = work;
            }
        });
    }

    pub fn update_preferences(&self, update: PreferencesUpdate) {
        self.mutate(|s| {
            if let Some(sensitivity) = update.temperature_sensitivity {
                s.preferences.temperature_sensitivity = sensitivity;
            }
            if let Some(style) = update.style {
                s.preferences.style = style;
            }
            if let Some(colors) = update.favorite_colors {
                s.preferences.favorite_colors = colors;
            }
        });
    }

    fn mutate(&self, f: impl FnOnce(&mut SettingsState)) {
        let (_, snapshot) = self.container.update(f);
        if let Err(e) = write_record(self.storage.as_ref(), SETTINGS_STORAGE_KEY, &snapshot) {
            tracing::warn!("Failed to persist settings: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, SettingsStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SettingsStore::open(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_defaults_are_unset() {
        let (storage, store) = store();
        assert_eq!(store.stations(), StationSettings::default());
        assert!(!store.stations().any_set());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_partial_station_update() {
        let (_, store) = store();
        store.set_stations(StationSettings::new("Shibuya", "Shinjuku"));
        store.update_stations(StationUpdate {
            work: Some("Tokyo".to_string()),
            ..Default::default()
        });
        assert_eq!(store.stations(), StationSettings::new("Shibuya", "Tokyo"));
    }

    #[test]
    fn test_partial_preferences_update() {
        let (_, store) = store();
        store.update_preferences(PreferencesUpdate {
            style: Some(Style::Sporty),
            ..Default::default()
        });
        let prefs = store.preferences();
        assert_eq!(prefs.style, Style::Sporty);
        assert_eq!(prefs.temperature_sensitivity, TemperatureSensitivity::Normal);
    }

    #[test]
    fn test_every_mutation_persists_and_rehydrates() {
        let (storage, store) = store();
        store.set_stations(StationSettings::new("Osaka", "Kyoto"));
        store.update_preferences(PreferencesUpdate {
            temperature_sensitivity: Some(TemperatureSensitivity::Cold),
            favorite_colors: Some(vec!["navy".to_string()]),
            ..Default::default()
        });

        let raw = storage.load(SETTINGS_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["stations"]["home"], "Osaka");
        assert_eq!(value["state"]["preferences"]["temperatureSensitivity"], "cold");

        let reopened = SettingsStore::open(storage);
        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(SETTINGS_STORAGE_KEY, "{broken").unwrap();
        let store = SettingsStore::open(storage);
        assert_eq!(store.snapshot(), SettingsState::default());
    }
}
