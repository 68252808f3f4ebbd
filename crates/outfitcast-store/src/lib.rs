//! Application state containers.
//!
//! Four independent stores, each a cheap-to-clone handle with a snapshot
//! read, named mutation actions and a change subscription. Auth and
//! Settings persist through a [`DurableStorage`]; Weather and UI are
//! session-only.

pub mod auth;
pub mod container;
pub mod settings;
pub mod storage;
pub mod ui;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

pub use auth::{
    Appearance, AuthState, AuthStore, Language, NotificationToggles, Theme, User, UserSettings,
    UserUpdate, AUTH_STORAGE_KEY,
};
pub use settings::{
    PreferencesUpdate, SettingsState, SettingsStore, StationSettings, StationUpdate,
    SETTINGS_STORAGE_KEY,
};
pub use storage::{DurableStorage, FileStorage, MemoryStorage, PersistedRecord};
pub use ui::{Notification, Severity, UiState, UiStore, DEFAULT_NOTIFICATION_LIFETIME};
pub use weather::{CurrentWeather, Slot, TimeOfDay, WeatherState, WeatherStore};

/// Handles to every store, passed explicitly to whatever needs them.
#[derive(Clone)]
pub struct Stores {
    pub auth: AuthStore,
    pub weather: WeatherStore,
    pub settings: SettingsStore,
    pub ui: UiStore,
}

impl Stores {
    /// Open all stores, rehydrating the persisted ones from `storage`.
    pub fn open(storage: Arc<dyn DurableStorage>, notification_lifetime: Duration) -> Self {
        Self {
            auth: AuthStore::open(storage.clone()),
            weather: WeatherStore::new(),
            settings: SettingsStore::open(storage),
            ui: UiStore::new(notification_lifetime),
        }
    }

    /// Stores over process-local storage.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::new()), DEFAULT_NOTIFICATION_LIFETIME)
    }
}
