//! Auth container.
//!
//! Only the signed-in [`User`] survives a restart; loading and error flags
//! are session state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use outfitcast_outfit::UserPreferences;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::container::Container;
use crate::settings::StationSettings;
use crate::storage::{read_record, write_record, DurableStorage};

pub const AUTH_STORAGE_KEY: &str = "auth-storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Appearance {
    pub theme: Theme,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationToggles {
    pub weather_alerts: bool,
    pub daily_recommendation: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            weather_alerts: true,
            daily_recommendation: true,
        }
    }
}

/// Per-user profile settings carried with the account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub stations: StationSettings,
    pub preferences: UserPreferences,
    #[serde(default)]
    pub notifications: NotificationToggles,
    #[serde(default)]
    pub appearance: Appearance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
}

/// Partial profile change; `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub settings: Option<UserSettings>,
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// The persisted slice of [`AuthState`].
#[derive(Debug, Serialize, Deserialize)]
struct PersistedAuth {
    user: Option<User>,
}

#[derive(Clone)]
pub struct AuthStore {
    container: Arc<Container<AuthState>>,
    storage: Arc<dyn DurableStorage>,
}

impl AuthStore {
    pub fn open(storage: Arc<dyn DurableStorage>) -> Self {
        let user = match read_record::<PersistedAuth>(storage.as_ref(), AUTH_STORAGE_KEY) {
            Ok(Some(persisted)) => persisted.user,
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to rehydrate auth state: {:#}", e);
                None
            }
        };

        if let Some(user) = &user {
            tracing::info!("Restored session for {}", user.email);
        }

        Self {
            container: Arc::new(Container::new(AuthState {
                user,
                ..Default::default()
            })),
            storage,
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.container.snapshot()
    }

    pub fn user(&self) -> Option<User> {
        self.container.read(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.container.read(AuthState::is_authenticated)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthState> {
        self.container.subscribe()
    }

    /// Sign in as `user`, clearing any previous error.
    pub fn login(&self, user: User) {
        self.mutate(|s| {
            s.user = Some(user);
            s.error = None;
            s.is_loading = false;
        });
    }

    pub fn logout(&self) {
        self.mutate(|s| {
            s.user = None;
            s.error = None;
            s.is_loading = false;
        });
    }

    /// Apply `update` to the signed-in user. No-op when signed out.
    pub fn update_user(&self, update: UserUpdate) {
        self.mutate(|s| {
            let Some(user) = s.user.as_mut() else {
                return;
            };
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(avatar) = update.avatar {
                user.avatar = Some(avatar);
            }
            if let Some(settings) = update.settings {
                user.settings = settings;
            }
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.container.update(|s| s.is_loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.container.update(|s| {
            s.error = error;
            s.is_loading = false;
        });
    }

    fn mutate(&self, f: impl FnOnce(&mut AuthState)) {
        let (_, snapshot) = self.container.update(f);
        let persisted = PersistedAuth {
            user: snapshot.user,
        };
        if let Err(e) = write_record(self.storage.as_ref(), AUTH_STORAGE_KEY, &persisted) {
            tracing::warn!("Failed to persist auth state: {:#}", e);
        }
    }
}
