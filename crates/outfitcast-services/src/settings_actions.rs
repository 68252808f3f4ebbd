//! Saving stations and preferences from the settings form.

use outfitcast_core::{AppError, ErrorClassifier};
use outfitcast_outfit::UserPreferences;
use outfitcast_store::{AuthStore, SettingsStore, Severity, StationSettings, UiStore, UserUpdate};

pub const SETTINGS_STATION_REQUIRED: &str = "SETTINGS_STATION_REQUIRED";

#[derive(Clone)]
pub struct SettingsActions {
    settings: SettingsStore,
    auth: AuthStore,
    ui: UiStore,
}

impl SettingsActions {
    pub fn new(settings: SettingsStore, auth: AuthStore, ui: UiStore) -> Self {
        Self { settings, auth, ui }
    }

    /// Store trimmed stations and preferences, mirroring them onto the
    /// signed-in profile. Both stations are required.
    pub fn save(
        &self,
        stations: StationSettings,
        preferences: UserPreferences,
    ) -> Result<StationSettings, AppError> {
        let stations = StationSettings::new(stations.home.trim(), stations.work.trim());

        if stations.home.is_empty() || stations.work.is_empty() {
            let error = AppError::validation("Select both a home and a work station.")
                .with_code(SETTINGS_STATION_REQUIRED);
            ErrorClassifier::log_error(&error);
            self.ui
                .add_notification(Severity::Error, ErrorClassifier::get_error_message(&error));
            return Err(error);
        }

        self.settings.set_stations(stations.clone());
        self.settings.set_preferences(preferences.clone());

        if let Some(user) = self.auth.user() {
            let mut profile = user.settings;
            profile.stations = stations.clone();
            profile.preferences = preferences;
            self.auth.update_user(UserUpdate {
                settings: Some(profile),
                ..Default::default()
            });
        }

        tracing::info!(home = %stations.home, work = %stations.work, "Settings saved");
        self.ui.add_notification(Severity::Success, "Settings saved");
        Ok(stations)
    }
}
