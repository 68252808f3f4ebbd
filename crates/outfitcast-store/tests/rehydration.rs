//! Persistence across a simulated restart using file-backed storage.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use outfitcast_outfit::{Style, UserPreferences};
use outfitcast_store::{
    FileStorage, Severity, Slot, StationSettings, Stores, User, UserSettings,
};
use outfitcast_weather::{WeatherCondition, WeatherObservation};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Stores {
    let storage = FileStorage::new(dir.path()).unwrap();
    Stores::open(Arc::new(storage), Duration::from_secs(5))
}

#[tokio::test]
async fn test_durable_and_session_state_across_restart() {
    let dir = TempDir::new().unwrap();

    {
        let stores = open(&dir);
        stores
            .settings
            .set_stations(StationSettings::new("Shibuya", "Shinagawa"));
        stores.settings.set_preferences(UserPreferences {
            style: Style::Business,
            ..Default::default()
        });
        stores.auth.login(User {
            id: "local-1".to_string(),
            email: "ken@example.com".to_string(),
            name: "ken".to_string(),
            avatar: None,
            settings: UserSettings::default(),
            created_at: Utc::now(),
        });
        stores.weather.set_observation(
            Slot::Home,
            WeatherObservation::new("Shibuya", 11.0, WeatherCondition::Cloudy),
        );
        stores.ui.add_notification(Severity::Success, "Settings saved");
    }

    assert!(dir.path().join("settings-storage.json").exists());
    assert!(dir.path().join("auth-storage.json").exists());

    let stores = open(&dir);
    assert_eq!(
        stores.settings.stations(),
        StationSettings::new("Shibuya", "Shinagawa")
    );
    assert_eq!(stores.settings.preferences().style, Style::Business);
    assert_eq!(stores.auth.user().unwrap().email, "ken@example.com");

    // Session-only containers start empty
    assert!(stores.weather.observation(Slot::Home).is_none());
    assert!(stores.ui.notifications().is_empty());
}

#[tokio::test]
async fn test_settings_record_is_self_describing() {
    let dir = TempDir::new().unwrap();
    let stores = open(&dir);
    stores
        .settings
        .set_stations(StationSettings::new("Osaka", ""));

    let raw = std::fs::read_to_string(dir.path().join("settings-storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "state": {
                "stations": {"home": "Osaka", "work": ""},
                "preferences": {
                    "temperatureSensitivity": "normal",
                    "style": "casual",
                    "favoriteColors": []
                }
            },
            "version": 0
        })
    );
}
