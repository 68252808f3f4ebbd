mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedProvider;
use outfitcast_core::{ErrorClassifier, RawFailure};
use outfitcast_outfit::TemperatureSensitivity;
use outfitcast_services::{RefreshScheduler, WeatherActions};
use outfitcast_store::{PreferencesUpdate, Slot, StationSettings, Stores};
use outfitcast_weather::StaticStationDirectory;

const INTERVAL: Duration = Duration::from_secs(300);
const DEBOUNCE: Duration = Duration::from_millis(300);

fn scheduler(stores: &Stores, provider: Arc<ScriptedProvider>) -> RefreshScheduler {
    let actions = WeatherActions::new(
        provider,
        stores.weather.clone(),
        stores.settings.clone(),
        stores.ui.clone(),
    )
    .with_hour_source(Arc::new(|| 9));

    RefreshScheduler::new(
        actions,
        stores.settings.clone(),
        Arc::new(StaticStationDirectory::reference()),
        INTERVAL,
        DEBOUNCE,
    )
}

#[tokio::test(start_paused = true)]
async fn test_two_changes_within_debounce_fetch_once_per_slot() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    let scheduler = scheduler(&stores, provider.clone());
    scheduler.start();

    stores
        .settings
        .set_stations(StationSettings::new("Shibuya", "Shinjuku"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    stores
        .settings
        .set_stations(StationSettings::new("Shibuya", "Tokyo"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(provider.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(400)).await;
    let calls = provider.calls();
    assert_eq!(calls.len(), 2, "calls: {calls:?}");
    assert_eq!(provider.calls_for("Shibuya"), 1);
    assert_eq!(provider.calls_for("Tokyo"), 1);
    assert_eq!(provider.calls_for("Shinjuku"), 0);

    assert_eq!(
        stores.weather.observation(Slot::Work).unwrap().location,
        "Tokyo"
    );
}

#[tokio::test(start_paused = true)]
async fn test_start_fetches_then_refreshes_periodically() {
    let stores = Stores::in_memory();
    stores
        .settings
        .set_stations(StationSettings::new("Osaka", "Kyoto"));
    let provider = Arc::new(ScriptedProvider::new());
    let scheduler = scheduler(&stores, provider.clone());

    scheduler.start();
    assert!(scheduler.is_running());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(provider.calls().len(), 2);
    assert!(!stores.weather.snapshot().recommendations.is_empty());

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(provider.calls().len(), 4);

    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());

    tokio::time::sleep(INTERVAL * 3).await;
    assert_eq!(provider.calls().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_restart_does_not_duplicate_interval() {
    let stores = Stores::in_memory();
    stores
        .settings
        .set_stations(StationSettings::new("Osaka", "Kyoto"));
    let provider = Arc::new(ScriptedProvider::new());
    let scheduler = scheduler(&stores, provider.clone());

    scheduler.start();
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(10)).await;
    // The first start's fetch is cancelled before it reaches the provider
    assert_eq!(provider.calls().len(), 2);

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(provider.calls().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_restart_during_slow_fetch_keeps_one_in_flight() {
    let stores = Stores::in_memory();
    stores
        .settings
        .set_stations(StationSettings::new("Osaka", "Kyoto"));
    let provider = Arc::new(ScriptedProvider::new());
    for temperature in [10.0, 11.0, 12.0, 13.0] {
        provider.push_ok(500, temperature);
    }
    let scheduler = scheduler(&stores, provider.clone());

    scheduler.start();
    tokio::time::sleep(Duration::from_millis(10)).await;
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(provider.calls().len(), 4);

    // Only the second start's responses land
    tokio::time::sleep(Duration::from_secs(1)).await;
    let state = stores.weather.snapshot();
    assert_eq!(state.home.unwrap().temperature, 12.0);
    assert_eq!(state.work.unwrap().temperature, 13.0);
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_in_flight_fetch() {
    let stores = Stores::in_memory();
    stores
        .settings
        .set_stations(StationSettings::new("Osaka", "Kyoto"));
    let provider = Arc::new(ScriptedProvider::new());
    let offline = || ErrorClassifier::classify_weather_failure(RawFailure::connectivity("offline"));
    provider.push_err(1000, offline());
    provider.push_err(1000, offline());
    let scheduler = scheduler(&stores, provider.clone());

    scheduler.start();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(provider.calls().len(), 2);

    drop(scheduler);
    tokio::time::sleep(Duration::from_secs(2)).await;

    let state = stores.weather.snapshot();
    assert!(state.error.is_none());
    assert!(state.home.is_none());
    assert!(stores.ui.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_in_flight_debounced_fetch() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_ok(1000, 5.0);
    provider.push_ok(1000, 6.0);
    let scheduler = scheduler(&stores, provider.clone());
    scheduler.start();

    stores
        .settings
        .set_stations(StationSettings::new("Shibuya", "Tokyo"));
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(10)).await;
    assert_eq!(provider.calls().len(), 2);

    scheduler.stop();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let state = stores.weather.snapshot();
    assert!(state.home.is_none());
    assert!(state.work.is_none());
    assert!(state.recommendations.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_preference_change_recomputes_without_fetch() {
    let stores = Stores::in_memory();
    stores
        .settings
        .set_stations(StationSettings::new("Shibuya", "Tokyo"));
    let provider = Arc::new(ScriptedProvider::new());
    let scheduler = scheduler(&stores, provider.clone());
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(10)).await;

    // 20°C default observation
    assert_eq!(
        stores.weather.snapshot().recommendations[0].id,
        "comfortable-tops"
    );

    stores.settings.update_preferences(PreferencesUpdate {
        temperature_sensitivity: Some(TemperatureSensitivity::Cold),
        ..Default::default()
    });
    tokio::time::sleep(Duration::from_millis(DEBOUNCE.as_millis() as u64 * 2)).await;

    assert_eq!(provider.calls().len(), 2);
    assert_eq!(
        stores.weather.snapshot().recommendations[0].id,
        "cool-outerwear"
    );
}

#[tokio::test(start_paused = true)]
async fn test_clearing_stations_does_not_fetch() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    let scheduler = scheduler(&stores, provider.clone());
    scheduler.start();

    stores.settings.set_stations(StationSettings::new("", ""));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(provider.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_work() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    let scheduler = scheduler(&stores, provider.clone());
    scheduler.start();

    stores
        .settings
        .set_stations(StationSettings::new("Shibuya", "Tokyo"));
    scheduler.search(Slot::Home).input("Shin");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(scheduler.search(Slot::Home).is_pending());

    drop(scheduler);
    tokio::time::sleep(INTERVAL * 2).await;
    assert!(provider.calls().is_empty());
}
