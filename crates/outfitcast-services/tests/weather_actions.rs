mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedProvider;
use outfitcast_core::{AppError, ErrorClassifier, ErrorKind, RawFailure};
use outfitcast_outfit::Category;
use outfitcast_services::{FetchOutcome, WeatherActions};
use outfitcast_store::{Severity, Slot, StationSettings, Stores};

fn actions(stores: &Stores, provider: Arc<ScriptedProvider>, hour: u32) -> WeatherActions {
    WeatherActions::new(
        provider,
        stores.weather.clone(),
        stores.settings.clone(),
        stores.ui.clone(),
    )
    .with_hour_source(Arc::new(move || hour))
}

#[tokio::test(start_paused = true)]
async fn test_newer_fetch_wins_over_slower_older_one() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    // A: slow, B: fast
    provider.push_ok(200, 10.0);
    provider.push_ok(50, 25.0);
    let actions = actions(&stores, provider.clone(), 9);

    let (a, b) = tokio::join!(
        actions.fetch_slot(Slot::Home, "Shibuya"),
        actions.fetch_slot(Slot::Home, "Shibuya")
    );

    assert_eq!(a.unwrap(), FetchOutcome::Stale);
    assert_eq!(b.unwrap(), FetchOutcome::Applied);
    assert_eq!(stores.weather.observation(Slot::Home).unwrap().temperature, 25.0);
    assert_eq!(provider.calls_for("Shibuya"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_leaves_loading_set() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    // Older request answers first
    provider.push_ok(50, 10.0);
    provider.push_ok(200, 25.0);
    let actions = actions(&stores, provider, 9);

    let (a, b, loading_between) = tokio::join!(
        actions.fetch_slot(Slot::Home, "Shibuya"),
        actions.fetch_slot(Slot::Home, "Shibuya"),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            stores.weather.snapshot().is_loading
        }
    );

    assert_eq!(a.unwrap(), FetchOutcome::Stale);
    assert_eq!(b.unwrap(), FetchOutcome::Applied);
    assert!(loading_between);

    let state = stores.weather.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.home.unwrap().temperature, 25.0);
}

#[tokio::test(start_paused = true)]
async fn test_stale_failure_is_not_reported() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_err(
        200,
        ErrorClassifier::classify_weather_failure(RawFailure::connectivity("timed out")),
    );
    provider.push_ok(10, 18.0);
    let actions = actions(&stores, provider, 9);

    let (a, b) = tokio::join!(
        actions.fetch_slot(Slot::Home, "Tokyo"),
        actions.fetch_slot(Slot::Home, "Tokyo")
    );

    assert_eq!(a.unwrap(), FetchOutcome::Stale);
    assert_eq!(b.unwrap(), FetchOutcome::Applied);
    assert!(stores.weather.snapshot().error.is_none());
    assert!(stores.ui.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slots_do_not_invalidate_each_other() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_ok(100, 12.0);
    provider.push_ok(10, 22.0);
    let actions = actions(&stores, provider, 9);

    actions
        .fetch_all(&StationSettings::new("Shibuya", "Shinagawa"))
        .await
        .unwrap();

    let state = stores.weather.snapshot();
    assert_eq!(state.home.unwrap().temperature, 12.0);
    assert_eq!(state.work.unwrap().temperature, 22.0);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_recommendations_follow_time_of_day() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_ok(0, 2.0);
    provider.push_ok(0, 31.0);
    let stations = StationSettings::new("Shibuya", "Shinagawa");

    let morning = actions(&stores, provider.clone(), 8);
    morning.fetch_all(&stations).await.unwrap();
    let state = stores.weather.snapshot();
    assert_eq!(state.recommendations[0].id, "very-cold-outerwear");
    assert!(state
        .style_suggestions
        .contains(&"Layer clothing for warmth".to_string()));

    let afternoon = actions(&stores, provider, 15);
    afternoon.refresh_recommendations();
    let state = stores.weather.snapshot();
    assert!(state
        .recommendations
        .iter()
        .all(|r| r.category != Category::Outerwear));
    assert!(state
        .style_suggestions
        .contains(&"Light colors to reflect heat".to_string()));
}

#[tokio::test]
async fn test_missing_current_slot_falls_back_to_other() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_ok(0, 17.0);
    let actions = actions(&stores, provider.clone(), 15);

    actions
        .fetch_all(&StationSettings::new("Shibuya", ""))
        .await
        .unwrap();

    assert_eq!(provider.calls(), vec!["Shibuya".to_string()]);
    assert!(stores.weather.observation(Slot::Work).is_none());
    assert_eq!(stores.weather.snapshot().recommendations[0].id, "cool-outerwear");
}

#[tokio::test]
async fn test_failed_fetch_all_emits_one_notification() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    let offline = || ErrorClassifier::classify_weather_failure(RawFailure::connectivity("offline"));
    provider.push_err(0, offline());
    provider.push_err(0, offline());
    let actions = actions(&stores, provider, 9);

    let err = actions
        .fetch_all(&StationSettings::new("Shibuya", "Tokyo"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkError);

    let state = stores.weather.snapshot();
    assert!(!state.is_loading);
    assert_eq!(
        state.error.as_ref().and_then(AppError::code),
        Some("WEATHER_NETWORK_ERROR")
    );

    let notes = stores.ui.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Error);
    assert_eq!(notes[0].message, err.message());
}

#[tokio::test]
async fn test_whitespace_station_is_validation_error() {
    let stores = Stores::in_memory();
    let provider = Arc::new(ScriptedProvider::new());
    let actions = actions(&stores, provider.clone(), 9);

    let err = actions.fetch_slot(Slot::Work, "   ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
    assert_eq!(err.code(), Some("WEATHER_INVALID_CITY"));
    assert!(provider.calls().is_empty());
    assert_eq!(stores.ui.notifications().len(), 1);
}
