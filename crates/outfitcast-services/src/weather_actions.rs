//! Weather fetch orchestration.
//!
//! Fetches observations for the configured stations, writes them into the
//! weather store and re-derives recommendations from the time-appropriate
//! observation. Each slot carries a generation counter so a slower, older
//! response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Timelike;
use outfitcast_core::{AppError, ErrorClassifier};
use outfitcast_outfit::RecommendationEngine;
use outfitcast_store::{Severity, SettingsStore, Slot, StationSettings, UiStore, WeatherStore};
use outfitcast_weather::{WeatherObservation, WeatherProvider};

/// Supplies the current local hour (0-23).
pub type HourSource = Arc<dyn Fn() -> u32 + Send + Sync>;

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result written to the store
    Applied,
    /// A newer fetch for the same slot was issued; result dropped
    Stale,
    /// Station unset, nothing fetched
    Skipped,
}

#[derive(Debug, Default)]
struct Generations {
    home: AtomicU64,
    work: AtomicU64,
}

impl Generations {
    fn counter(&self, slot: Slot) -> &AtomicU64 {
        match slot {
            Slot::Home => &self.home,
            Slot::Work => &self.work,
        }
    }

    fn next(&self, slot: Slot) -> u64 {
        self.counter(slot).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, slot: Slot, generation: u64) -> bool {
        self.counter(slot).load(Ordering::SeqCst) == generation
    }
}

#[derive(Clone)]
pub struct WeatherActions {
    provider: Arc<dyn WeatherProvider>,
    engine: RecommendationEngine,
    weather: WeatherStore,
    settings: SettingsStore,
    ui: UiStore,
    generations: Arc<Generations>,
    hour: HourSource,
}

impl WeatherActions {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        weather: WeatherStore,
        settings: SettingsStore,
        ui: UiStore,
    ) -> Self {
        Self {
            provider,
            engine: RecommendationEngine::new(),
            weather,
            settings,
            ui,
            generations: Arc::new(Generations::default()),
            hour: Arc::new(|| chrono::Local::now().hour()),
        }
    }

    /// Replace the clock used for time-of-day selection.
    pub fn with_hour_source(mut self, hour: HourSource) -> Self {
        self.hour = hour;
        self
    }

    /// Fetch both stations concurrently.
    ///
    /// Unset stations are skipped. A failure in either slot produces a
    /// single error notification for the whole action.
    pub async fn fetch_all(&self, stations: &StationSettings) -> Result<(), AppError> {
        self.weather.set_loading(true);

        let (home, work) = tokio::join!(
            self.fetch_into(Slot::Home, &stations.home),
            self.fetch_into(Slot::Work, &stations.work)
        );

        self.refresh_recommendations();

        match (home, work) {
            (Ok(home), Ok(work)) => {
                // A stale slot means a newer fetch for it is still running
                if home != FetchOutcome::Stale && work != FetchOutcome::Stale {
                    self.weather.set_loading(false);
                }
                Ok(())
            }
            (Err(error), _) | (_, Err(error)) => {
                self.report(&error);
                Err(error)
            }
        }
    }

    /// Fetch the stations currently held by the settings store.
    pub async fn fetch_configured(&self) -> Result<(), AppError> {
        let stations = self.settings.stations();
        self.fetch_all(&stations).await
    }

    /// Fetch one slot as a standalone action.
    pub async fn fetch_slot(&self, slot: Slot, station: &str) -> Result<FetchOutcome, AppError> {
        self.weather.set_loading(true);
        let outcome = self.fetch_into(slot, station).await;

        match outcome {
            Ok(outcome) => {
                match outcome {
                    FetchOutcome::Applied => {
                        self.refresh_recommendations();
                        self.weather.set_loading(false);
                    }
                    FetchOutcome::Skipped => self.weather.set_loading(false),
                    FetchOutcome::Stale => {}
                }
                Ok(outcome)
            }
            Err(error) => {
                self.report(&error);
                Err(error)
            }
        }
    }

    /// Recompute recommendations and style advice from the time-appropriate
    /// observation (falling back to the other slot) and current preferences.
    pub fn refresh_recommendations(&self) {
        let current = self.weather.current_for_hour((self.hour)());
        let Some(observation) = current.current.or(current.alternate) else {
            return;
        };

        let preferences = self.settings.preferences();
        let recommendations = self
            .engine
            .generate_recommendations(&observation, Some(&preferences));
        let suggestions = self.engine.get_style_suggestions(&observation);

        tracing::debug!(
            location = %observation.location,
            time_of_day = ?current.time_of_day,
            items = recommendations.len(),
            "Updated recommendations"
        );

        // Suggestions first so subscribers see both with the new outfit
        self.weather.set_style_suggestions(suggestions);
        self.weather.set_recommendations(recommendations);
    }

    async fn fetch_into(&self, slot: Slot, station: &str) -> Result<FetchOutcome, AppError> {
        // Whitespace-only names still reach the provider, which rejects them
        if station.is_empty() {
            return Ok(FetchOutcome::Skipped);
        }

        let generation = self.generations.next(slot);
        let result = self.provider.get_weather_by_city(station).await;

        if !self.generations.is_current(slot, generation) {
            tracing::debug!(
                %slot,
                generation,
                latest = self.generations.counter(slot).load(Ordering::SeqCst),
                "Discarding stale weather response"
            );
            return Ok(FetchOutcome::Stale);
        }

        let observation: WeatherObservation = result?;
        tracing::info!(
            %slot,
            location = %observation.location,
            temperature = observation.temperature,
            condition = observation.condition.description(),
            "{} Weather updated",
            observation.condition.icon()
        );
        self.weather.set_observation(slot, observation);
        Ok(FetchOutcome::Applied)
    }

    fn report(&self, error: &AppError) {
        ErrorClassifier::log_error(error);
        self.weather.set_error(Some(error.clone()));
        self.ui
            .add_notification(Severity::Error, ErrorClassifier::get_error_message(error));
    }
}
