//! Periodic and on-change weather refresh.

use std::sync::Arc;
use std::time::Duration;

use outfitcast_store::{SettingsStore, Slot, StationSettings};
use outfitcast_weather::StationDirectory;
use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::search::StationSearch;
use crate::timer::Debouncer;
use crate::weather_actions::WeatherActions;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Drives weather fetches from two sources: a fixed refresh interval and
/// station changes in the settings store.
///
/// Station changes go through a debounce so a burst of edits triggers one
/// fetch per slot. Preference changes only re-derive recommendations.
/// [`start`](Self::start) re-arms everything; [`stop`](Self::stop) and
/// dropping the scheduler cancel all pending work, including fetches that
/// are already in flight.
pub struct RefreshScheduler {
    actions: WeatherActions,
    settings: SettingsStore,
    interval: Duration,
    fetch_debounce: Arc<Debouncer>,
    home_search: StationSearch,
    work_search: StationSearch,
    running: Mutex<Option<CancellationToken>>,
}

impl RefreshScheduler {
    pub fn new(
        actions: WeatherActions,
        settings: SettingsStore,
        directory: Arc<dyn StationDirectory>,
        interval: Duration,
        debounce: Duration,
    ) -> Self {
        Self {
            actions,
            settings,
            interval,
            fetch_debounce: Arc::new(Debouncer::new(debounce)),
            home_search: StationSearch::new(directory.clone(), debounce),
            work_search: StationSearch::new(directory, debounce),
            running: Mutex::new(None),
        }
    }

    /// Search field for `slot`.
    pub fn search(&self, slot: Slot) -> &StationSearch {
        match slot {
            Slot::Home => &self.home_search,
            Slot::Work => &self.work_search,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Start (or restart) the interval and the settings watcher.
    ///
    /// Fetches immediately when a station is already configured.
    pub fn start(&self) {
        self.stop();

        let token = CancellationToken::new();
        *self.running.lock() = Some(token.clone());

        let initial = self.settings.stations();
        if initial.any_set() {
            let actions = self.actions.clone();
            let stations = initial.clone();
            let token = token.clone();
            tokio::spawn(async move {
                // Failures are already reported through the stores
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("Initial weather fetch cancelled");
                    }
                    _ = actions.fetch_all(&stations) => {}
                }
            });
        }

        self.spawn_interval(token.clone());
        self.spawn_settings_watcher(token, initial);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            debounce_ms = self.fetch_debounce.delay().as_millis() as u64,
            "Refresh scheduler started"
        );
    }

    /// Cancel the interval, the watcher and every pending debounce.
    /// Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(token) = self.running.lock().take() {
            token.cancel();
            tracing::info!("Refresh scheduler stopped");
        }
        self.fetch_debounce.cancel();
        self.home_search.cancel();
        self.work_search.cancel();
    }

    /// Schedule a debounced fetch of the configured stations.
    pub fn request_refresh(&self) {
        Self::schedule_fetch(&self.fetch_debounce, &self.actions);
    }

    /// The debouncer drops the fetch if it is re-armed or cancelled mid-flight.
    fn schedule_fetch(debounce: &Debouncer, actions: &WeatherActions) {
        let actions = actions.clone();
        debounce.call(async move {
            let _ = actions.fetch_configured().await;
        });
    }

    fn spawn_interval(&self, token: CancellationToken) {
        let actions = self.actions.clone();
        let period = self.interval;
        if period.is_zero() {
            tracing::warn!("Refresh interval is zero, periodic refresh disabled");
            return;
        }

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                tracing::debug!("Periodic weather refresh");
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = actions.fetch_configured() => {}
                }
            }
        });
    }

    fn spawn_settings_watcher(&self, token: CancellationToken, mut last: StationSettings) {
        let mut changes = self.settings.subscribe();
        let settings = self.settings.clone();
        let actions = self.actions.clone();
        let debounce = self.fetch_debounce.clone();

        tokio::spawn(async move {
            loop {
                let state = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    received = changes.recv() => match received {
                        Ok(state) => state,
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!("Settings watcher skipped {} updates", skipped);
                            settings.snapshot()
                        }
                        Err(RecvError::Closed) => break,
                    },
                };

                if state.stations != last {
                    last = state.stations.clone();
                    if last.any_set() {
                        Self::schedule_fetch(&debounce, &actions);
                    }
                } else {
                    actions.refresh_recommendations();
                }
            }
        });
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
