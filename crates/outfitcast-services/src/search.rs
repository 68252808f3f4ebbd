//! Debounced station search for one input field.

use std::sync::Arc;
use std::time::Duration;

use outfitcast_core::{AppError, ErrorClassifier};
use outfitcast_store::container::Container;
use outfitcast_weather::{Station, StationDirectory};
use tokio::sync::broadcast;

use crate::timer::Debouncer;

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Latest input, updated immediately on every keystroke
    pub query: String,
    pub suggestions: Vec<Station>,
    pub error: Option<AppError>,
}

/// Defers directory lookups until input has been quiet for the debounce
/// delay. Results for a query that is no longer current are dropped.
pub struct StationSearch {
    directory: Arc<dyn StationDirectory>,
    state: Arc<Container<SearchState>>,
    debouncer: Debouncer,
}

impl StationSearch {
    pub fn new(directory: Arc<dyn StationDirectory>, debounce: Duration) -> Self {
        Self {
            directory,
            state: Arc::new(Container::new(SearchState::default())),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.snapshot()
    }

    pub fn suggestions(&self) -> Vec<Station> {
        self.state.read(|s| s.suggestions.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Record new input and schedule a lookup for it.
    ///
    /// Empty input clears suggestions at once without consulting the
    /// directory.
    pub fn input(&self, query: &str) {
        let query = query.to_string();
        self.state.update(|s| s.query = query.clone());

        if query.is_empty() {
            self.debouncer.cancel();
            self.state.update(|s| {
                s.suggestions.clear();
                s.error = None;
            });
            return;
        }

        let directory = self.directory.clone();
        let state = self.state.clone();
        self.debouncer.call(async move {
            let result = directory.find(&query).await;

            let still_current = state.read(|s| s.query == query);
            if !still_current {
                tracing::debug!("Dropping station results for outdated query {:?}", query);
                return;
            }

            match result {
                Ok(stations) => {
                    tracing::debug!("{} station(s) match {:?}", stations.len(), query);
                    state.update(|s| {
                        s.suggestions = stations;
                        s.error = None;
                    });
                }
                Err(error) => {
                    ErrorClassifier::log_error(&error);
                    state.update(|s| {
                        s.suggestions.clear();
                        s.error = Some(error);
                    });
                }
            }
        });
    }

    /// Drop the pending lookup, if any.
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
