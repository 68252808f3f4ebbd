//! Weather container. Session-only: nothing here is persisted.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use outfitcast_core::AppError;
use outfitcast_outfit::OutfitRecommendation;
use outfitcast_weather::WeatherObservation;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::container::Container;

/// Hour (0-23) from which the work observation becomes current.
pub const AFTERNOON_STARTS_AT: u32 = 12;

/// Station position in weather and settings state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Home,
    Work,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::Home, Slot::Work];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Home => "home",
            Slot::Work => "work",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if hour < AFTERNOON_STARTS_AT {
            Self::Morning
        } else {
            Self::Afternoon
        }
    }

    /// Slot whose observation is current at this time of day.
    pub fn slot(&self) -> Slot {
        match self {
            Self::Morning => Slot::Home,
            Self::Afternoon => Slot::Work,
        }
    }
}

/// The time-appropriate observation and the one for the other slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub time_of_day: TimeOfDay,
    pub current: Option<WeatherObservation>,
    pub alternate: Option<WeatherObservation>,
}

#[derive(Debug, Clone, Default)]
pub struct WeatherState {
    pub home: Option<WeatherObservation>,
    pub work: Option<WeatherObservation>,
    pub recommendations: Vec<OutfitRecommendation>,
    pub style_suggestions: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub is_loading: bool,
    pub error: Option<AppError>,
}

impl WeatherState {
    pub fn observation(&self, slot: Slot) -> Option<&WeatherObservation> {
        match slot {
            Slot::Home => self.home.as_ref(),
            Slot::Work => self.work.as_ref(),
        }
    }

    /// Home before noon, work from noon on.
    pub fn for_hour(&self, hour: u32) -> CurrentWeather {
        let time_of_day = TimeOfDay::from_hour(hour);
        let (current, alternate) = match time_of_day.slot() {
            Slot::Home => (&self.home, &self.work),
            Slot::Work => (&self.work, &self.home),
        };
        CurrentWeather {
            time_of_day,
            current: current.clone(),
            alternate: alternate.clone(),
        }
    }
}

#[derive(Clone)]
pub struct WeatherStore {
    container: Arc<Container<WeatherState>>,
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore {
    pub fn new() -> Self {
        Self {
            container: Arc::new(Container::new(WeatherState::default())),
        }
    }

    pub fn snapshot(&self) -> WeatherState {
        self.container.snapshot()
    }

    pub fn observation(&self, slot: Slot) -> Option<WeatherObservation> {
        self.container.read(|s| s.observation(slot).cloned())
    }

    pub fn current_for_hour(&self, hour: u32) -> CurrentWeather {
        self.container.read(|s| s.for_hour(hour))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WeatherState> {
        self.container.subscribe()
    }

    /// Replace the observation for `slot` and stamp `last_updated`.
    pub fn set_observation(&self, slot: Slot, observation: WeatherObservation) {
        self.container.update(|s| {
            match slot {
                Slot::Home => s.home = Some(observation),
                Slot::Work => s.work = Some(observation),
            }
            s.last_updated = Some(Utc::now());
            s.error = None;
        });
    }

    pub fn set_recommendations(&self, recommendations: Vec<OutfitRecommendation>) {
        self.container.update(|s| s.recommendations = recommendations);
    }

    pub fn set_style_suggestions(&self, suggestions: Vec<String>) {
        self.container.update(|s| s.style_suggestions = suggestions);
    }

    pub fn set_loading(&self, loading: bool) {
        self.container.update(|s| s.is_loading = loading);
    }

    pub fn set_error(&self, error: Option<AppError>) {
        self.container.update(|s| {
            s.error = error;
            s.is_loading = false;
        });
    }

    pub fn clear_weather_data(&self) {
        self.container.update(|s| *s = WeatherState::default());
    }
}
