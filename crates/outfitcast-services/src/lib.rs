//! Top-level actions, timers and refresh scheduling.
//!
//! Everything here works against explicit store handles ([`Stores`]) and a
//! [`WeatherProvider`] trait object, so tests can drive it with a
//! deterministic fake provider and paused time.

pub mod auth_actions;
pub mod refresh;
pub mod search;
pub mod settings_actions;
pub mod timer;
pub mod weather_actions;

use std::sync::Arc;

use outfitcast_core::Config;
use outfitcast_store::Stores;
use outfitcast_weather::{StationDirectory, WeatherProvider};

pub use auth_actions::{validate_credentials, AuthActions, Authenticator, LocalAuthenticator};
pub use refresh::{RefreshScheduler, DEFAULT_DEBOUNCE, DEFAULT_REFRESH_INTERVAL};
pub use search::{SearchState, StationSearch};
pub use settings_actions::SettingsActions;
pub use timer::{Debouncer, TimerSlot};
pub use weather_actions::{FetchOutcome, HourSource, WeatherActions};

/// All actions plus the scheduler, wired to one set of stores.
pub struct Services {
    pub weather: WeatherActions,
    pub auth: AuthActions,
    pub settings: SettingsActions,
    pub scheduler: RefreshScheduler,
}

impl Services {
    pub fn new(
        config: &Config,
        stores: &Stores,
        provider: Arc<dyn WeatherProvider>,
        directory: Arc<dyn StationDirectory>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let weather = WeatherActions::new(
            provider,
            stores.weather.clone(),
            stores.settings.clone(),
            stores.ui.clone(),
        );
        let scheduler = RefreshScheduler::new(
            weather.clone(),
            stores.settings.clone(),
            directory,
            config.weather.refresh_interval(),
            config.search.debounce(),
        );

        Self {
            weather,
            auth: AuthActions::new(authenticator, stores.auth.clone(), stores.ui.clone()),
            settings: SettingsActions::new(
                stores.settings.clone(),
                stores.auth.clone(),
                stores.ui.clone(),
            ),
            scheduler,
        }
    }
}
