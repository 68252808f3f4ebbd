//! Weather data for Outfitcast
//!
//! Provides current conditions through the [`WeatherProvider`] seam, an
//! Open-Meteo implementation of it, and the station directory used to
//! pick home/work locations.

pub mod open_meteo;
pub mod provider;
pub mod stations;
pub mod types;

pub use open_meteo::OpenMeteoProvider;
pub use provider::{validate_city_name, WeatherProvider};
pub use stations::{StaticStationDirectory, Station, StationDirectory};
pub use types::*;
