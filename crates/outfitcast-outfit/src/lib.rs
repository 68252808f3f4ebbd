//! Outfit recommendation engine.
//!
//! Maps a [`WeatherObservation`](outfitcast_weather::WeatherObservation) and
//! optional [`UserPreferences`] to an ordered set of clothing items plus
//! free-text style advice.

pub mod bands;
pub mod engine;
pub mod types;

pub use bands::{BaselineSlot, Garment, TemperatureBand};
pub use engine::RecommendationEngine;
pub use types::*;
