//! Weather → outfit mapping.
//!
//! Everything here is a pure function of its inputs: no clock, no I/O.

use std::collections::BTreeMap;

use outfitcast_weather::{WeatherCondition, WeatherObservation};

use crate::bands::TemperatureBand;
use crate::types::{Category, OutfitRecommendation, TemperatureSensitivity, UserPreferences};

/// Degrees added or removed for warm/cold sensitivity.
pub const SENSITIVITY_OFFSET: f64 = 3.0;
/// Wind speed (m/s) above which a windbreaker is suggested.
pub const WIND_THRESHOLD: f64 = 10.0;
pub const HUMIDITY_THRESHOLD: f64 = 75.0;
pub const HOT_THRESHOLD: f64 = 30.0;
pub const LAYERING_THRESHOLD: f64 = 10.0;

const RAINCOAT: &str = "Raincoat";
const WINDBREAKER: &str = "Windbreaker";
const RAIN_ICON: &str = "🧥";
const WIND_ICON: &str = "🧥";

const HOT_ADVICE: [&str; 2] = [
    "Light colors to reflect heat",
    "Breathable fabrics like cotton or linen",
];
const COLD_ADVICE: [&str; 2] = ["Layer clothing for warmth", "Dark colors to absorb heat"];
const HUMID_ADVICE: [&str; 2] = [
    "Moisture-wicking materials",
    "Loose-fitting clothes for air circulation",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Perceived temperature (ambient when absent) shifted by sensitivity.
    pub fn effective_temperature(
        observation: &WeatherObservation,
        preferences: Option<&UserPreferences>,
    ) -> f64 {
        let perceived = observation.perceived_temperature();
        match preferences.map(|p| p.temperature_sensitivity) {
            Some(TemperatureSensitivity::Cold) => perceived - SENSITIVITY_OFFSET,
            Some(TemperatureSensitivity::Warm) => perceived + SENSITIVITY_OFFSET,
            Some(TemperatureSensitivity::Normal) | None => perceived,
        }
    }

    /// Ordered recommendations, at most one per category.
    #[must_use]
    pub fn generate_recommendations(
        &self,
        observation: &WeatherObservation,
        preferences: Option<&UserPreferences>,
    ) -> Vec<OutfitRecommendation> {
        let style = preferences.map(|p| p.style).unwrap_or_default();
        let effective = Self::effective_temperature(observation, preferences);
        let band = TemperatureBand::classify(effective);

        let mut outfit: BTreeMap<Category, OutfitRecommendation> = BTreeMap::new();
        for slot in band.baseline() {
            let garment = slot.for_style(style);
            outfit.insert(
                slot.category,
                OutfitRecommendation {
                    id: format!("{}-{}", band.slug(), slot.category.as_str()),
                    category: slot.category,
                    item: garment.label.to_string(),
                    icon: garment.icon.to_string(),
                    reason: Some(format!("Feels like {:.0}°C", effective)),
                },
            );
        }

        if observation.condition == WeatherCondition::Rainy {
            outfit.insert(
                Category::Outerwear,
                OutfitRecommendation {
                    id: "rain-outerwear".to_string(),
                    category: Category::Outerwear,
                    item: RAINCOAT.to_string(),
                    icon: RAIN_ICON.to_string(),
                    reason: Some("Rain expected".to_string()),
                },
            );
        } else if observation.wind_speed > WIND_THRESHOLD {
            outfit.insert(
                Category::Outerwear,
                OutfitRecommendation {
                    id: "wind-outerwear".to_string(),
                    category: Category::Outerwear,
                    item: WINDBREAKER.to_string(),
                    icon: WIND_ICON.to_string(),
                    reason: Some(format!("Wind at {:.0} m/s", observation.wind_speed)),
                },
            );
        }

        tracing::debug!(
            band = band.name(),
            effective,
            items = outfit.len(),
            "Generated outfit"
        );

        outfit.into_values().collect()
    }

    /// Advisory strings; empty when no rule applies.
    #[must_use]
    pub fn get_style_suggestions(&self, observation: &WeatherObservation) -> Vec<String> {
        let effective = Self::effective_temperature(observation, None);
        let mut suggestions = Vec::new();

        if effective >= HOT_THRESHOLD {
            suggestions.extend(HOT_ADVICE.iter().map(|s| s.to_string()));
        } else if effective < LAYERING_THRESHOLD {
            suggestions.extend(COLD_ADVICE.iter().map(|s| s.to_string()));
        }

        if observation.humidity > HUMIDITY_THRESHOLD {
            suggestions.extend(HUMID_ADVICE.iter().map(|s| s.to_string()));
        }

        suggestions
    }
}
