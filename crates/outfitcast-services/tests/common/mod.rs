//! Deterministic weather provider for service tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use outfitcast_core::AppError;
use outfitcast_weather::{validate_city_name, WeatherCondition, WeatherObservation, WeatherProvider};
use parking_lot::Mutex;

/// Canned response: optional delay, then a temperature or an error.
pub struct Step {
    pub delay: Duration,
    pub result: Result<f64, AppError>,
}

/// Replays queued steps in call order. When the queue is empty every call
/// answers 20°C immediately.
#[derive(Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, delay_ms: u64, temperature: f64) {
        self.steps.lock().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            result: Ok(temperature),
        });
    }

    pub fn push_err(&self, delay_ms: u64, error: AppError) {
        self.steps.lock().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            result: Err(error),
        });
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, station: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == station).count()
    }
}

#[async_trait]
impl WeatherProvider for ScriptedProvider {
    async fn get_current_weather(&self, lat: f64, lon: f64) -> Result<WeatherObservation, AppError> {
        self.get_weather_by_city(&format!("{:.4}, {:.4}", lat, lon)).await
    }

    async fn get_weather_by_city(&self, name: &str) -> Result<WeatherObservation, AppError> {
        let name = validate_city_name(name)?;
        self.calls.lock().push(name.to_string());

        let step = self.steps.lock().pop_front().unwrap_or(Step {
            delay: Duration::ZERO,
            result: Ok(20.0),
        });
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }

        step.result.map(|temperature| {
            WeatherObservation::new(name, temperature, WeatherCondition::Cloudy)
                .with_humidity(50.0)
                .with_wind_speed(3.0)
        })
    }
}
