//! Station directory: candidate locations for the home/work slots.

use async_trait::async_trait;
use outfitcast_core::AppError;
use serde::{Deserialize, Serialize};

use crate::types::Coordinates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Prefecture or region label shown next to the name
    pub region: String,
}

impl Station {
    pub fn new(name: &str, latitude: f64, longitude: f64, region: &str) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
            region: region.to_string(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Lookup of stations by partial name.
#[async_trait]
pub trait StationDirectory: Send + Sync {
    /// Stations whose name contains `query`, compared case-sensitively.
    async fn find(&self, query: &str) -> Result<Vec<Station>, AppError>;
}

/// In-memory directory over a fixed list.
#[derive(Debug, Clone)]
pub struct StaticStationDirectory {
    stations: Vec<Station>,
}

impl StaticStationDirectory {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Major stations around Tokyo, Yokohama, Osaka and Kyoto.
    pub fn reference() -> Self {
        Self::new(vec![
            Station::new("Shibuya", 35.6580, 139.7016, "Tokyo"),
            Station::new("Shinjuku", 35.6896, 139.7006, "Tokyo"),
            Station::new("Ikebukuro", 35.7295, 139.7109, "Tokyo"),
            Station::new("Shinagawa", 35.6284, 139.7387, "Tokyo"),
            Station::new("Tokyo", 35.6812, 139.7671, "Tokyo"),
            Station::new("Yokohama", 35.4657, 139.6224, "Kanagawa"),
            Station::new("Osaka", 34.7024, 135.4959, "Osaka"),
            Station::new("Kyoto", 34.9859, 135.7581, "Kyoto"),
        ])
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    fn matching(&self, query: &str) -> Vec<Station> {
        self.stations
            .iter()
            .filter(|s| s.name.contains(query))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StationDirectory for StaticStationDirectory {
    async fn find(&self, query: &str) -> Result<Vec<Station>, AppError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.matching(query))
    }
}
