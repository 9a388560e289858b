//! Weather data services
//!
//! The session and HTTP front end consume the [`WeatherService`] trait; the
//! bundled implementation is an OpenWeatherMap client.

mod owm;
pub mod report;

pub use owm::{DEFAULT_BASE_URL, OwmClient};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Result;

/// Current conditions for one city
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    /// Canonical city name as reported by the provider
    pub city: String,
    /// Short weather description, e.g. "light rain"
    pub description: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub lat: f64,
    pub lon: f64,
}

/// One 3-hour forecast reading
#[derive(Debug, Clone, Serialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temp_c: f64,
    pub humidity_pct: u8,
    pub rain_mm: f64,
    pub snow_mm: f64,
}

/// Air quality index on the provider's 1..=5 scale
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AirQuality {
    pub index: u8,
}

impl AirQuality {
    /// Human-readable label for the index
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.index {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }
}

/// A surrounding town with its temperature, for the map view
#[derive(Debug, Clone, Serialize)]
pub struct NearbyTown {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub temp_c: f64,
}

/// Weather data provider
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Fetch current conditions for a city
    async fn current(&self, city: &str) -> Result<CurrentConditions>;

    /// Fetch the 5-day forecast in 3-hour increments
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>>;

    /// Fetch the air quality index for coordinates
    async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality>;

    /// Fetch surrounding towns with their temperatures
    async fn nearby(&self, lat: f64, lon: f64, count: u32) -> Result<Vec<NearbyTown>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aqi_labels() {
        assert_eq!(AirQuality { index: 1 }.label(), "Good");
        assert_eq!(AirQuality { index: 3 }.label(), "Moderate");
        assert_eq!(AirQuality { index: 5 }.label(), "Very Poor");
        assert_eq!(AirQuality { index: 9 }.label(), "Unknown");
    }
}
