//! OpenWeatherMap client (data/2.5 API)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{AirQuality, CurrentConditions, ForecastEntry, NearbyTown, WeatherService};
use crate::{Error, Result};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
}

/// Response from the `weather` endpoint
#[derive(Deserialize)]
struct WeatherResponse {
    name: String,
    coord: Coord,
    main: MainBlock,
    wind: Wind,
    weather: Vec<Condition>,
}

/// Response from the `forecast` endpoint
#[derive(Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastItem>,
}

#[derive(Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ForecastMain,
    #[serde(default)]
    rain: Option<Precipitation>,
    #[serde(default)]
    snow: Option<Precipitation>,
}

#[derive(Deserialize)]
struct ForecastMain {
    temp: f64,
    humidity: u8,
}

#[derive(Deserialize, Default)]
struct Precipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

/// Response from the `air_pollution` endpoint
#[derive(Deserialize)]
struct AirResponse {
    list: Vec<AirItem>,
}

#[derive(Deserialize)]
struct AirItem {
    main: AirMain,
}

#[derive(Deserialize)]
struct AirMain {
    aqi: u8,
}

/// Response from the `find` endpoint
#[derive(Deserialize)]
struct FindResponse {
    list: Vec<FindItem>,
}

#[derive(Deserialize)]
struct FindItem {
    name: String,
    coord: Coord,
    main: FindMain,
}

#[derive(Deserialize)]
struct FindMain {
    temp: f64,
}

/// OpenWeatherMap API client
pub struct OwmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OwmClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenWeatherMap API key required".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &str) -> Result<T> {
        let url = format!(
            "{}/{path}?{query}&appid={}",
            self.base_url, self.api_key
        );

        tracing::debug!(%path, "weather API request");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %path, body = %body, "weather API error");
            return Err(Error::Weather(format!(
                "weather API error {status}: {body}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl WeatherService for OwmClient {
    async fn current(&self, city: &str) -> Result<CurrentConditions> {
        let query = format!("q={}&units=metric", urlencoding::encode(city));
        let data: WeatherResponse = self.get_json("weather", &query).await?;

        let description = data
            .weather
            .first()
            .map(|c| c.description.clone())
            .unwrap_or_default();

        tracing::info!(city = %data.name, temp_c = data.main.temp, "fetched current weather");

        Ok(CurrentConditions {
            city: data.name,
            description,
            temp_c: data.main.temp,
            feels_like_c: data.main.feels_like,
            humidity_pct: data.main.humidity,
            wind_speed_ms: data.wind.speed,
            lat: data.coord.lat,
            lon: data.coord.lon,
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>> {
        let query = format!("q={}&units=metric", urlencoding::encode(city));
        let data: ForecastResponse = self.get_json("forecast", &query).await?;

        tracing::info!(%city, readings = data.list.len(), "fetched forecast");

        Ok(data
            .list
            .into_iter()
            .map(|item| ForecastEntry {
                timestamp: DateTime::<Utc>::from_timestamp(item.dt, 0).unwrap_or_default(),
                temp_c: item.main.temp,
                humidity_pct: item.main.humidity,
                rain_mm: item.rain.unwrap_or_default().three_hour,
                snow_mm: item.snow.unwrap_or_default().three_hour,
            })
            .collect())
    }

    async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality> {
        let query = format!("lat={lat}&lon={lon}");
        let data: AirResponse = self.get_json("air_pollution", &query).await?;

        let index = data
            .list
            .first()
            .map(|item| item.main.aqi)
            .ok_or_else(|| Error::Weather("empty air pollution response".to_string()))?;

        tracing::info!(lat, lon, aqi = index, "fetched air quality");
        Ok(AirQuality { index })
    }

    async fn nearby(&self, lat: f64, lon: f64, count: u32) -> Result<Vec<NearbyTown>> {
        let query = format!("lat={lat}&lon={lon}&cnt={count}&units=metric");
        let data: FindResponse = self.get_json("find", &query).await?;

        Ok(data
            .list
            .into_iter()
            .map(|item| NearbyTown {
                name: item.name,
                lat: item.coord.lat,
                lon: item.coord.lon,
                temp_c: item.main.temp,
            })
            .collect())
    }
}
