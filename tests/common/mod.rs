//! Shared test doubles
//!
//! `ScriptedVoice` replays a fixed list of utterances and records what was
//! spoken; `MockWeather` serves canned data and records every request.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use gale_assistant::weather::{
    AirQuality, CurrentConditions, ForecastEntry, NearbyTown, WeatherService,
};
use gale_assistant::{Error, Result, VoiceIo};

/// Voice I/O that replays scripted replies
pub struct ScriptedVoice {
    replies: VecDeque<String>,
    /// Everything the assistant spoke, in order
    pub spoken: Vec<String>,
}

impl ScriptedVoice {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| (*r).to_string()).collect(),
            spoken: Vec::new(),
        }
    }

    /// True if some spoken line contains `needle`
    pub fn said(&self, needle: &str) -> bool {
        self.spoken.iter().any(|line| line.contains(needle))
    }
}

#[async_trait]
impl VoiceIo for ScriptedVoice {
    async fn speak(&mut self, text: &str) -> Result<()> {
        self.spoken.push(text.to_string());
        Ok(())
    }

    async fn listen(&mut self, _prompt: &str, _silent: bool) -> Result<String> {
        // An exhausted script is a test bug; fail loudly instead of looping
        self.replies
            .pop_front()
            .ok_or_else(|| Error::Voice("script exhausted".to_string()))
    }
}

/// Weather service with canned responses and a request log
pub struct MockWeather {
    failing: HashSet<String>,
    pub requests: Mutex<Vec<String>>,
}

impl MockWeather {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make every lookup for `city` fail
    pub fn failing_for(cities: &[&str]) -> Self {
        Self {
            failing: cities.iter().map(|c| (*c).to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.requests.lock().unwrap().push(entry);
    }

    fn check(&self, city: &str) -> Result<()> {
        if self.failing.contains(city) {
            return Err(Error::Weather(format!("no data for {city}")));
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherService for MockWeather {
    async fn current(&self, city: &str) -> Result<CurrentConditions> {
        self.record(format!("current:{city}"));
        self.check(city)?;
        Ok(CurrentConditions {
            city: city.to_string(),
            description: "clear sky".to_string(),
            temp_c: 20.0,
            feels_like_c: 19.0,
            humidity_pct: 50,
            wind_speed_ms: 3.0,
            lat: 10.0,
            lon: 20.0,
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>> {
        self.record(format!("forecast:{city}"));
        self.check(city)?;
        Ok(vec![
            ForecastEntry {
                timestamp: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
                temp_c: 18.0,
                humidity_pct: 60,
                rain_mm: 0.0,
                snow_mm: 0.0,
            },
            ForecastEntry {
                timestamp: chrono::DateTime::from_timestamp(1_700_010_800, 0).unwrap(),
                temp_c: 21.0,
                humidity_pct: 55,
                rain_mm: 0.4,
                snow_mm: 0.0,
            },
        ])
    }

    async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality> {
        self.record(format!("air:{lat},{lon}"));
        Ok(AirQuality { index: 2 })
    }

    async fn nearby(&self, lat: f64, lon: f64, count: u32) -> Result<Vec<NearbyTown>> {
        self.record(format!("nearby:{lat},{lon},{count}"));
        Ok(vec![NearbyTown {
            name: "Nearville".to_string(),
            lat: lat + 0.1,
            lon: lon + 0.1,
            temp_c: 19.0,
        }])
    }
}
