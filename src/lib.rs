//! Gale - voice- and web-driven weather assistant
//!
//! This library provides the core functionality for the Gale assistant:
//! - Wake phrase detection and the outer wake/sleep cycle
//! - The conversation session state machine
//! - City-name extraction from free text
//! - Weather, forecast, and air-quality lookups
//! - Durable identity and saved-city storage
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Interfaces                        │
//! │        Voice (console)   │   HTTP API (axum)        │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Gale Daemon                         │
//! │  Wake Phrase │ Session │ Extractor │ Saved Cities   │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │             OpenWeatherMap (data/2.5)                │
//! │   weather │ forecast │ air_pollution │ find         │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod daemon;
pub mod error;
pub mod extract;
pub mod session;
pub mod store;
pub mod voice;
pub mod wake;
pub mod weather;

pub use config::Config;
pub use daemon::Daemon;
pub use error::{Error, Result};
pub use extract::{CityExtractor, ExtractorConfig, KeywordPriority};
pub use session::{Command, ConversationSession, SessionOutcome};
pub use store::{CityStore, IdentityStore};
pub use voice::{ConsoleVoice, VoiceIo};
pub use wake::WakePhrase;
pub use weather::{
    AirQuality, CurrentConditions, ForecastEntry, NearbyTown, OwmClient, WeatherService,
};
