//! Configuration management for the Gale assistant

use std::path::PathBuf;

use serde::Deserialize;

use crate::extract::ExtractorConfig;
use crate::{Error, Result};

/// Name the assistant gives itself on first run
pub const DEFAULT_NAME: &str = "josh";

/// Optional configuration file inside the data directory
const CONFIG_FILE: &str = "assistant.toml";

/// Gale assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the data directory (identity and saved-city records)
    pub data_dir: PathBuf,

    /// Identity used when no record exists yet
    pub default_name: String,

    /// City extraction configuration
    pub extractor: ExtractorConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Whether the HTTP front end is served
    pub api_enabled: bool,
}

/// Weather provider configuration
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API base URL (`GALE_WEATHER_URL`)
    pub base_url: String,

    /// API key (`OWM_API_KEY`)
    pub api_key: Option<String>,
}

/// Settings readable from `assistant.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    default_name: Option<String>,
    extractor: Option<ExtractorConfig>,
}

impl Config {
    /// Load configuration from the environment and the optional config file
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be parsed
    pub fn load() -> Result<Self> {
        Self::load_with_options(false)
    }

    /// Load configuration with an explicit HTTP front-end disable option
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be parsed
    pub fn load_with_options(disable_api: bool) -> Result<Self> {
        let data_dir = data_dir();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| Error::Config(format!("cannot create data dir: {e}")))?;

        let file = load_file_config(&data_dir)?;

        // TOML has no way to spell "unbounded"; zero means no cap
        let mut extractor = file.extractor.unwrap_or_default();
        if extractor.max_cities == Some(0) {
            extractor.max_cities = None;
        }

        let weather = WeatherConfig {
            base_url: std::env::var("GALE_WEATHER_URL")
                .unwrap_or_else(|_| crate::weather::DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("OWM_API_KEY").ok(),
        };

        if disable_api {
            tracing::info!("HTTP front end explicitly disabled");
        }

        Ok(Self {
            data_dir,
            default_name: file
                .default_name
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            extractor,
            weather,
            api_enabled: !disable_api,
        })
    }
}

/// Resolve the data directory (`GALE_DATA_DIR` overrides the platform dir)
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GALE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("dev", "gale", "gale")
        .map_or_else(|| PathBuf::from(".gale"), |d| d.data_dir().to_path_buf())
}

fn load_file_config(data_dir: &std::path::Path) -> Result<FileConfig> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), "loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::KeywordPriority;

    #[test]
    fn test_file_config_parsing() {
        let config: FileConfig = toml::from_str(
            r#"
            default_name = "aria"

            [extractor]
            keyword_priority = "in-first"
            max_cities = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.default_name.as_deref(), Some("aria"));
        let extractor = config.extractor.unwrap();
        assert_eq!(extractor.keyword_priority, KeywordPriority::InFirst);
        assert_eq!(extractor.max_cities, Some(4));
    }

    #[test]
    fn test_empty_file_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.default_name.is_none());
        assert!(config.extractor.is_none());
    }
}
