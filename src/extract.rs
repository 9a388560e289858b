//! City-name extraction from free text
//!
//! A deliberately simple heuristic: find a locating keyword, take the tail,
//! substitute commas, split on " and ". City names that themselves contain
//! "and", "for", or "in" will be mis-split; that is accepted behavior.

use serde::Deserialize;

/// Cap applied to spoken commands (the web front end runs uncapped)
pub const SPOKEN_CITY_CAP: usize = 2;

/// Which locating keyword is searched first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordPriority {
    /// Try `"for"` first, then `"in"` (spoken-command behavior)
    #[default]
    ForFirst,
    /// Try `"in"` first, then `"for"` (web front-end behavior)
    InFirst,
}

impl KeywordPriority {
    /// Keywords in search order
    #[must_use]
    pub const fn keywords(self) -> [&'static str; 2] {
        match self {
            Self::ForFirst => ["for", "in"],
            Self::InFirst => ["in", "for"],
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Keyword search order
    pub keyword_priority: KeywordPriority,

    /// Maximum number of cities returned; `None` means unbounded
    pub max_cities: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            keyword_priority: KeywordPriority::ForFirst,
            max_cities: Some(SPOKEN_CITY_CAP),
        }
    }
}

/// Extracts city names from recognized speech
#[derive(Debug, Clone, Default)]
pub struct CityExtractor {
    config: ExtractorConfig,
}

impl CityExtractor {
    /// Create an extractor with the given configuration
    #[must_use]
    pub const fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract an ordered list of trimmed city names from `text`
    ///
    /// The tail after the first occurrence of the first matching keyword is
    /// split into names. Returns an empty list when no keyword is present
    /// or the tail is blank.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let tail = self.locate_tail(text).trim();
        if tail.is_empty() {
            return Vec::new();
        }

        let mut cities: Vec<String> = tail
            .replace(',', " and ")
            .split(" and ")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string)
            .collect();

        if let Some(cap) = self.config.max_cities {
            cities.truncate(cap);
        }

        tracing::debug!(?cities, "extracted city names");
        cities
    }

    /// Substring following the first occurrence of the highest-priority
    /// keyword found, or the empty string
    fn locate_tail<'t>(&self, text: &'t str) -> &'t str {
        for keyword in self.config.keyword_priority.keywords() {
            if let Some(index) = text.find(keyword) {
                return &text[index + keyword.len()..];
            }
        }
        ""
    }
}
