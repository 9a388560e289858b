//! Saved-city record

use std::io::Write;
use std::path::PathBuf;

use crate::{Error, Result};

/// Durable, ordered, case-insensitively unique list of city names
///
/// There is no delete operation; the list only shrinks when it is replaced
/// wholesale.
#[derive(Debug, Clone)]
pub struct CityStore {
    path: PathBuf,
}

impl CityStore {
    /// Create a store backed by the given file path
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the saved cities, oldest first
    ///
    /// # Errors
    ///
    /// Returns error if the record exists but cannot be read
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Replace the entire list
    ///
    /// Blank entries are dropped and case-insensitive duplicates collapse to
    /// their first occurrence. The write is atomic (temp file + rename).
    ///
    /// # Errors
    ///
    /// Returns error on write failure
    pub fn replace_all(&self, cities: &[String]) -> Result<()> {
        let mut seen: Vec<String> = Vec::new();
        let mut kept: Vec<&str> = Vec::new();
        for city in cities {
            let city = city.trim();
            if city.is_empty() {
                continue;
            }
            let key = city.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            kept.push(city);
        }

        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::Store("city store path has no parent".to_string()))?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        for city in &kept {
            writeln!(file, "{city}")?;
        }
        file.persist(&self.path)
            .map_err(|e| Error::Store(e.to_string()))?;

        tracing::info!(count = kept.len(), "saved city list replaced");
        Ok(())
    }

    /// Append one city unless it is already present (case-insensitive)
    ///
    /// Returns whether the city was added.
    ///
    /// # Errors
    ///
    /// Returns error on read or write failure
    pub fn append_if_absent(&self, city: &str) -> Result<bool> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(false);
        }

        let key = city.to_lowercase();
        let existing = self.load()?;
        if existing.iter().any(|c| c.to_lowercase() == key) {
            return Ok(false);
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{city}")?;

        tracing::info!(%city, "city saved");
        Ok(true)
    }
}
