//! Assistant identity record

use std::io::Write;
use std::path::PathBuf;

use crate::{Error, Result};

/// Durable store for the assistant's name
///
/// The stored name is always non-empty and lowercase.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    /// Create a store backed by the given file path
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the saved identity, or `None` if no record exists yet
    ///
    /// # Errors
    ///
    /// Returns error if the record exists but cannot be read
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let name = std::fs::read_to_string(&self.path)?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        Ok(Some(name.to_lowercase()))
    }

    /// Persist a new identity, normalized to lowercase and trimmed
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty after trimming, or on write failure
    pub fn save(&self, name: &str) -> Result<()> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(Error::Store("identity must not be empty".to_string()));
        }

        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::Store("identity path has no parent".to_string()))?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        writeln!(file, "{name}")?;
        file.persist(&self.path)
            .map_err(|e| Error::Store(e.to_string()))?;

        tracing::info!(%name, "identity saved");
        Ok(())
    }
}
