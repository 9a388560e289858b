//! Wake phrase detection
//!
//! The wake phrase is a fixed template over the assistant's current
//! identity; it is recomputed whenever a session renames the assistant.

/// Matches the wake phrase in recognized transcripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakePhrase {
    phrase: String,
}

impl WakePhrase {
    /// Build the wake phrase for an assistant identity
    #[must_use]
    pub fn for_identity(identity: &str) -> Self {
        let phrase = format!("hey {}", identity.trim().to_lowercase());
        tracing::debug!(%phrase, "wake phrase set");
        Self { phrase }
    }

    /// The full phrase, e.g. "hey josh"
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Check whether a transcript contains the wake phrase
    #[must_use]
    pub fn matches(&self, transcript: &str) -> bool {
        let hit = transcript.to_lowercase().contains(&self.phrase);
        if hit {
            tracing::info!(transcript, phrase = %self.phrase, "wake phrase detected");
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_template() {
        let wake = WakePhrase::for_identity("josh");
        assert_eq!(wake.phrase(), "hey josh");
    }

    #[test]
    fn test_identity_is_normalized() {
        let wake = WakePhrase::for_identity("  Aria ");
        assert_eq!(wake.phrase(), "hey aria");
    }

    #[test]
    fn test_substring_containment() {
        let wake = WakePhrase::for_identity("josh");
        assert!(wake.matches("hey josh, are you there"));
        assert!(wake.matches("HEY JOSH"));
        assert!(!wake.matches("hello josh"));
        assert!(!wake.matches(""));
    }
}
