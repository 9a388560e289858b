//! Voice input/output abstraction
//!
//! The session and daemon talk to a [`VoiceIo`] service injected at process
//! start. The bundled implementation is line-oriented console I/O; speech
//! engines plug in behind the same trait.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{Error, Result};

/// How long a single listen operation waits for input before giving up
pub const LISTEN_WINDOW: Duration = Duration::from_secs(10);

/// Speak/listen capability pair
///
/// `listen` returns the recognized text lowercased and trimmed, or an empty
/// string when nothing was recognized inside the listen window. Errors are
/// reserved for transport loss (e.g. the input stream closing).
#[async_trait]
pub trait VoiceIo: Send {
    /// Speak (or display) a line of text
    async fn speak(&mut self, text: &str) -> Result<()>;

    /// Listen for one utterance
    ///
    /// When `silent` is false the prompt is spoken first; a silent listen
    /// produces no output at all (used by the passive wake loop).
    ///
    /// # Errors
    ///
    /// Returns an error only when the underlying input transport is gone.
    async fn listen(&mut self, prompt: &str, silent: bool) -> Result<String>;
}

/// Console-backed voice I/O: speaks by printing, listens by reading a line
pub struct ConsoleVoice {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleVoice {
    /// Create console voice I/O over stdin/stdout
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for ConsoleVoice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceIo for ConsoleVoice {
    async fn speak(&mut self, text: &str) -> Result<()> {
        tracing::debug!(text, "speak");
        println!("{text}");
        Ok(())
    }

    async fn listen(&mut self, prompt: &str, silent: bool) -> Result<String> {
        if silent {
            tracing::trace!("listening (silent)");
        } else {
            self.speak(prompt).await?;
        }

        match tokio::time::timeout(LISTEN_WINDOW, self.lines.next_line()).await {
            // Listen window elapsed: recognition failure, not an error
            Err(_) => Ok(String::new()),
            Ok(Ok(Some(line))) => {
                let heard = line.trim().to_lowercase();
                if !heard.is_empty() {
                    tracing::debug!(%heard, "recognized");
                }
                Ok(heard)
            }
            Ok(Ok(None)) => Err(Error::Voice("input stream closed".to_string())),
            Ok(Err(e)) => Err(Error::Io(e)),
        }
    }
}
