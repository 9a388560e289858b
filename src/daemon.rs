//! Daemon - the outer wake/sleep cycle
//!
//! Owns the assistant identity, the wake phrase, and the HTTP front end,
//! and launches one conversation session per wake phrase hit.

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::config::Config;
use crate::extract::CityExtractor;
use crate::session::{ConversationSession, SessionOutcome};
use crate::store::{CityStore, IdentityStore, IDENTITY_FILE, SAVED_CITIES_FILE};
use crate::voice::VoiceIo;
use crate::wake::WakePhrase;
use crate::weather::WeatherService;
use crate::Result;

/// The Gale daemon - wake loop plus HTTP front end
pub struct Daemon<V, W> {
    config: Config,
    port: u16,
    voice: V,
    weather: Arc<W>,
    names: IdentityStore,
    cities: CityStore,
}

impl<V: VoiceIo, W: WeatherService + 'static> Daemon<V, W> {
    /// Create a new daemon over injected voice and weather services
    pub fn new(config: Config, port: u16, voice: V, weather: W) -> Self {
        let names = IdentityStore::new(config.data_dir.join(IDENTITY_FILE));
        let cities = CityStore::new(config.data_dir.join(SAVED_CITIES_FILE));

        Self {
            config,
            port,
            voice,
            weather: Arc::new(weather),
            names,
            cities,
        }
    }

    /// Run until the user issues an exit command from within a session
    ///
    /// Returning `Ok(())` means exit was requested; the caller performs the
    /// actual process termination.
    ///
    /// # Errors
    ///
    /// Returns error on voice transport loss or store failure
    pub async fn run(mut self) -> Result<()> {
        let mut identity = self.resolve_identity().await?;
        let mut wake = WakePhrase::for_identity(&identity);
        self.voice
            .speak(&format!("To wake me up, say '{}'.", wake.phrase()))
            .await?;

        if self.config.api_enabled {
            let state = ApiState {
                weather: self.weather.clone(),
                cities: self.cities.clone(),
            };
            let port = self.port;
            tokio::spawn(async move {
                if let Err(e) = api::serve(state, port).await {
                    tracing::error!(error = %e, "api server terminated");
                }
            });
        }

        tracing::info!(wake_phrase = %wake.phrase(), "daemon running");

        loop {
            // Passive listening: failures are silent, no re-prompt
            let heard = self.voice.listen("Listening...", true).await?;
            if !wake.matches(&heard) {
                continue;
            }

            self.voice.speak("Yes?").await?;

            let session = ConversationSession::new(
                &mut self.voice,
                self.weather.as_ref(),
                &self.cities,
                &self.names,
                CityExtractor::new(self.config.extractor.clone()),
                identity.clone(),
            );

            match session.run().await? {
                SessionOutcome::Slept { identity: name } => {
                    identity = name;
                    wake = WakePhrase::for_identity(&identity);
                }
                SessionOutcome::Exit { .. } => {
                    tracing::info!("exit requested, shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Load the stored identity, or initialize and persist the default
    async fn resolve_identity(&mut self) -> Result<String> {
        match self.names.load()? {
            Some(name) => {
                self.voice
                    .speak(&format!("Welcome back. My name is {name}."))
                    .await?;
                Ok(name)
            }
            None => {
                let name = self.config.default_name.trim().to_lowercase();
                self.voice
                    .speak(&format!("I don't have a name yet. I'll call myself {name}."))
                    .await?;
                self.names.save(&name)?;
                Ok(name)
            }
        }
    }
}
