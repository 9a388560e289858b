//! Conversation session state machine
//!
//! Once the wake phrase is heard, a session drives a loop of listening,
//! classifying, and dispatching commands until told to sleep or exit.
//! Terminal transitions are returned to the caller; the session never
//! terminates the process itself.

use crate::extract::CityExtractor;
use crate::store::{CityStore, IdentityStore};
use crate::voice::VoiceIo;
use crate::weather::{WeatherService, report};
use crate::Result;

/// Session states
///
/// `ProcessingCities` carries the active city batch, already persisted by
/// the transition that produced it. The terminal states (sleeping/exiting)
/// are expressed as [`SessionOutcome`] instead of states.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Greeting,
    AwaitingSavedCityConsent,
    CollectingCities,
    ProcessingCities(Vec<String>),
    ListeningForCommand,
    Renaming,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Back to the passive wake loop, carrying the possibly renamed identity
    Slept { identity: String },
    /// The user asked to terminate the whole process
    Exit { identity: String },
}

impl SessionOutcome {
    /// The assistant identity as of session end
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::Slept { identity } | Self::Exit { identity } => identity,
        }
    }
}

/// Recognized command classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rename,
    Sleep,
    Exit,
    WeatherQuery,
    Unrecognized,
}

impl Command {
    /// Classify a recognized utterance by keyword containment
    ///
    /// Keywords are checked in priority order; an empty utterance (failed
    /// recognition) classifies as unrecognized.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if text.contains("change name") || text.contains("rename") {
            Self::Rename
        } else if text.contains("go to sleep") || text.contains("sleep") {
            Self::Sleep
        } else if text.contains("exit") || text.contains("quit") {
            Self::Exit
        } else if ["weather", "forecast", "air pollution", "saved cities"]
            .iter()
            .any(|keyword| text.contains(keyword))
        {
            Self::WeatherQuery
        } else {
            Self::Unrecognized
        }
    }
}

/// Either another state or a terminal outcome
enum Step {
    Continue(State),
    Done(SessionOutcome),
}

/// One awakened conversation
pub struct ConversationSession<'a, V, W> {
    voice: &'a mut V,
    weather: &'a W,
    cities: &'a CityStore,
    names: &'a IdentityStore,
    extractor: CityExtractor,
    identity: String,
}

impl<'a, V: VoiceIo, W: WeatherService> ConversationSession<'a, V, W> {
    /// Create a session over injected collaborators
    pub fn new(
        voice: &'a mut V,
        weather: &'a W,
        cities: &'a CityStore,
        names: &'a IdentityStore,
        extractor: CityExtractor,
        identity: String,
    ) -> Self {
        Self {
            voice,
            weather,
            cities,
            names,
            extractor,
            identity,
        }
    }

    /// Drive the state machine until a terminal transition
    ///
    /// # Errors
    ///
    /// Returns error on voice transport loss or store failure; data fetch
    /// failures are recovered per city and never surface here.
    pub async fn run(mut self) -> Result<SessionOutcome> {
        let mut state = State::Greeting;
        loop {
            tracing::debug!(?state, "session state");
            state = match state {
                State::Greeting => self.greet().await?,
                State::AwaitingSavedCityConsent => self.await_consent().await?,
                State::CollectingCities => self.collect_cities().await?,
                State::ProcessingCities(batch) => self.process_cities(&batch).await?,
                State::ListeningForCommand => match self.listen_for_command().await? {
                    Step::Continue(next) => next,
                    Step::Done(outcome) => return Ok(outcome),
                },
                State::Renaming => self.rename().await?,
            };
        }
    }

    async fn greet(&mut self) -> Result<State> {
        let saved = self.cities.load()?;
        if saved.is_empty() {
            self.voice
                .speak("No saved cities found. Please tell me the cities you want to check.")
                .await?;
            return Ok(State::CollectingCities);
        }

        self.voice
            .speak(&format!(
                "I see you have saved cities: {}. Would you like full information \
                 on these cities? Please say yes or no.",
                saved.join(", ")
            ))
            .await?;
        Ok(State::AwaitingSavedCityConsent)
    }

    async fn await_consent(&mut self) -> Result<State> {
        let answer = self
            .voice
            .listen("Listening for your answer.", false)
            .await?;

        if answer.contains("yes") {
            return Ok(State::ProcessingCities(self.cities.load()?));
        }

        self.voice
            .speak("Okay, please tell me the cities you want to check.")
            .await?;
        Ok(State::CollectingCities)
    }

    async fn collect_cities(&mut self) -> Result<State> {
        let input = self
            .voice
            .listen("Listening for city names.", false)
            .await?;

        let batch = self.batch_from_input(&input);
        self.cities.replace_all(&batch)?;
        Ok(State::ProcessingCities(batch))
    }

    /// Extract a city batch from free text, falling back to the raw
    /// trimmed input as a single city name
    fn batch_from_input(&self, input: &str) -> Vec<String> {
        let mut batch = self.extractor.extract(&format!("for {input}"));
        if batch.is_empty() {
            let raw = input.trim();
            if !raw.is_empty() {
                batch.push(raw.to_string());
            }
        }
        batch
    }

    /// Fetch and announce forecast, current weather, and air quality for
    /// each city in turn; one city's failure never aborts the batch
    async fn process_cities(&mut self, batch: &[String]) -> Result<State> {
        for city in batch {
            self.voice
                .speak(&format!("Fetching full information for {city}."))
                .await?;

            match self.weather.forecast(city).await {
                Ok(entries) => {
                    self.voice
                        .speak(&report::forecast_overview(city, &entries))
                        .await?;
                    tracing::info!(%city, "forecast:\n{}", report::forecast_table(&entries));
                }
                Err(e) => {
                    tracing::warn!(%city, error = %e, "forecast fetch failed");
                    self.voice
                        .speak(&format!("Error retrieving forecast data for {city}."))
                        .await?;
                }
            }

            match self.weather.current(city).await {
                Ok(conditions) => {
                    tracing::info!(%city, "current:\n{}", report::current_details(&conditions));
                    self.voice.speak(&report::current_summary(&conditions)).await?;

                    match self.weather.air_quality(conditions.lat, conditions.lon).await {
                        Ok(air) => {
                            self.voice.speak(&report::air_quality_summary(air)).await?;
                        }
                        Err(e) => {
                            tracing::warn!(%city, error = %e, "air quality fetch failed");
                            self.voice
                                .speak("Error retrieving air pollution data.")
                                .await?;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(%city, error = %e, "weather fetch failed");
                    self.voice
                        .speak(&format!("Error retrieving weather data for {city}."))
                        .await?;
                    self.voice.speak("No weather data available.").await?;
                }
            }
        }

        Ok(State::ListeningForCommand)
    }

    async fn listen_for_command(&mut self) -> Result<Step> {
        let command = self
            .voice
            .listen("I'm listening for your command.", false)
            .await?;

        match Command::classify(&command) {
            Command::Rename => Ok(Step::Continue(State::Renaming)),
            Command::Sleep => {
                self.voice
                    .speak("Okay, I'm going to sleep. Wake me up when you need me.")
                    .await?;
                Ok(Step::Done(SessionOutcome::Slept {
                    identity: self.identity.clone(),
                }))
            }
            Command::Exit => {
                self.voice.speak("Goodbye!").await?;
                Ok(Step::Done(SessionOutcome::Exit {
                    identity: self.identity.clone(),
                }))
            }
            Command::WeatherQuery => {
                let mut batch = self.extractor.extract(&command);
                if batch.is_empty() {
                    // Single re-prompt, then the raw input stands in
                    self.voice
                        .speak(
                            "I didn't detect a city name. Please say the city name \
                             or names separated by 'and'.",
                        )
                        .await?;
                    let input = self
                        .voice
                        .listen("Listening for city names.", false)
                        .await?;
                    batch = self.batch_from_input(&input);
                }
                self.cities.replace_all(&batch)?;
                Ok(Step::Continue(State::ProcessingCities(batch)))
            }
            Command::Unrecognized => {
                self.voice
                    .speak("I'm sorry, I didn't understand your command. Please try again.")
                    .await?;
                Ok(Step::Continue(State::ListeningForCommand))
            }
        }
    }

    async fn rename(&mut self) -> Result<State> {
        self.voice.speak("Please say the new name for me.").await?;
        let new_name = self
            .voice
            .listen("Listening for the new name.", false)
            .await?;

        let new_name = new_name.trim().to_lowercase();
        if !new_name.is_empty() {
            self.names.save(&new_name)?;
            self.identity = new_name;
            self.voice
                .speak(&format!("My name has been updated to {}.", self.identity))
                .await?;
        }

        Ok(State::ListeningForCommand)
    }
}
