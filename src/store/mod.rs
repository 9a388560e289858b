//! Durable storage for the assistant identity and saved cities
//!
//! Both records are plain newline-delimited text files under the data
//! directory. Whole-file writes go through a temp file and rename; single
//! additions use one atomic append, so concurrent HTTP handlers cannot
//! interleave partial lines.

mod cities;
mod identity;

pub use cities::CityStore;
pub use identity::IdentityStore;

/// File name of the assistant identity record
pub const IDENTITY_FILE: &str = "identity.txt";

/// File name of the saved-city record
pub const SAVED_CITIES_FILE: &str = "saved_cities.txt";
