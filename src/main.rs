use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gale_assistant::extract::{CityExtractor, ExtractorConfig, KeywordPriority};
use gale_assistant::store::{CityStore, SAVED_CITIES_FILE};
use gale_assistant::weather::{report, OwmClient, WeatherService};
use gale_assistant::{Config, ConsoleVoice, Daemon};

/// Gale - voice- and web-driven weather assistant
#[derive(Parser)]
#[command(name = "gale", version, about)]
struct Cli {
    /// Port for the HTTP front end
    #[arg(long, env = "GALE_PORT", default_value = "18990")]
    port: u16,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable the HTTP front end
    #[arg(long, env = "GALE_DISABLE_API")]
    disable_api: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch current weather for a city
    Weather { city: String },
    /// Fetch the 5-day forecast for a city
    Forecast { city: String },
    /// Fetch air quality for a city
    Air { city: String },
    /// List surrounding towns with temperatures
    Nearby {
        city: String,
        /// Number of towns to fetch
        #[arg(short, long, default_value = "10")]
        count: u32,
    },
    /// Show the saved city list
    Saved,
    /// Show what the city extractor makes of a phrase
    Extract {
        /// Phrase to parse, e.g. "weather for Paris and Tokyo"
        text: String,
        /// Search "in" before "for"
        #[arg(long)]
        in_first: bool,
        /// Cap the number of extracted cities (0 = unbounded)
        #[arg(long, default_value = "2")]
        max_cities: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,gale_assistant=info",
        1 => "info,gale_assistant=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Weather { city } => cmd_weather(&city).await,
            Command::Forecast { city } => cmd_forecast(&city).await,
            Command::Air { city } => cmd_air(&city).await,
            Command::Nearby { city, count } => cmd_nearby(&city, count).await,
            Command::Saved => cmd_saved(),
            Command::Extract {
                text,
                in_first,
                max_cities,
            } => cmd_extract(&text, in_first, max_cities),
        };
    }

    tracing::info!(port = cli.port, disable_api = cli.disable_api, "starting gale");

    let config = Config::load_with_options(cli.disable_api)?;
    let weather = weather_client(&config)?;
    let daemon = Daemon::new(config, cli.port, ConsoleVoice::new(), weather);

    tracing::info!("gale ready");
    daemon.run().await?;

    // The daemon only returns once a session requested exit
    Ok(())
}

/// Build the weather client, requiring a configured API key
fn weather_client(config: &Config) -> anyhow::Result<OwmClient> {
    let api_key = config.weather.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("no weather API key configured; set OWM_API_KEY")
    })?;
    Ok(OwmClient::new(&config.weather.base_url, api_key)?)
}

/// Open the saved-city store for one-shot commands
fn city_store(config: &Config) -> CityStore {
    CityStore::new(config.data_dir.join(SAVED_CITIES_FILE))
}

async fn cmd_weather(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let weather = weather_client(&config)?;

    let conditions = weather.current(city).await?;
    city_store(&config).append_if_absent(&conditions.city)?;

    println!("--- Current Weather ---");
    println!("{}", report::current_details(&conditions));
    Ok(())
}

async fn cmd_forecast(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let weather = weather_client(&config)?;

    let entries = weather.forecast(city).await?;
    city_store(&config).append_if_absent(city)?;

    println!("--- Forecast for {city} ---");
    println!("{}", report::forecast_table(&entries));
    Ok(())
}

async fn cmd_air(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let weather = weather_client(&config)?;

    let conditions = weather.current(city).await?;
    let air = weather.air_quality(conditions.lat, conditions.lon).await?;
    city_store(&config).append_if_absent(&conditions.city)?;

    println!("--- Air Quality for {} ---", conditions.city);
    println!("{}", report::air_quality_summary(air));
    Ok(())
}

async fn cmd_nearby(city: &str, count: u32) -> anyhow::Result<()> {
    let config = Config::load()?;
    let weather = weather_client(&config)?;

    let conditions = weather.current(city).await?;
    let towns = weather.nearby(conditions.lat, conditions.lon, count).await?;

    println!("--- Towns near {} ---", conditions.city);
    for town in towns {
        println!("{}: {:.1}°C (lat {}, lon {})", town.name, town.temp_c, town.lat, town.lon);
    }
    Ok(())
}

fn cmd_saved() -> anyhow::Result<()> {
    let config = Config::load()?;
    let cities = city_store(&config).load()?;

    if cities.is_empty() {
        println!("No saved cities.");
    } else {
        for city in cities {
            println!("{city}");
        }
    }
    Ok(())
}

fn cmd_extract(text: &str, in_first: bool, max_cities: usize) -> anyhow::Result<()> {
    let extractor = CityExtractor::new(ExtractorConfig {
        keyword_priority: if in_first {
            KeywordPriority::InFirst
        } else {
            KeywordPriority::ForFirst
        },
        max_cities: if max_cities == 0 { None } else { Some(max_cities) },
    });

    let cities = extractor.extract(text);
    if cities.is_empty() {
        println!("(no cities detected)");
    } else {
        for city in cities {
            println!("{city}");
        }
    }
    Ok(())
}
