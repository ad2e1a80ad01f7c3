use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use std::{fmt, time::Duration};
use weather_lookup_core::{
    Config, ConditionTranslator, LocationFix, LocationSuggestion, RequestState,
    SessionOrchestrator, TemperatureUnit, WeatherSnapshot, client_from_config,
};

use crate::render::render_snapshot;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Weather lookup client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and display preferences.
    Configure,

    /// Show weather for a place name or for coordinates.
    Show {
        /// City or place name, e.g. "Paris, France".
        #[arg(required_unless_present = "lat")]
        location: Option<String>,

        /// Latitude of a device location fix.
        #[arg(long, requires = "lon", conflicts_with = "location", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of a device location fix.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// List place-name suggestions for a prefix.
    Search {
        prefix: String,
    },

    /// Type a prefix, pick a suggestion, read the weather, repeat.
    Interactive {
        #[command(flatten)]
        display: DisplayArgs,
    },
}

#[derive(Debug, clap::Args)]
pub struct DisplayArgs {
    /// Temperature unit: celsius, fahrenheit, kelvin or reaumur.
    #[arg(long, short)]
    unit: Option<TemperatureUnit>,

    /// Days of forecast to request (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=14))]
    days: Option<u8>,
}

/// Everything a command needs to talk to the service and print results.
struct Session {
    orchestrator: SessionOrchestrator,
    unit: TemperatureUnit,
    translator: ConditionTranslator,
    suggestion_wait: Duration,
}

impl Session {
    fn open(config: &Config, display: Option<&DisplayArgs>) -> anyhow::Result<Self> {
        let client = client_from_config(config)?;
        let days = display.and_then(|d| d.days).unwrap_or(config.forecast_days);
        let policy = config.suggestion_policy();

        Ok(Self {
            orchestrator: SessionOrchestrator::new(client, Some(days), policy),
            unit: display.and_then(|d| d.unit).unwrap_or(config.unit),
            translator: ConditionTranslator::new(&config.locale),
            suggestion_wait: policy.debounce + config.request_timeout() + Duration::from_secs(1),
        })
    }

    /// Wait for the current lookup to settle. A failed lookup becomes an error
    /// carrying the user-facing message.
    async fn settle(&self) -> anyhow::Result<WeatherSnapshot> {
        let mut rx = self.orchestrator.subscribe();
        let state = rx
            .wait_for(|s| !s.is_loading())
            .await
            .context("Weather session closed unexpectedly")?
            .clone();

        match state {
            RequestState::Success(snapshot) => Ok(snapshot),
            RequestState::Error(message) => Err(anyhow!(message)),
            RequestState::Idle | RequestState::Loading => Err(anyhow!("The lookup was cancelled.")),
        }
    }

    fn print(&self, snapshot: &WeatherSnapshot) {
        print!("{}", render_snapshot(snapshot, self.unit, &self.translator));
    }

    /// Type `prefix` into the search field and wait for the suggestion list.
    async fn suggest(&self, prefix: &str) -> Vec<LocationSuggestion> {
        let mut rx = self.orchestrator.subscribe_suggestions();
        rx.borrow_and_update();

        self.orchestrator.pick_suggestion_query(prefix);
        if prefix.trim().chars().count() < self.orchestrator.suggestion_policy().min_chars {
            return Vec::new();
        }

        match tokio::time::timeout(self.suggestion_wait, rx.changed()).await {
            Ok(Ok(())) => rx.borrow_and_update().clone(),
            _ => {
                tracing::debug!(prefix, "no suggestions arrived in time");
                Vec::new()
            }
        }
    }
}

enum Choice {
    Suggestion(LocationSuggestion),
    AsTyped(String),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Suggestion(s) => f.write_str(&s.display_text()),
            Choice::AsTyped(text) => write!(f, "Search \"{text}\" as typed"),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { location, lat, lon, display } => {
                let session = Session::open(&config, Some(&display))?;
                let dispatched = match (location, lat, lon) {
                    (_, Some(lat), Some(lon)) => {
                        session.orchestrator.on_location_result(LocationFix::Fix { lat, lon })
                    }
                    (Some(location), _, _) => session.orchestrator.submit(&location),
                    _ => None,
                };

                if dispatched.is_none() {
                    return Err(anyhow!("Nothing to look up: the location is empty."));
                }
                let snapshot = session.settle().await?;
                session.print(&snapshot);
                Ok(())
            }
            Command::Search { prefix } => {
                let session = Session::open(&config, None)?;
                let suggestions = session.suggest(&prefix).await;
                if suggestions.is_empty() {
                    println!("No suggestions for \"{prefix}\".");
                }
                for s in suggestions {
                    println!("{}  ({:.2}, {:.2})", s.display_text(), s.lat, s.lon);
                }
                Ok(())
            }
            Command::Interactive { display } => {
                let session = Session::open(&config, Some(&display))?;
                interactive(&session).await
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_help_message("Get one at https://www.weatherapi.com/my/")
        .prompt()?;
    config.set_api_key(api_key);

    config.locale = Text::new("Locale for condition names:")
        .with_default(&config.locale)
        .with_help_message("\"id\" translates conditions to Indonesian; anything else keeps English")
        .prompt()?;

    let units = TemperatureUnit::all().to_vec();
    let start = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Temperature unit:", units).with_starting_cursor(start).prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn interactive(session: &Session) -> anyhow::Result<()> {
    loop {
        let prefix = Text::new("Where?").with_help_message("Empty input quits").prompt()?;
        if prefix.trim().is_empty() {
            return Ok(());
        }

        let mut choices: Vec<Choice> =
            session.suggest(&prefix).await.into_iter().map(Choice::Suggestion).collect();
        choices.push(Choice::AsTyped(prefix.trim().to_string()));

        let picked = if choices.len() == 1 {
            choices.remove(0)
        } else {
            Select::new("Pick a place:", choices).prompt()?
        };

        match picked {
            Choice::Suggestion(s) => session.orchestrator.select_suggestion(&s),
            Choice::AsTyped(text) => session.orchestrator.submit(&text),
        };
        match session.settle().await {
            Ok(snapshot) => session.print(&snapshot),
            Err(err) => eprintln!("{err}"),
        }

        if !Confirm::new("Look up another place?").with_default(true).prompt()? {
            return Ok(());
        }
        session.orchestrator.reset();
    }
}
