//! Core library for the `weather-lookup` client.
//!
//! This crate defines:
//! - The weather service contract and its WeatherAPI.com implementation
//! - The request state machine and the session that drives it from user actions
//! - Debounced, cancelable place-name autocomplete
//! - Temperature conversion and condition translation
//! - Configuration & credentials handling
//!
//! It is used by `weather-lookup-cli`, but any front end can drive a
//! [`SessionOrchestrator`] and render from its watch receivers.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod state;
pub mod suggestions;
pub mod translate;
pub mod units;

pub use config::Config;
pub use error::FetchError;
pub use model::{Condition, CurrentConditions, ForecastDay, Location, LocationSuggestion, WeatherSnapshot};
pub use provider::{WeatherApiClient, WeatherClient, client_from_config};
pub use session::{LocationFix, SessionOrchestrator, WeatherState};
pub use state::RequestState;
pub use suggestions::{SearchSuggestionController, SuggestionPolicy};
pub use translate::ConditionTranslator;
pub use units::TemperatureUnit;
