use crate::{Config, FetchError, LocationSuggestion, WeatherSnapshot};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;

/// Remote weather service as seen by the session core.
///
/// Implementations never panic or leak transport errors: every failure is a
/// [`FetchError`]. No retries happen at this layer.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Current conditions for `query`, plus `forecast_days` of forecast when given.
    ///
    /// `query` is a place name or `"<lat>,<lon>"`.
    async fn fetch_weather(
        &self,
        query: &str,
        forecast_days: Option<u8>,
    ) -> Result<WeatherSnapshot, FetchError>;

    /// Ordered place-name suggestions for `prefix`.
    async fn search_suggestions(&self, prefix: &str) -> Result<Vec<LocationSuggestion>, FetchError>;
}

/// Construct the WeatherAPI.com client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherClient>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `weather-lookup configure` and enter your WeatherAPI.com key."
        )
    })?;

    let client = WeatherApiClient::with_options(
        api_key.to_owned(),
        &config.base_url,
        config.request_timeout(),
    )?;

    Ok(Arc::new(client))
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::model::{Condition, CurrentConditions, Location};
    use std::{collections::HashMap, sync::Mutex, time::Duration};

    /// Scripted [`WeatherClient`] for tests: per-query delay and outcome.
    #[derive(Debug, Default)]
    pub struct FakeWeatherClient {
        weather: Mutex<HashMap<String, (Duration, Result<WeatherSnapshot, FetchError>)>>,
        suggestions: Mutex<HashMap<String, (Duration, Result<Vec<LocationSuggestion>, FetchError>)>>,
        weather_calls: Mutex<Vec<String>>,
        search_calls: Mutex<Vec<String>>,
    }

    impl FakeWeatherClient {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn on_weather(
            &self,
            query: &str,
            delay: Duration,
            outcome: Result<WeatherSnapshot, FetchError>,
        ) {
            self.weather.lock().unwrap().insert(query.to_string(), (delay, outcome));
        }

        pub fn on_search(
            &self,
            prefix: &str,
            delay: Duration,
            outcome: Result<Vec<LocationSuggestion>, FetchError>,
        ) {
            self.suggestions.lock().unwrap().insert(prefix.to_string(), (delay, outcome));
        }

        pub fn weather_calls(&self) -> Vec<String> {
            self.weather_calls.lock().unwrap().clone()
        }

        pub fn search_calls(&self) -> Vec<String> {
            self.search_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherClient for FakeWeatherClient {
        async fn fetch_weather(
            &self,
            query: &str,
            _forecast_days: Option<u8>,
        ) -> Result<WeatherSnapshot, FetchError> {
            self.weather_calls.lock().unwrap().push(query.to_string());
            let scripted = self.weather.lock().unwrap().get(query).cloned();
            let (delay, outcome) = scripted.unwrap_or((Duration::ZERO, Err(FetchError::NotFound)));
            tokio::time::sleep(delay).await;
            outcome
        }

        async fn search_suggestions(
            &self,
            prefix: &str,
        ) -> Result<Vec<LocationSuggestion>, FetchError> {
            self.search_calls.lock().unwrap().push(prefix.to_string());
            let scripted = self.suggestions.lock().unwrap().get(prefix).cloned();
            let (delay, outcome) = scripted.unwrap_or((Duration::ZERO, Ok(Vec::new())));
            tokio::time::sleep(delay).await;
            outcome
        }
    }

    pub fn snapshot(city: &str, temperature_c: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location {
                name: city.to_string(),
                region: String::new(),
                country: "Testland".to_string(),
                local_time: "2024-05-01 12:00".to_string(),
            },
            current: CurrentConditions {
                temperature_c,
                condition: Condition {
                    text: "Sunny".to_string(),
                    icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".to_string(),
                },
                humidity_pct: 50,
                wind_kph: 10.0,
                uv_index: 5.0,
                precipitation_mm: 0.0,
                pressure_mb: 1012.0,
                feels_like_c: temperature_c,
                visibility_km: 10.0,
            },
            forecast: Vec::new(),
        }
    }

    pub fn suggestion(id: i64, name: &str) -> LocationSuggestion {
        LocationSuggestion {
            id,
            name: name.to_string(),
            region: String::new(),
            country: "Testland".to_string(),
            lat: 0.0,
            lon: 0.0,
            url: name.to_lowercase(),
        }
    }
}
