use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Condition, CurrentConditions, ForecastDay, Location, LocationSuggestion, WeatherSnapshot},
};

use super::WeatherClient;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// [`WeatherClient`] backed by WeatherAPI.com.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Client with a custom endpoint and a transport-level timeout.
    pub fn with_options(
        api_key: String,
        base_url: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(endpoint, %status, body = %truncate_body(&body), "WeatherAPI request failed");
            return Err(FetchError::from_status(status, &body));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    country: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
    humidity: u8,
    wind_kph: f64,
    uv: f64,
    precip_mm: f64,
    pressure_mb: f64,
    feelslike_c: f64,
    vis_km: f64,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    avghumidity: f64,
    #[serde(default)]
    daily_chance_of_rain: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: Option<WaForecast>,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon }
    }
}

impl From<WaResponse> for WeatherSnapshot {
    fn from(parsed: WaResponse) -> Self {
        let WaResponse { location, current, forecast } = parsed;

        let forecast = forecast
            .map(|f| {
                f.forecastday
                    .into_iter()
                    .map(|d| ForecastDay {
                        date: d.date,
                        max_temp_c: d.day.maxtemp_c,
                        min_temp_c: d.day.mintemp_c,
                        avg_humidity_pct: d.day.avghumidity,
                        chance_of_rain_pct: d.day.daily_chance_of_rain,
                        condition: d.day.condition.into(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        WeatherSnapshot {
            location: Location {
                name: location.name,
                region: location.region,
                country: location.country,
                local_time: location.localtime,
            },
            current: CurrentConditions {
                temperature_c: current.temp_c,
                condition: current.condition.into(),
                humidity_pct: current.humidity,
                wind_kph: current.wind_kph,
                uv_index: current.uv,
                precipitation_mm: current.precip_mm,
                pressure_mb: current.pressure_mb,
                feels_like_c: current.feelslike_c,
                visibility_km: current.vis_km,
            },
            forecast,
        }
    }
}

fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, FetchError> {
    let parsed: WaResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

fn parse_suggestions(body: &str) -> Result<Vec<LocationSuggestion>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl WeatherClient for WeatherApiClient {
    async fn fetch_weather(
        &self,
        query: &str,
        forecast_days: Option<u8>,
    ) -> Result<WeatherSnapshot, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::InvalidLocation);
        }

        let body = match forecast_days {
            Some(days) => {
                let days = days.to_string();
                self.get("forecast.json", &[("q", query), ("days", days.as_str()), ("aqi", "no")]).await?
            }
            None => self.get("current.json", &[("q", query)]).await?,
        };

        parse_snapshot(&body)
    }

    async fn search_suggestions(&self, prefix: &str) -> Result<Vec<LocationSuggestion>, FetchError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let body = self.get("search.json", &[("q", prefix)]).await?;
        parse_suggestions(&body)
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
