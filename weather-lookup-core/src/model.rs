use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const LOW_RES_ICON_MARKER: &str = "64x64";
const HIGH_RES_ICON_MARKER: &str = "128x128";

/// Result of a successful weather lookup. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    /// Empty when only current conditions were requested.
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    /// Local time at the location as reported by the service, `YYYY-MM-DD HH:MM`.
    pub local_time: String,
}

impl Location {
    pub fn local_date(&self) -> &str {
        self.local_time.split_once(' ').map_or(self.local_time.as_str(), |(date, _)| date)
    }

    pub fn local_clock(&self) -> &str {
        self.local_time.split_once(' ').map_or("", |(_, clock)| clock)
    }

    pub fn local_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.local_time, "%Y-%m-%d %H:%M").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Protocol-relative icon URL, passed through untouched.
    pub icon: String,
}

impl Condition {
    /// Absolute URL of the larger variant of the condition icon.
    pub fn high_resolution_icon_url(&self) -> String {
        let upgraded = self.icon.replace(LOW_RES_ICON_MARKER, HIGH_RES_ICON_MARKER);
        if upgraded.starts_with("//") { format!("https:{upgraded}") } else { upgraded }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub condition: Condition,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub uv_index: f64,
    pub precipitation_mm: f64,
    pub pressure_mb: f64,
    pub feels_like_c: f64,
    pub visibility_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_humidity_pct: f64,
    pub chance_of_rain_pct: u8,
    pub condition: Condition,
}

/// One entry of a place-name autocomplete result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub url: String,
}

impl LocationSuggestion {
    pub fn display_text(&self) -> String {
        if self.region.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.region, self.country)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(local_time: &str) -> Location {
        Location {
            name: "Bandung".into(),
            region: "West Java".into(),
            country: "Indonesia".into(),
            local_time: local_time.into(),
        }
    }

    #[test]
    fn local_time_is_split_into_date_and_clock() {
        let loc = location("2024-05-01 17:45");
        assert_eq!(loc.local_date(), "2024-05-01");
        assert_eq!(loc.local_clock(), "17:45");
        assert!(loc.local_datetime().is_some());
    }

    #[test]
    fn local_time_without_clock() {
        let loc = location("2024-05-01");
        assert_eq!(loc.local_date(), "2024-05-01");
        assert_eq!(loc.local_clock(), "");
        assert!(loc.local_datetime().is_none());
    }

    #[test]
    fn icon_url_is_upgraded_and_made_absolute() {
        let condition = Condition {
            text: "Sunny".into(),
            icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
        };

        assert_eq!(
            condition.high_resolution_icon_url(),
            "https://cdn.weatherapi.com/weather/128x128/day/113.png"
        );
        assert_eq!(condition.icon, "//cdn.weatherapi.com/weather/64x64/day/113.png");
    }

    #[test]
    fn suggestion_display_text_skips_empty_region() {
        let mut s = LocationSuggestion {
            id: 1,
            name: "Paris".into(),
            region: "Ile-de-France".into(),
            country: "France".into(),
            lat: 48.87,
            lon: 2.33,
            url: "paris-ile-de-france-france".into(),
        };
        assert_eq!(s.display_text(), "Paris, Ile-de-France, France");

        s.region.clear();
        assert_eq!(s.display_text(), "Paris, France");
    }
}
