use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}

pub fn celsius_to_reaumur(celsius: f64) -> f64 {
    celsius * 4.0 / 5.0
}

/// Fixed-decimal rendering, e.g. `format_temp(21.456, 1) == "21.5"`.
pub fn format_temp(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Display unit for temperatures. The API always reports Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
    Reaumur,
}

impl TemperatureUnit {
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
            TemperatureUnit::Kelvin => celsius_to_kelvin(celsius),
            TemperatureUnit::Reaumur => celsius_to_reaumur(celsius),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Reaumur => "°Ré",
        }
    }

    /// Convert and format with one decimal, including the unit symbol.
    pub fn render(&self, celsius: f64) -> String {
        format!("{}{}", format_temp(self.from_celsius(celsius), 1), self.symbol())
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[
            TemperatureUnit::Celsius,
            TemperatureUnit::Fahrenheit,
            TemperatureUnit::Kelvin,
            TemperatureUnit::Reaumur,
        ]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
            TemperatureUnit::Reaumur => "reaumur",
        };
        f.write_str(name)
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            "r" | "re" | "reaumur" | "réaumur" => Ok(TemperatureUnit::Reaumur),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit, kelvin, reaumur."
            )),
        }
    }
}
