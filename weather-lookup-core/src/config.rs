use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    provider::weatherapi::DEFAULT_BASE_URL,
    suggestions::{DEBOUNCE_MS, MIN_CHARS, SuggestionPolicy},
    units::TemperatureUnit,
};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_forecast_days() -> u8 {
    3
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_locale() -> String {
    "id".to_string()
}

/// Autocomplete tuning, stored under `[suggestions]`. Missing keys fall back
/// to the built-in policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub min_chars: usize,
    pub debounce_ms: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self { min_chars: MIN_CHARS, debounce_ms: DEBOUNCE_MS }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// forecast_days = 3
/// locale = "id"
/// unit = "celsius"
///
/// [suggestions]
/// min_chars = 2
/// debounce_ms = 300
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WeatherAPI.com key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Days of forecast requested with every lookup.
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Locale for condition phrases, e.g. "id" or "en".
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub unit: TemperatureUnit,

    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            forecast_days: default_forecast_days(),
            request_timeout_secs: default_request_timeout_secs(),
            locale: default_locale(),
            unit: TemperatureUnit::default(),
            suggestions: SuggestionConfig::default(),
        }
    }
}

impl Config {
    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn suggestion_policy(&self) -> SuggestionPolicy {
        SuggestionPolicy {
            min_chars: self.suggestions.min_chars,
            debounce: Duration::from_millis(self.suggestions.debounce_ms),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if cfg.forecast_days == 0 {
            return Err(anyhow!("forecast_days must be at least 1"));
        }
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::DEBOUNCE;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml("").expect("empty config is valid");

        assert!(!cfg.is_configured());
        assert_eq!(cfg.forecast_days, 3);
        assert_eq!(cfg.locale, "id");
        assert_eq!(cfg.unit, TemperatureUnit::Celsius);
        assert_eq!(cfg.suggestion_policy(), SuggestionPolicy::default());
    }

    #[test]
    fn parses_full_file() {
        let cfg = Config::from_toml(
            r#"
            api_key = "SECRET"
            forecast_days = 5
            locale = "en"
            unit = "fahrenheit"

            [suggestions]
            min_chars = 3
            debounce_ms = 500
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.api_key(), Some("SECRET"));
        assert_eq!(cfg.forecast_days, 5);
        assert_eq!(cfg.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(cfg.suggestion_policy().min_chars, 3);
        assert_eq!(cfg.suggestion_policy().debounce, Duration::from_millis(500));
    }

    #[test]
    fn partial_suggestions_table_keeps_other_defaults() {
        let cfg = Config::from_toml("[suggestions]\nmin_chars = 3\n").expect("partial table is valid");
        assert_eq!(cfg.suggestions.min_chars, 3);
        assert_eq!(cfg.suggestions.debounce_ms, DEBOUNCE_MS);

        let cfg = Config::from_toml("[suggestions]\ndebounce_ms = 450\n").expect("partial table is valid");
        assert_eq!(cfg.suggestions.min_chars, MIN_CHARS);
        assert_eq!(cfg.suggestion_policy().debounce, Duration::from_millis(450));
    }

    #[test]
    fn default_suggestion_config_matches_policy() {
        let policy = Config::default().suggestion_policy();
        assert_eq!(policy, SuggestionPolicy::default());
        assert_eq!(policy.debounce, DEBOUNCE);
    }

    #[test]
    fn zero_forecast_days_is_rejected() {
        let err = Config::from_toml("forecast_days = 0").unwrap_err();
        assert!(err.to_string().contains("forecast_days"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert!(!cfg.is_configured());

        cfg.set_api_key(" KEY ".into());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn serialization_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.unit = TemperatureUnit::Kelvin;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back = Config::from_toml(&text).expect("parse");

        assert_eq!(back.api_key(), Some("KEY"));
        assert_eq!(back.unit, TemperatureUnit::Kelvin);
    }
}
