use chrono::NaiveDate;
use weather_lookup_core::{ConditionTranslator, ForecastDay, TemperatureUnit, WeatherSnapshot};

/// Human-readable block for a successful lookup.
pub fn render_snapshot(
    snapshot: &WeatherSnapshot,
    unit: TemperatureUnit,
    translator: &ConditionTranslator,
) -> String {
    let location = &snapshot.location;
    let current = &snapshot.current;

    let mut lines = vec![
        format!("{}, {}", location.name, location.country),
        format!("{}  {}", location.local_date(), location.local_clock()),
        format!(
            "{}  {}",
            unit.render(current.temperature_c),
            translator.translate(&current.condition.text)
        ),
        format!("Feels like   {}", unit.render(current.feels_like_c)),
        format!("Humidity     {}%", current.humidity_pct),
        format!("Wind         {} km/h", current.wind_kph),
        format!("UV index     {}", current.uv_index),
        format!("Precip.      {} mm", current.precipitation_mm),
        format!("Pressure     {} mb", current.pressure_mb),
        format!("Visibility   {} km", current.visibility_km),
        format!("Icon         {}", current.condition.high_resolution_icon_url()),
    ];

    if !snapshot.forecast.is_empty() {
        let today = location.local_datetime().map(|dt| dt.date());
        lines.push(String::new());
        lines.push("Forecast".to_string());
        lines.extend(
            snapshot
                .forecast
                .iter()
                .map(|day| format!("  {}", render_forecast_day(day, today, unit, translator))),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_forecast_day(
    day: &ForecastDay,
    today: Option<NaiveDate>,
    unit: TemperatureUnit,
    translator: &ConditionTranslator,
) -> String {
    format!(
        "{:<10} {} / {}  {} (rain {}%)",
        day_label(day.date, today),
        unit.render(day.min_temp_c),
        unit.render(day.max_temp_c),
        translator.translate(&day.condition.text),
        day.chance_of_rain_pct,
    )
}

fn day_label(date: NaiveDate, today: Option<NaiveDate>) -> String {
    match today {
        Some(t) if t == date => "Today".to_string(),
        Some(t) if t.succ_opt() == Some(date) => "Tomorrow".to_string(),
        _ => date.format("%a %d %b").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_lookup_core::{Condition, CurrentConditions, Location};

    fn snapshot() -> WeatherSnapshot {
        let sunny = Condition {
            text: "Sunny".into(),
            icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
        };
        WeatherSnapshot {
            location: Location {
                name: "Bali".into(),
                region: "Bali".into(),
                country: "Indonesia".into(),
                local_time: "2024-05-01 09:30".into(),
            },
            current: CurrentConditions {
                temperature_c: 30.0,
                condition: sunny.clone(),
                humidity_pct: 70,
                wind_kph: 12.0,
                uv_index: 9.0,
                precipitation_mm: 0.0,
                pressure_mb: 1010.0,
                feels_like_c: 34.0,
                visibility_km: 10.0,
            },
            forecast: vec![
                ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    max_temp_c: 31.0,
                    min_temp_c: 25.0,
                    avg_humidity_pct: 72.0,
                    chance_of_rain_pct: 10,
                    condition: sunny.clone(),
                },
                ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                    max_temp_c: 30.0,
                    min_temp_c: 24.0,
                    avg_humidity_pct: 80.0,
                    chance_of_rain_pct: 60,
                    condition: sunny,
                },
            ],
        }
    }

    #[test]
    fn renders_translated_condition_in_requested_unit() {
        let text = render_snapshot(
            &snapshot(),
            TemperatureUnit::Fahrenheit,
            &ConditionTranslator::new("id"),
        );

        assert!(text.contains("Bali, Indonesia"));
        assert!(text.contains("86.0°F  Cerah"));
        assert!(text.contains("128x128"));
        assert!(text.contains("Today"));
        assert!(text.contains("Tomorrow"));
    }

    #[test]
    fn english_locale_keeps_original_condition() {
        let text =
            render_snapshot(&snapshot(), TemperatureUnit::Celsius, &ConditionTranslator::new("en"));
        assert!(text.contains("30.0°C  Sunny"));
    }

    #[test]
    fn every_line_is_terminated_and_forecast_follows_current() {
        let text =
            render_snapshot(&snapshot(), TemperatureUnit::Celsius, &ConditionTranslator::new("en"));
        let lines: Vec<_> = text.lines().collect();

        assert!(text.ends_with('\n'));
        assert_eq!(lines[0], "Bali, Indonesia");
        assert_eq!(lines[1], "2024-05-01  09:30");
        let forecast_at = lines.iter().position(|l| *l == "Forecast").expect("forecast header");
        assert_eq!(lines[forecast_at - 1], "");
        assert_eq!(lines.len(), forecast_at + 3);
        assert!(lines[forecast_at + 1].starts_with("  Today"));
    }

    #[test]
    fn current_only_snapshot_has_no_forecast_block() {
        let mut snapshot = snapshot();
        snapshot.forecast.clear();
        let text =
            render_snapshot(&snapshot, TemperatureUnit::Kelvin, &ConditionTranslator::new("en"));

        assert!(!text.contains("Forecast"));
        assert!(text.ends_with("128x128/day/113.png\n"));
    }
}
