//! Localization of the English condition phrases returned by the weather service.

/// Language subtag the condition table translates into.
pub const TARGET_LANGUAGE: &str = "id";

const CONDITIONS_ID: &[(&str, &str)] = &[
    // clear
    ("sunny", "Cerah"),
    ("clear", "Cerah"),
    // clouds
    ("partly cloudy", "Berawan Sebagian"),
    ("cloudy", "Berawan"),
    ("overcast", "Mendung"),
    ("mist", "Berkabut"),
    ("fog", "Kabut"),
    ("foggy", "Berkabut"),
    // rain
    ("patchy rain possible", "Kemungkinan Hujan"),
    ("patchy rain nearby", "Hujan di Sekitar"),
    ("patchy light drizzle", "Gerimis Ringan Sebagian"),
    ("light drizzle", "Gerimis"),
    ("freezing drizzle", "Gerimis Beku"),
    ("heavy freezing drizzle", "Gerimis Beku Lebat"),
    ("patchy light rain", "Hujan Ringan Sebagian"),
    ("light rain", "Hujan Ringan"),
    ("moderate rain at times", "Hujan Sedang"),
    ("moderate rain", "Hujan Sedang"),
    ("heavy rain at times", "Hujan Lebat"),
    ("heavy rain", "Hujan Lebat"),
    ("light rain shower", "Hujan Rintik"),
    ("moderate or heavy rain shower", "Hujan Deras"),
    ("torrential rain shower", "Hujan Sangat Deras"),
    ("light freezing rain", "Hujan Beku Ringan"),
    ("moderate or heavy freezing rain", "Hujan Beku Lebat"),
    // snow
    ("patchy snow possible", "Kemungkinan Salju"),
    ("blowing snow", "Salju Bertiup"),
    ("blizzard", "Badai Salju"),
    ("patchy light snow", "Salju Ringan Sebagian"),
    ("light snow", "Salju Ringan"),
    ("patchy moderate snow", "Salju Sedang Sebagian"),
    ("moderate snow", "Salju Sedang"),
    ("patchy heavy snow", "Salju Lebat Sebagian"),
    ("heavy snow", "Salju Lebat"),
    ("light snow showers", "Hujan Salju Ringan"),
    ("moderate or heavy snow showers", "Hujan Salju Lebat"),
    // sleet
    ("patchy sleet possible", "Kemungkinan Hujan Es"),
    ("light sleet", "Hujan Es Ringan"),
    ("moderate or heavy sleet", "Hujan Es Lebat"),
    ("light sleet showers", "Hujan Es Ringan"),
    ("moderate or heavy sleet showers", "Hujan Es Lebat"),
    // ice pellets
    ("ice pellets", "Butiran Es"),
    ("light showers of ice pellets", "Hujan Butiran Es Ringan"),
    ("moderate or heavy showers of ice pellets", "Hujan Butiran Es Lebat"),
    // thunder
    ("thundery outbreaks possible", "Kemungkinan Petir"),
    ("patchy light rain with thunder", "Hujan Ringan Disertai Petir"),
    ("moderate or heavy rain with thunder", "Hujan Lebat Disertai Petir"),
    ("patchy light snow with thunder", "Salju Ringan Disertai Petir"),
    ("moderate or heavy snow with thunder", "Salju Lebat Disertai Petir"),
    // freezing fog
    ("patchy freezing drizzle possible", "Kemungkinan Gerimis Beku"),
    ("freezing fog", "Kabut Beku"),
];

#[derive(Debug, Clone)]
pub struct ConditionTranslator {
    enabled: bool,
}

impl ConditionTranslator {
    /// `locale` is a BCP 47-ish tag such as `"id"`, `"id-ID"` or `"en_US"`.
    pub fn new(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        Self { enabled: language.eq_ignore_ascii_case(TARGET_LANGUAGE) }
    }

    /// Localized phrase for `condition`, or `condition` unchanged.
    ///
    /// An exact (case-insensitive) match wins; otherwise the longest known
    /// phrase contained in the text is used.
    pub fn translate<'a>(&self, condition: &'a str) -> &'a str {
        if !self.enabled {
            return condition;
        }

        let needle = condition.trim().to_lowercase();
        if let Some((_, localized)) = CONDITIONS_ID.iter().find(|(key, _)| *key == needle) {
            return *localized;
        }

        CONDITIONS_ID
            .iter()
            .filter(|(key, _)| needle.contains(key))
            .max_by_key(|(key, _)| key.len())
            .map_or(condition, |(_, localized)| *localized)
    }

    pub fn has_translation(&self, condition: &str) -> bool {
        let needle = condition.trim().to_lowercase();
        CONDITIONS_ID.iter().any(|(key, _)| *key == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_case_insensitive() {
        let t = ConditionTranslator::new("id");
        assert_eq!(t.translate("Partly Cloudy"), "Berawan Sebagian");
        assert_eq!(t.translate("  sunny "), "Cerah");
    }

    #[test]
    fn region_subtag_is_ignored() {
        assert_eq!(ConditionTranslator::new("id-ID").translate("Overcast"), "Mendung");
        assert_eq!(ConditionTranslator::new("ID_id").translate("Overcast"), "Mendung");
    }

    #[test]
    fn other_locales_pass_through() {
        let t = ConditionTranslator::new("en-US");
        assert_eq!(t.translate("Partly Cloudy"), "Partly Cloudy");
    }

    #[test]
    fn substring_fallback_prefers_longest_phrase() {
        let t = ConditionTranslator::new("id");
        // contains both "light rain" and "patchy light rain"
        assert_eq!(t.translate("Patchy light rain in area"), "Hujan Ringan Sebagian");
        assert!(!t.has_translation("Patchy light rain in area"));
    }

    #[test]
    fn unknown_phrase_is_returned_verbatim() {
        let t = ConditionTranslator::new("id");
        assert_eq!(t.translate("Volcanic Ash"), "Volcanic Ash");
    }
}
