//! Weather conditions reported by wttr.in.

use super::WeatherError;

/// Variation selector some glyphs carry; wttr.in is not consistent about it.
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// A known weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Unknown,
    Cloudy,
    Fog,
    HeavyRain,
    HeavyShowers,
    HeavySnow,
    HeavySnowShowers,
    LightRain,
    LightShowers,
    LightSleet,
    LightSleetShowers,
    LightSnow,
    LightSnowShowers,
    PartlyCloudy,
    Clear,
    ThunderyHeavyRain,
    ThunderyShowers,
    ThunderySnowShowers,
    VeryCloudy,
}

impl Condition {
    /// Every condition, in lookup priority order.
    pub const ALL: [Condition; 19] = [
        Condition::Unknown,
        Condition::Cloudy,
        Condition::Fog,
        Condition::HeavyRain,
        Condition::HeavyShowers,
        Condition::HeavySnow,
        Condition::HeavySnowShowers,
        Condition::LightRain,
        Condition::LightShowers,
        Condition::LightSleet,
        Condition::LightSleetShowers,
        Condition::LightSnow,
        Condition::LightSnowShowers,
        Condition::PartlyCloudy,
        Condition::Clear,
        Condition::ThunderyHeavyRain,
        Condition::ThunderyShowers,
        Condition::ThunderySnowShowers,
        Condition::VeryCloudy,
    ];

    /// Human-readable phrase.
    pub fn phrase(&self) -> &'static str {
        match self {
            Condition::Unknown => "Unknown",
            Condition::Cloudy => "Cloudy",
            Condition::Fog => "Fog",
            Condition::HeavyRain => "Heavy Rain",
            Condition::HeavyShowers => "Heavy Showers",
            Condition::HeavySnow => "Heavy Snow",
            Condition::HeavySnowShowers => "Heavy Snow Showers",
            Condition::LightRain => "Light Rain",
            Condition::LightShowers => "Light Showers",
            Condition::LightSleet => "Light Sleet",
            Condition::LightSleetShowers => "Light Sleet Showers",
            Condition::LightSnow => "Light Snow",
            Condition::LightSnowShowers => "Light Snow Showers",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Clear => "Clear",
            Condition::ThunderyHeavyRain => "Thundery Heavy Rain",
            Condition::ThunderyShowers => "Thundery Showers",
            Condition::ThunderySnowShowers => "Thundery Snow Showers",
            Condition::VeryCloudy => "Very Cloudy",
        }
    }

    /// Display glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            Condition::Unknown => "\u{2728}",
            Condition::Cloudy | Condition::VeryCloudy => "\u{2601}\u{FE0F}",
            Condition::Fog => "\u{1F32B}",
            Condition::HeavyRain
            | Condition::HeavyShowers
            | Condition::LightSleet
            | Condition::LightSleetShowers => "\u{1F327}",
            Condition::HeavySnow | Condition::HeavySnowShowers => "\u{2744}\u{FE0F}",
            Condition::LightRain | Condition::LightShowers => "\u{1F326}",
            Condition::LightSnow | Condition::LightSnowShowers => "\u{1F328}",
            Condition::PartlyCloudy => "\u{26C5}\u{FE0F}",
            Condition::Clear => "\u{2600}\u{FE0F}",
            Condition::ThunderyHeavyRain => "\u{1F329}",
            Condition::ThunderyShowers | Condition::ThunderySnowShowers => "\u{26C8}",
        }
    }

    /// Resolves a condition from its phrase or its glyph.
    ///
    /// Several conditions share a glyph; a glyph resolves to the last one in
    /// [`Condition::ALL`].
    pub fn lookup(text: &str) -> Result<Self, WeatherError> {
        let text = text.trim();
        if let Some(condition) = Self::ALL
            .iter()
            .find(|c| c.phrase().eq_ignore_ascii_case(text))
        {
            return Ok(*condition);
        }

        let bare = strip_variation(text);
        Self::ALL
            .iter()
            .rev()
            .find(|c| !bare.is_empty() && strip_variation(c.glyph()) == bare)
            .copied()
            .ok_or_else(|| WeatherError::UnknownCondition(text.to_string()))
    }
}

fn strip_variation(text: &str) -> String {
    text.chars().filter(|&c| c != VARIATION_SELECTOR).collect()
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.phrase())
    }
}
