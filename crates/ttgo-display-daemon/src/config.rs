//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use ttgo_display_hw::parse_hex_color;

use crate::faces::Theme;
use crate::weather;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Redraw interval in milliseconds
    #[serde(default = "default_refresh")]
    pub refresh: u64,

    /// Display connection
    #[serde(default)]
    pub display: DisplayConfig,

    /// Weather source
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Face colors
    #[serde(default)]
    pub colors: ColorConfig,
}

/// How to reach the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum DisplayConfig {
    /// Batched commands posted to `http://<host>/command`
    Http { host: String },
    /// One framed command at a time on a serial port
    Serial { port: String },
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig::Http {
            host: default_host(),
        }
    }
}

/// Weather source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// wttr.in query URL
    #[serde(default = "default_weather_url")]
    pub url: String,

    /// Seconds a fetched report stays valid
    #[serde(default = "default_weather_ttl")]
    pub ttl: u64,

    /// Maximum cached reports
    #[serde(default = "default_weather_capacity")]
    pub capacity: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            url: default_weather_url(),
            ttl: default_weather_ttl(),
            capacity: default_weather_capacity(),
        }
    }
}

impl WeatherConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

/// Face colors as `#RRGGBB`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_text")]
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            text: default_text(),
        }
    }
}

impl ColorConfig {
    /// Converts to an RGB565 theme.
    pub fn theme(&self) -> Result<Theme> {
        Ok(Theme {
            background: parse_hex_color(&self.background)
                .context("Invalid background color")?,
            text: parse_hex_color(&self.text).context("Invalid text color")?,
        })
    }
}

// Default value functions
fn default_refresh() -> u64 {
    1000
}

fn default_host() -> String {
    "10.0.0.135".to_string()
}

fn default_weather_url() -> String {
    weather::DEFAULT_URL.to_string()
}

fn default_weather_ttl() -> u64 {
    weather::DEFAULT_TTL.as_secs()
}

fn default_weather_capacity() -> usize {
    weather::DEFAULT_CAPACITY
}

fn default_background() -> String {
    "#1A2A3A".to_string()
}

fn default_text() -> String {
    "#EEEEEE".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Redraw interval.
    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh: default_refresh(),
            display: DisplayConfig::default(),
            weather: WeatherConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}
