//! Work face: date, time, and current weather.
//!
//! Layout (rotated to landscape):
//! - Date at (5, 5), size 2
//! - Time at (5, 27), size 4
//! - Location at (5, 60), size 2
//! - Weather line at (5, 80), size 2
//!
//! Date and time go out as one batch and weather as a second, so the clock
//! still updates promptly when the weather batch is slow.

use super::Theme;
use crate::weather::WeatherSnapshot;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use ttgo_display_hw::{DisplayClient, Rotation, Result};

const MARGIN: i16 = 5;
const DATE_Y: i16 = 5;
const TIME_Y: i16 = 27;
const LOCATION_Y: i16 = 60;
const WEATHER_Y: i16 = 80;

const SMALL_TEXT: u8 = 2;
const LARGE_TEXT: u8 = 4;

/// Work status face.
pub struct WorkFace {
    theme: Theme,
}

impl WorkFace {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Rotates the display and clears it to the background color.
    pub async fn setup<D: DisplayClient>(&self, display: &mut D) -> Result<()> {
        display.set_rotation(Rotation::Deg270).await?;
        display.fill_screen(self.theme.background).await?;
        display.flush().await
    }

    /// Draws one full frame.
    pub async fn draw<D, Tz>(
        &self,
        display: &mut D,
        now: &DateTime<Tz>,
        weather: &WeatherSnapshot,
    ) -> Result<()>
    where
        D: DisplayClient,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        display
            .set_text_color(self.theme.text, Some(self.theme.background))
            .await?;

        display.set_cursor(MARGIN, DATE_Y).await?;
        display.set_text_size(SMALL_TEXT).await?;
        display.println(date_line(now)).await?;

        display.set_cursor(MARGIN, TIME_Y).await?;
        display.set_text_size(LARGE_TEXT).await?;
        display.println(time_line(now)).await?;

        display.flush().await?;

        display.set_text_size(SMALL_TEXT).await?;
        display.set_cursor(MARGIN, LOCATION_Y).await?;
        display.println(weather.location.as_str()).await?;
        display.set_cursor(MARGIN, WEATHER_Y).await?;
        display.println(weather_line(weather)).await?;

        display.flush().await
    }
}

/// e.g. `Monday, Mar 04 2024`
pub fn date_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%A, %b %d %Y").to_string()
}

/// e.g. `01:05:09 PM`
pub fn time_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%I:%M:%S %p").to_string()
}

/// The device font has no emoji, so the condition is spelled out.
pub fn weather_line(weather: &WeatherSnapshot) -> String {
    format!("Weather: {} {}", weather.condition, weather.temperature)
}
