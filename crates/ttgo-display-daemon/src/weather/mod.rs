//! Current weather from wttr.in.
//!
//! The service answers `location|condition|temperature°` in plain text. One
//! snapshot is cached for a short TTL so the once-a-second redraw does not hit
//! the network every cycle.

mod cache;
mod condition;

pub use cache::{Clock, SystemClock, TtlCache};
pub use condition::Condition;

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Default wttr.in query: location, condition glyph, temperature.
pub const DEFAULT_URL: &str = "http://wttr.in/?T&format=%l|%c|%t";

/// How long a fetched snapshot stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Maximum cached snapshots.
pub const DEFAULT_CAPACITY: usize = 10;

/// Weather lookup errors.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Request to the weather service failed.
    #[error("Weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response did not have three `|`-separated fields.
    #[error("Malformed weather response: {0:?}")]
    Malformed(String),

    /// Condition is not one we know how to display.
    #[error("Unknown weather condition: {0:?}")]
    UnknownCondition(String),
}

/// One parsed weather report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub location: String,
    pub condition: Condition,
    /// Temperature with the degree sign removed, e.g. `+12C`.
    pub temperature: String,
}

impl WeatherSnapshot {
    /// Parses a `location|condition|temperature°` response body.
    pub fn parse(body: &str) -> Result<Self, WeatherError> {
        let fields: Vec<&str> = body.split('|').collect();
        let [location, condition, temperature] = fields.as_slice() else {
            return Err(WeatherError::Malformed(body.to_string()));
        };

        Ok(Self {
            location: location.trim().to_string(),
            condition: Condition::lookup(condition)?,
            temperature: temperature.replace('\u{00B0}', "").trim().to_string(),
        })
    }
}

/// Where raw weather text comes from.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    async fn fetch(&self) -> Result<String, WeatherError>;
}

/// wttr.in over HTTP.
pub struct WttrSource {
    http: reqwest::Client,
    url: String,
}

impl WttrSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl WeatherSource for WttrSource {
    async fn fetch(&self) -> Result<String, WeatherError> {
        debug!("GET {}", self.url);
        let text = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

/// Fetches and caches weather snapshots.
pub struct WeatherAdapter<S = WttrSource, C = SystemClock> {
    source: S,
    cache: TtlCache<(), WeatherSnapshot, C>,
}

impl WeatherAdapter {
    /// Adapter for wttr.in with the wall clock.
    pub fn wttr(url: &str, ttl: Duration, capacity: usize) -> Self {
        Self::new(WttrSource::new(url), ttl, capacity, SystemClock)
    }
}

impl<S: WeatherSource, C: Clock> WeatherAdapter<S, C> {
    pub fn new(source: S, ttl: Duration, capacity: usize, clock: C) -> Self {
        Self {
            source,
            cache: TtlCache::new(capacity, ttl, clock),
        }
    }

    /// Returns the current weather, fetching only when the cached snapshot
    /// has expired.
    pub async fn current(&mut self) -> Result<WeatherSnapshot, WeatherError> {
        if let Some(snapshot) = self.cache.get(&()) {
            return Ok(snapshot.clone());
        }

        info!("Fetching weather");
        let body = self.source.fetch().await?;
        let snapshot = WeatherSnapshot::parse(&body)?;
        debug!("Weather: {:?}", snapshot);

        self.cache.insert((), snapshot.clone());
        Ok(snapshot)
    }

    /// Returns the clock driving cache expiry.
    #[cfg(test)]
    pub fn clock(&self) -> &C {
        self.cache.clock()
    }

    /// Returns the underlying source.
    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
}
