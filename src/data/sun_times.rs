use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::location::{FetchDay, SunBoundaries};

pub const SUN_TIMES_URL: &str = "https://api.sunrise-sunset.org/json";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("sun-time service returned status {0}")]
    Status(u16),
    #[error("sun-time request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to decode sun-time response: {0}")]
    Decode(String),
    #[error("sun-time boundaries out of order: sunrise {sunrise}, sunset {sunset}")]
    InvalidBoundaries {
        twilight_begin: DateTime<Utc>,
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
        twilight_end: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct SunTimeClient {
    client: Client,
    base_url: String,
}

impl SunTimeClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        day: FetchDay,
    ) -> Result<SunBoundaries, FetchError> {
        debug!(
            url = %self.base_url,
            lat = latitude,
            lng = longitude,
            date = day.as_query(),
            "fetching sun times"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("formatted", "0".to_string()),
                ("date", day.as_query().to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let payload: SunTimesResponse = response
            .json()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))?;

        payload.results.into_boundaries()
    }
}

#[derive(Debug, Deserialize)]
struct SunTimesResponse {
    results: ResultsBlock,
}

#[derive(Debug, Deserialize)]
struct ResultsBlock {
    sunrise: String,
    sunset: String,
    civil_twilight_begin: String,
    civil_twilight_end: String,
    day_length: u32,
}

impl ResultsBlock {
    fn into_boundaries(self) -> Result<SunBoundaries, FetchError> {
        let boundaries = SunBoundaries {
            twilight_begin: parse_instant(&self.civil_twilight_begin)?,
            sunrise: parse_instant(&self.sunrise)?,
            sunset: parse_instant(&self.sunset)?,
            twilight_end: parse_instant(&self.civil_twilight_end)?,
            day_length_secs: self.day_length,
        };

        if boundaries.is_ordered() {
            Ok(boundaries)
        } else {
            Err(FetchError::InvalidBoundaries {
                twilight_begin: boundaries.twilight_begin,
                sunrise: boundaries.sunrise,
                sunset: boundaries.sunset,
                twilight_end: boundaries.twilight_end,
            })
        }
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, FetchError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| FetchError::Decode(format!("bad timestamp {value:?}: {err}")))
}
