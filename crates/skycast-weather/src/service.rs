//! City name to forecast: geocode, fetch, assemble.

use skycast_core::WeatherConfig;
use std::fmt;

use crate::assemble::{assemble_with, AssembleOptions};
use crate::error::{UpstreamError, WeatherError};
use crate::geocode::{LocationResolver, NominatimClient};
use crate::provider::{ForecastSource, MetNoClient};
use crate::types::ForecastResult;

/// Progress of a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    ResolvingLocation,
    ResolvingForecast,
    Done,
    Failed,
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ResolvingLocation => "resolving-location",
            Self::ResolvingForecast => "resolving-forecast",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs one lookup at a time per call. Holds no per-query state, so a
/// single service can serve overlapping calls.
pub struct WeatherService<L = NominatimClient, F = MetNoClient> {
    locator: L,
    forecasts: F,
    options: AssembleOptions,
}

impl WeatherService {
    /// Service backed by Nominatim and MET Norway
    pub fn from_config(config: &WeatherConfig) -> Result<Self, UpstreamError> {
        let options = AssembleOptions {
            hourly_limit: config.hourly_limit,
            strict_ordering: config.strict_ordering,
        };
        Ok(Self::new(
            NominatimClient::from_config(config)?,
            MetNoClient::from_config(config)?,
            options,
        ))
    }
}

impl<L: LocationResolver, F: ForecastSource> WeatherService<L, F> {
    pub fn new(locator: L, forecasts: F, options: AssembleOptions) -> Self {
        Self {
            locator,
            forecasts,
            options,
        }
    }

    /// Look up the forecast for `city`.
    ///
    /// # Errors
    ///
    /// `WeatherError::Validation` for a blank name, `WeatherError::NotFound`
    /// when geocoding finds nothing (no forecast request is made), and
    /// `WeatherError::Upstream` for any failure of either service.
    pub async fn forecast_for_city(&self, city: &str) -> Result<ForecastResult, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::Validation);
        }

        let mut state = QueryState::Idle;
        let result = self.run(city, &mut state).await;

        match &result {
            Ok(_) => advance(&mut state, QueryState::Done),
            Err(WeatherError::Upstream { cause, .. }) => {
                tracing::error!(city, stage = %state, error = %cause, "Weather lookup failed");
                advance(&mut state, QueryState::Failed);
            }
            Err(e) => {
                tracing::info!(city, stage = %state, "Weather lookup failed: {}", e);
                advance(&mut state, QueryState::Failed);
            }
        }

        result
    }

    async fn run(&self, city: &str, state: &mut QueryState) -> Result<ForecastResult, WeatherError> {
        let upstream = |cause: UpstreamError| WeatherError::Upstream {
            city: city.to_string(),
            cause,
        };

        advance(state, QueryState::ResolvingLocation);
        let coordinates = self
            .locator
            .locate(city)
            .await
            .map_err(upstream)?
            .ok_or_else(|| WeatherError::NotFound {
                city: city.to_string(),
            })?;

        advance(state, QueryState::ResolvingForecast);
        let timeseries = self
            .forecasts
            .timeseries(coordinates)
            .await
            .map_err(upstream)?;

        assemble_with(coordinates, &timeseries, &self.options)
            .map_err(|e| upstream(e.into()))
    }
}

fn advance(state: &mut QueryState, next: QueryState) {
    tracing::debug!("Query state {} -> {}", state, next);
    *state = next;
}
