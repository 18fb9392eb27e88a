//! Builds the current, hourly and daily views from a provider time-series.

use thiserror::Error;

use crate::daily;
use crate::symbols;
use crate::types::{Coordinates, CurrentWeather, ForecastResult, HourlyForecast, Observation};

/// Default length of the hourly view
pub const HOURLY_LIMIT: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Maximum number of hourly entries
    pub hourly_limit: usize,
    /// Fail on a time-series that goes back in time
    pub strict_ordering: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            hourly_limit: HOURLY_LIMIT,
            strict_ordering: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("time-series is empty")]
    Empty,

    #[error("time-series is not chronological at entry {index}")]
    OutOfOrder { index: usize },
}

/// Assemble a forecast with the default options
pub fn assemble(
    coordinates: Coordinates,
    timeseries: &[Observation],
) -> Result<ForecastResult, AssembleError> {
    assemble_with(coordinates, timeseries, &AssembleOptions::default())
}

/// Assemble a forecast.
///
/// The first entry becomes the current view and the first
/// `options.hourly_limit` entries the hourly view. Input order is trusted
/// unless `options.strict_ordering` is set.
pub fn assemble_with(
    coordinates: Coordinates,
    timeseries: &[Observation],
    options: &AssembleOptions,
) -> Result<ForecastResult, AssembleError> {
    let first = timeseries.first().ok_or(AssembleError::Empty)?;

    if options.strict_ordering {
        if let Some(index) = timeseries
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            return Err(AssembleError::OutOfOrder { index: index + 1 });
        }
    }

    let current_info = symbols::resolve(first.symbol_code.as_deref());
    let current = CurrentWeather {
        dt: first.timestamp(),
        temp: first.air_temperature,
        humidity: first.relative_humidity,
        pressure: first.air_pressure_at_sea_level,
        wind_speed: first.wind_speed,
        wind_deg: first.wind_from_direction,
        clouds: first.cloud_area_fraction,
        description: current_info.description.into_owned(),
        icon: current_info.icon.to_string(),
    };

    let hourly = timeseries
        .iter()
        .take(options.hourly_limit)
        .map(hourly_entry)
        .collect();

    Ok(ForecastResult {
        lat: coordinates.lat,
        lon: coordinates.lon,
        current,
        hourly,
        daily: daily::aggregate(timeseries),
    })
}

fn hourly_entry(obs: &Observation) -> HourlyForecast {
    let info = symbols::resolve(obs.symbol_code.as_deref());
    HourlyForecast {
        dt: obs.timestamp(),
        temp: obs.air_temperature,
        description: info.description.into_owned(),
        icon: info.icon.to_string(),
        precipitation_amount: obs.precipitation_amount.unwrap_or(0.0),
    }
}
