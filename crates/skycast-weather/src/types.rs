use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Geographic position of a resolved city
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One instant of the provider time-series.
///
/// Readings are in provider units: °C, %, hPa, m/s, degrees and mm.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub air_temperature: f64,
    pub relative_humidity: f64,
    pub air_pressure_at_sea_level: f64,
    pub wind_speed: f64,
    pub wind_from_direction: f64,
    pub cloud_area_fraction: f64,
    /// Precipitation over the following hour
    pub precipitation_amount: Option<f64>,
    /// Symbol code for the following hour
    pub symbol_code: Option<String>,
}

impl Observation {
    /// Seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }
}

/// Snapshot taken from the first time-series entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub dt: i64,
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub clouds: f64,
    pub description: String,
    pub icon: String,
}

/// Hourly forecast entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecast {
    pub dt: i64,
    pub temp: f64,
    pub description: String,
    pub icon: String,
    pub precipitation_amount: f64,
}

/// Temperature summary of one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTemperature {
    pub min: f64,
    pub max: f64,
    /// Mean over 06:00-18:00 UTC, `None` when the day has no such readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<f64>,
    /// Mean outside 06:00-18:00 UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night: Option<f64>,
}

/// Aggregated forecast for one UTC calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    /// UTC midnight of `date`, seconds since the epoch
    pub dt: i64,
    pub date: NaiveDate,
    pub temp: DailyTemperature,
    pub symbol_code: String,
    pub description: String,
    pub icon: String,
    pub precipitation_amount: f64,
}

/// Everything a presentation layer needs for one city query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub lat: f64,
    pub lon: f64,
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyAggregate>,
}
