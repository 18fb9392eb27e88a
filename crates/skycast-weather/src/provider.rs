//! MET Norway locationforecast client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::UpstreamError;
use crate::types::{Coordinates, Observation};

/// Source of forecast time-series
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Chronological observations for `at`. Never empty on success.
    async fn timeseries(&self, at: Coordinates) -> Result<Vec<Observation>, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct MetResponse {
    properties: Option<MetProperties>,
}

#[derive(Debug, Deserialize)]
struct MetProperties {
    #[serde(default)]
    timeseries: Vec<MetTimeStep>,
}

#[derive(Debug, Deserialize)]
struct MetTimeStep {
    time: DateTime<Utc>,
    data: MetData,
}

#[derive(Debug, Deserialize)]
struct MetData {
    instant: MetInstant,
    next_1_hours: Option<MetNextHour>,
}

#[derive(Debug, Deserialize)]
struct MetInstant {
    details: InstantDetails,
}

#[derive(Debug, Deserialize)]
struct InstantDetails {
    air_temperature: f64,
    relative_humidity: f64,
    air_pressure_at_sea_level: f64,
    wind_speed: f64,
    wind_from_direction: f64,
    cloud_area_fraction: f64,
}

#[derive(Debug, Deserialize)]
struct MetNextHour {
    summary: Option<MetSummary>,
    details: Option<NextHourDetails>,
}

#[derive(Debug, Deserialize)]
struct MetSummary {
    symbol_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NextHourDetails {
    precipitation_amount: Option<f64>,
}

impl From<MetTimeStep> for Observation {
    fn from(step: MetTimeStep) -> Self {
        let details = step.data.instant.details;
        let next = step.data.next_1_hours;
        let (symbol_code, precipitation_amount) = match next {
            Some(next) => (
                next.summary.and_then(|s| s.symbol_code),
                next.details.and_then(|d| d.precipitation_amount),
            ),
            None => (None, None),
        };

        Self {
            time: step.time,
            air_temperature: details.air_temperature,
            relative_humidity: details.relative_humidity,
            air_pressure_at_sea_level: details.air_pressure_at_sea_level,
            wind_speed: details.wind_speed,
            wind_from_direction: details.wind_from_direction,
            cloud_area_fraction: details.cloud_area_fraction,
            precipitation_amount,
            symbol_code,
        }
    }
}

/// MET Norway forecast client
#[derive(Debug, Clone)]
pub struct MetNoClient {
    client: Arc<Client>,
    base_url: String,
}

impl MetNoClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.to_string(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, UpstreamError> {
        Self::new(
            &config.forecast_url,
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl ForecastSource for MetNoClient {
    #[instrument(skip(self), level = "info")]
    async fn timeseries(&self, at: Coordinates) -> Result<Vec<Observation>, UpstreamError> {
        // The API rejects more than four decimals
        let lat = format!("{:.4}", at.lat);
        let lon = format!("{:.4}", at.lon);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;
        let parsed: MetResponse = serde_json::from_str(&body)
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        let steps = parsed
            .properties
            .map(|p| p.timeseries)
            .unwrap_or_default();
        if steps.is_empty() {
            return Err(UpstreamError::EmptyTimeseries);
        }

        tracing::debug!("Received {} forecast steps", steps.len());
        Ok(steps.into_iter().map(Observation::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> MetNoClient {
        MetNoClient::new(
            &format!("{}/compact", server.uri()),
            "SkyCast-Test/0.1",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "properties": {
                "timeseries": [
                    {
                        "time": "2024-05-01T12:00:00Z",
                        "data": {
                            "instant": { "details": {
                                "air_pressure_at_sea_level": 1015.2,
                                "air_temperature": 11.3,
                                "cloud_area_fraction": 12.5,
                                "relative_humidity": 55.1,
                                "wind_from_direction": 200.4,
                                "wind_speed": 3.1
                            }},
                            "next_1_hours": {
                                "summary": { "symbol_code": "fair_day" },
                                "details": { "precipitation_amount": 0.2 }
                            }
                        }
                    },
                    {
                        "time": "2024-05-01T13:00:00Z",
                        "data": {
                            "instant": { "details": {
                                "air_pressure_at_sea_level": 1015.0,
                                "air_temperature": 11.9,
                                "cloud_area_fraction": 20.0,
                                "relative_humidity": 53.0,
                                "wind_from_direction": 205.0,
                                "wind_speed": 3.4
                            }}
                        }
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_timeseries_parses_entries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .and(query_param("lat", "59.9133"))
            .and(query_param("lon", "10.7390"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let steps = client(&mock_server)
            .timeseries(Coordinates { lat: 59.913_3, lon: 10.739 })
            .await
            .unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].air_temperature, 11.3);
        assert_eq!(steps[0].air_pressure_at_sea_level, 1015.2);
        assert_eq!(steps[0].symbol_code.as_deref(), Some("fair_day"));
        assert_eq!(steps[0].precipitation_amount, Some(0.2));
        assert_eq!(steps[1].symbol_code, None);
        assert_eq!(steps[1].precipitation_amount, None);
        assert_eq!(steps[1].timestamp(), 1_714_568_400);
    }

    #[tokio::test]
    async fn test_empty_timeseries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": { "timeseries": [] }
            })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .timeseries(Coordinates { lat: 1.0, lon: 2.0 })
            .await;
        assert!(matches!(result, Err(UpstreamError::EmptyTimeseries)));
    }

    #[tokio::test]
    async fn test_missing_properties() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .timeseries(Coordinates { lat: 1.0, lon: 2.0 })
            .await;
        assert!(matches!(result, Err(UpstreamError::EmptyTimeseries)));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(403).set_body_string("User-Agent required"))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .timeseries(Coordinates { lat: 1.0, lon: 2.0 })
            .await;
        match result {
            Err(UpstreamError::Network(NetworkError::ServerError { status, message })) => {
                assert_eq!(status, 403);
                assert!(message.contains("User-Agent"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_entry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": { "timeseries": [ { "time": "not-a-time", "data": {} } ] }
            })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .timeseries(Coordinates { lat: 1.0, lon: 2.0 })
            .await;
        assert!(matches!(
            result,
            Err(UpstreamError::Network(NetworkError::InvalidResponse(_)))
        ));
    }
}
