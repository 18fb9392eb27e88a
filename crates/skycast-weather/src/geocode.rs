//! Forward geocoding: convert a city name to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use skycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::UpstreamError;
use crate::types::Coordinates;

/// Resolves free-text place names to coordinates
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// First match for `query`, or `None` when nothing matched
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(deserialize_with = "coordinate")]
    lat: f64,
    #[serde(deserialize_with = "coordinate")]
    lon: f64,
    #[serde(default)]
    display_name: Option<String>,
}

/// Nominatim sends coordinates as strings; accept plain numbers too
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Nominatim search client
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Arc<Client>,
    base_url: String,
}

impl NominatimClient {
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
            &config.geocode_url,
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl LocationResolver for NominatimClient {
    #[instrument(skip(self), level = "info")]
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>, UpstreamError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Geocode returned status {}", status);
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
        let places: Vec<NominatimPlace> = serde_json::from_str(&body)
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        let Some(place) = places.into_iter().next() else {
            tracing::info!("No geocoding match for {:?}", query);
            return Ok(None);
        };

        tracing::info!(
            "Geocoded {:?} to {}, {} ({})",
            query,
            place.lat,
            place.lon,
            place.display_name.as_deref().unwrap_or("unnamed")
        );
        Ok(Some(Coordinates {
            lat: place.lat,
            lon: place.lon,
        }))
    }
}
