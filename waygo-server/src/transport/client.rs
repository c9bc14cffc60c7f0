//! TransportAPI HTTP client.
//!
//! Provides async methods for querying nearby bus stops and live
//! departures. Handles authentication, concurrency limiting and
//! conversion to domain types.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{AtcoCode, Coordinates, Departure, Stop};

use super::convert::{convert_live_departures, convert_places};
use super::error::TransportError;
use super::types::{LiveDeparturesResponse, PlacesResponse};

/// Default base URL for TransportAPI UK.
const DEFAULT_BASE_URL: &str = "https://transportapi.com/v3/uk";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Source of stop and departure data.
///
/// Implemented by [`TransportClient`] for the real API; tests substitute
/// their own.
#[async_trait]
pub trait StopDirectory: Send + Sync {
    /// Bus stops near a point, nearest first.
    async fn nearby_stops(&self, at: Coordinates) -> Result<Vec<Stop>, TransportError>;

    /// Upcoming departures from a stop.
    async fn live_departures(&self, stop: &AtcoCode) -> Result<Vec<Departure>, TransportError>;
}

/// Configuration for the TransportAPI client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Application id, sent as the `app_id` query parameter
    pub app_id: String,
    /// Application key, sent as the `app_key` query parameter
    pub app_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportConfig {
    /// Create a new config with the given credentials.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// TransportAPI client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
    semaphore: Arc<Semaphore>,
}

impl TransportClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id,
            app_key: config.app_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch nearby bus stops.
    ///
    /// Fails with [`TransportError::NoData`] if the response carries no
    /// member list. An empty list is a valid answer.
    pub async fn fetch_nearby_stops(&self, at: Coordinates) -> Result<Vec<Stop>, TransportError> {
        let places: PlacesResponse = self
            .get_json(
                "places.json",
                &[
                    ("type", "bus_stop".to_string()),
                    ("lat", at.lat().to_string()),
                    ("lon", at.lon().to_string()),
                ],
            )
            .await?;

        convert_places(&places).ok_or(TransportError::NoData("member list"))
    }

    /// Fetch live departures for a stop.
    pub async fn fetch_live_departures(
        &self,
        stop: &AtcoCode,
    ) -> Result<Vec<Departure>, TransportError> {
        let path = format!("bus/stop/{}/live.json", stop.as_str());
        let live: LiveDeparturesResponse = self.get_json(&path, &[]).await?;
        Ok(convert_live_departures(&live))
    }

    /// GET `{base_url}/{path}` with credentials appended and decode JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransportError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "TransportAPI request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("app_id", &self.app_id), ("app_key", &self.app_key)])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TransportError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransportError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[async_trait]
impl StopDirectory for TransportClient {
    async fn nearby_stops(&self, at: Coordinates) -> Result<Vec<Stop>, TransportError> {
        self.fetch_nearby_stops(at).await
    }

    async fn live_departures(&self, stop: &AtcoCode) -> Result<Vec<Departure>, TransportError> {
        self.fetch_live_departures(stop).await
    }
}
