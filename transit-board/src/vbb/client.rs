//! Journey API HTTP client.
//!
//! Provides async methods for the `transport.rest` station search and
//! journey endpoints. Every request is bounded by the configured timeout.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::Station;
use crate::source::JourneySource;

use super::error::SourceError;
use super::types::{RawJourneyBatch, RawLocation};

/// Default base URL for the Berlin/Brandenburg API.
const DEFAULT_BASE_URL: &str = "https://v6.vbb.transport.rest";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the journey API client.
#[derive(Debug, Clone)]
pub struct VbbConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of transfers per journey
    pub max_transfers: u8,
    /// Number of journeys to request
    pub max_results: u8,
    /// Number of station search results to request
    pub search_results: u8,
}

impl VbbConfig {
    /// Set a custom base URL (for testing or another region).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of journeys requested per refresh.
    pub fn with_max_results(mut self, n: u8) -> Self {
        self.max_results = n;
        self
    }
}

impl Default for VbbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_transfers: 3,
            max_results: 25,
            search_results: 10,
        }
    }
}

/// Journey API client.
#[derive(Debug, Clone)]
pub struct VbbClient {
    http: reqwest::Client,
    config: VbbConfig,
}

impl VbbClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VbbConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Search for stops matching `query`.
    ///
    /// Only locations of type "stop" are returned.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<Station>, SourceError> {
        let url = format!("{}/locations", self.config.base_url);
        let locations: Vec<RawLocation> = self
            .get_json(
                &url,
                &[
                    ("query", query.to_string()),
                    ("results", self.config.search_results.to_string()),
                ],
            )
            .await?;

        Ok(stops_from_locations(locations))
    }

    /// Fetch journeys between two station ids.
    pub async fn fetch_raw(
        &self,
        origin_id: &str,
        dest_id: &str,
    ) -> Result<RawJourneyBatch, SourceError> {
        let url = format!("{}/journeys", self.config.base_url);
        let batch: RawJourneyBatch = self
            .get_json(
                &url,
                &[
                    ("from", origin_id.to_string()),
                    ("to", dest_id.to_string()),
                    ("transfers", self.config.max_transfers.to_string()),
                    ("results", self.config.max_results.to_string()),
                    ("remarks", "true".to_string()),
                ],
            )
            .await?;

        debug!(
            origin = origin_id,
            dest = dest_id,
            journeys = batch.journeys.len(),
            "fetched journeys"
        );

        Ok(batch)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(SourceError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
        })
    }
}

impl JourneySource for VbbClient {
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, SourceError> {
        VbbClient::search_stations(self, query).await
    }

    async fn fetch_raw(&self, origin_id: &str, dest_id: &str) -> Result<RawJourneyBatch, SourceError> {
        VbbClient::fetch_raw(self, origin_id, dest_id).await
    }
}

/// Keep only boardable stops that carry both an id and a name.
fn stops_from_locations(locations: Vec<RawLocation>) -> Vec<Station> {
    locations
        .into_iter()
        .filter(|loc| loc.kind.as_deref() == Some("stop"))
        .filter_map(|loc| {
            Some(Station {
                id: loc.id?,
                name: loc.name?,
                kind: "stop".to_string(),
            })
        })
        .collect()
}
