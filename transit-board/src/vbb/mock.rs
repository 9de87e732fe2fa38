//! Offline journey source for running without network access.
//!
//! Loads journey batches from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::Station;
use crate::source::JourneySource;

use super::error::SourceError;
use super::types::RawJourneyBatch;

/// File listing the stations offered by station search.
const STATIONS_FILE: &str = "stations.json";

/// Journey source that serves data from JSON fixture files.
///
/// Expects a directory containing `stations.json` (an array of stations)
/// and one `{origin}-{dest}.json` journey batch per route, e.g.
/// `900180001-900100041.json`.
#[derive(Clone)]
pub struct MockSource {
    stations: Arc<Vec<Station>>,
    batches: Arc<HashMap<(String, String), RawJourneyBatch>>,
}

impl MockSource {
    /// Create a new mock source by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let data_dir = data_dir.as_ref();
        let mut stations = Vec::new();
        let mut batches = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            SourceError::Fixture(format!("failed to read {}: {e}", data_dir.display()))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| SourceError::Fixture(format!("failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let json = std::fs::read_to_string(&path)
                .map_err(|e| SourceError::Fixture(format!("failed to read {}: {e}", path.display())))?;

            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
            if name == STATIONS_FILE {
                stations = serde_json::from_str(&json).map_err(|e| SourceError::Json {
                    message: format!("{}: {e}", path.display()),
                })?;
                continue;
            }

            // "{origin}-{dest}.json"
            let Some((origin, dest)) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.split_once('-'))
            else {
                continue;
            };

            let batch: RawJourneyBatch = serde_json::from_str(&json).map_err(|e| SourceError::Json {
                message: format!("{}: {e}", path.display()),
            })?;

            batches.insert((origin.to_string(), dest.to_string()), batch);
        }

        if batches.is_empty() {
            return Err(SourceError::Fixture(format!(
                "no journey files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            stations: Arc::new(stations),
            batches: Arc::new(batches),
        })
    }

    /// Number of routes with fixture data.
    pub fn route_count(&self) -> usize {
        self.batches.len()
    }
}

impl JourneySource for MockSource {
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, SourceError> {
        let needle = query.to_lowercase();
        Ok(self
            .stations
            .iter()
            .filter(|s| s.is_stop() && s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn fetch_raw(&self, origin_id: &str, dest_id: &str) -> Result<RawJourneyBatch, SourceError> {
        self.batches
            .get(&(origin_id.to_string(), dest_id.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::Fixture(format!("no journeys for {origin_id}-{dest_id}")))
    }
}
