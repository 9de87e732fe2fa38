//! Caching layer for station search.
//!
//! Station search is typed interactively, so the same prefixes are looked up
//! again and again. Results are cached per normalized query for a few
//! minutes. Journey fetches always go to the source; they are the live data.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Station;
use crate::source::JourneySource;
use crate::vbb::{RawJourneyBatch, SourceError};

/// Cached search result entry.
type SearchEntry = Arc<Vec<Station>>;

/// Configuration for the search cache.
#[derive(Debug, Clone)]
pub struct SearchCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for SearchCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 500,
        }
    }
}

/// Normalize a query so that trivially different spellings share an entry.
fn cache_key(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Journey source with cached station search.
///
/// Wraps any `JourneySource`; only successful searches are cached.
pub struct CachedSource<S> {
    inner: S,
    searches: MokaCache<String, SearchEntry>,
}

impl<S: JourneySource> CachedSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &SearchCacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, searches }
    }

    /// Access the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: JourneySource> JourneySource for CachedSource<S> {
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, SourceError> {
        let key = cache_key(query);

        if let Some(cached) = self.searches.get(&key).await {
            trace!(query = %key, "station search cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.search_stations(query).await?;
        self.searches.insert(key, Arc::new(stations.clone())).await;

        Ok(stations)
    }

    async fn fetch_raw(&self, origin_id: &str, dest_id: &str) -> Result<RawJourneyBatch, SourceError> {
        self.inner.fetch_raw(origin_id, dest_id).await
    }
}
