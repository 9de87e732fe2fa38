//! The seam between the board and whatever supplies journey data.
//!
//! The coordinator only ever talks to a `JourneySource`, so it can be driven
//! by the live API, offline fixtures, or scripted sources in tests.

use std::future::Future;

use crate::domain::Station;
use crate::vbb::{RawJourneyBatch, SourceError};

/// Provider of station search results and raw journey batches.
pub trait JourneySource: Send + Sync + 'static {
    /// Resolve a free-text query to candidate stations.
    fn search_stations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Station>, SourceError>> + Send;

    /// Fetch the raw journey batch between two station ids.
    ///
    /// Implementations must return an error rather than hang when the
    /// provider does not answer.
    fn fetch_raw(
        &self,
        origin_id: &str,
        dest_id: &str,
    ) -> impl Future<Output = Result<RawJourneyBatch, SourceError>> + Send;
}
