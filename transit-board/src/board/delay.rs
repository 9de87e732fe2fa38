//! Per-line delay history.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::Journey;

/// Samples kept per line.
pub const MAX_SAMPLES: usize = 20;

/// Recent departure delays observed on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayHistory {
    pub line_name: String,
    /// Delays in whole minutes, oldest first
    pub recent_delays_mins: VecDeque<i64>,
    pub last_updated: DateTime<Utc>,
}

impl DelayHistory {
    fn new(line_name: &str) -> Self {
        Self {
            line_name: line_name.to_string(),
            recent_delays_mins: VecDeque::with_capacity(MAX_SAMPLES),
            last_updated: Utc::now(),
        }
    }

    fn push(&mut self, mins: i64) {
        if self.recent_delays_mins.len() == MAX_SAMPLES {
            self.recent_delays_mins.pop_front();
        }
        self.recent_delays_mins.push_back(mins);
        self.last_updated = Utc::now();
    }
}

/// Thread-safe delay history shared between the refresh loop and readers.
///
/// All mutation happens under the write lock, so readers never see a
/// partially appended list.
#[derive(Debug, Clone, Default)]
pub struct DelayHistoryTracker {
    inner: Arc<RwLock<HashMap<String, DelayHistory>>>,
}

impl DelayHistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the delays of a fresh batch into the history.
    ///
    /// Every leg departing late appends its delay in whole minutes to its
    /// line. Returns the number of samples appended.
    pub async fn record(&self, journeys: &[Journey]) -> usize {
        let mut guard = self.inner.write().await;
        let mut appended = 0;

        for leg in journeys.iter().flat_map(Journey::legs) {
            if !leg.is_delayed() {
                continue;
            }
            guard
                .entry(leg.line_name.clone())
                .or_insert_with(|| DelayHistory::new(&leg.line_name))
                .push(leg.departure_delay_mins());
            appended += 1;
        }

        appended
    }

    /// Copy of the recent samples for a line, oldest first.
    ///
    /// Unknown lines yield an empty list.
    pub async fn snapshot(&self, line_name: &str) -> Vec<i64> {
        let guard = self.inner.read().await;
        guard
            .get(line_name)
            .map(|h| h.recent_delays_mins.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Full copy of a line's history, including when it last changed.
    pub async fn history(&self, line_name: &str) -> Option<DelayHistory> {
        let guard = self.inner.read().await;
        guard.get(line_name).cloned()
    }

    /// Number of lines with at least one sample.
    pub async fn line_count(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}
