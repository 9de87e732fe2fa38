//! Board state owned by the refresh loop and the snapshots it publishes.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::board::ModeFilter;
use crate::domain::{Journey, JourneyIdentity, Route};

/// Where the refresh cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Applying,
}

/// A transient message shown for a fixed number of ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub remaining_ticks: u32,
}

/// Immutable view of the board, replaced wholesale on every change.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub route: Route,
    pub journeys: Arc<[Journey]>,
    pub selected: usize,
    pub loading: bool,
    pub phase: Phase,
    pub filters: ModeFilter,
    /// Animation frame counter
    pub frame: u64,
    /// Ticks left on the "just refreshed" pulse
    pub refresh_pulse: u32,
    /// Ticks left on the new-journey highlight
    pub new_highlight: u32,
    pub status: Option<StatusMessage>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl BoardSnapshot {
    /// The journey under the cursor, if any.
    pub fn selected_journey(&self) -> Option<&Journey> {
        self.journeys.get(self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }

    /// Returns true while new journeys should be highlighted.
    pub fn highlight_active(&self) -> bool {
        self.new_highlight > 0
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }
}

/// Mutable state of one board, owned by the coordinator task.
#[derive(Debug)]
pub struct RefreshCycleState {
    pub route: Route,
    pub journeys: Arc<[Journey]>,
    /// Identities from the last applied batch
    pub seen: HashSet<JourneyIdentity>,
    /// Whether a batch has been applied for the current route yet
    pub baseline_seeded: bool,
    pub selected: usize,
    pub loading: bool,
    pub phase: Phase,
    pub filters: ModeFilter,
    pub frame: u64,
    pub refresh_pulse: u32,
    pub new_highlight: u32,
    pub status: Option<StatusMessage>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Bumped on every route change; fetch results are tagged with it
    pub generation: u64,
    /// Generation of the fetch currently in flight
    pub in_flight: Option<u64>,
}

impl RefreshCycleState {
    /// Empty board for a route.
    pub fn new(route: Route, filters: ModeFilter) -> Self {
        Self {
            route,
            journeys: Arc::from(Vec::new()),
            seen: HashSet::new(),
            baseline_seeded: false,
            selected: 0,
            loading: false,
            phase: Phase::Idle,
            filters,
            frame: 0,
            refresh_pulse: 0,
            new_highlight: 0,
            status: None,
            last_updated: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            route: self.route.clone(),
            journeys: Arc::clone(&self.journeys),
            selected: self.selected,
            loading: self.loading,
            phase: self.phase,
            filters: self.filters.clone(),
            frame: self.frame,
            refresh_pulse: self.refresh_pulse,
            new_highlight: self.new_highlight,
            status: self.status.clone(),
            last_updated: self.last_updated,
        }
    }

    /// Returns true if a fetch for the current route is in flight.
    pub fn fetch_pending(&self) -> bool {
        self.in_flight == Some(self.generation)
    }

    /// Advance the animation clock by one tick.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.refresh_pulse = self.refresh_pulse.saturating_sub(1);
        self.new_highlight = self.new_highlight.saturating_sub(1);

        if let Some(status) = &mut self.status {
            status.remaining_ticks = status.remaining_ticks.saturating_sub(1);
            if status.remaining_ticks == 0 {
                self.status = None;
            }
        }
    }

    /// Switch to another route.
    ///
    /// The current journeys stay visible until the new route's first
    /// batch lands; novelty starts over from an empty baseline.
    pub fn change_route(&mut self, route: Route) {
        self.route = route;
        self.generation += 1;
        self.seen.clear();
        self.baseline_seeded = false;
    }

    pub fn show_status(&mut self, text: impl Into<String>, ticks: u32) {
        self.status = Some(StatusMessage {
            text: text.into(),
            remaining_ticks: ticks,
        });
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.journeys.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the cursor, clamped to the list.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.journeys.len().saturating_sub(1));
    }
}
