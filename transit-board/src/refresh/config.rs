//! Refresh loop configuration.

use std::time::Duration;

/// Shortest period accepted for either timer.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Timing configuration for the refresh/animation loop.
///
/// Counters (`*_ticks`) are measured in animation ticks. Periods below
/// `MIN_INTERVAL` are raised to it.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Period of the automatic refresh.
    pub refresh_interval: Duration,

    /// Period of the animation clock.
    pub tick_interval: Duration,

    /// How long new journeys stay highlighted.
    pub highlight_ticks: u32,

    /// How long the "just refreshed" pulse lasts.
    pub pulse_ticks: u32,

    /// How long a status message stays visible.
    pub status_ticks: u32,

    /// Highlight journeys on the very first successful refresh.
    /// When false the first refresh only seeds the baseline.
    pub highlight_first_cycle: bool,
}

impl BoardConfig {
    /// Set the automatic refresh period.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval.max(MIN_INTERVAL);
        self
    }

    /// Set the animation tick period.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(MIN_INTERVAL);
        self
    }

    /// Set the new-journey highlight length.
    pub fn with_highlight_ticks(mut self, ticks: u32) -> Self {
        self.highlight_ticks = ticks;
        self
    }

    /// Enable or disable highlighting on the first refresh.
    pub fn with_highlight_first_cycle(mut self, enabled: bool) -> Self {
        self.highlight_first_cycle = enabled;
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            tick_interval: Duration::from_millis(100), // 10 Hz
            highlight_ticks: 30,
            pulse_ticks: 5,
            status_ticks: 30,
            highlight_first_cycle: false,
        }
    }
}
