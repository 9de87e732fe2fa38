//! Transit leg type.
//!
//! A `Leg` is one boarded segment on a single line. Walks and transfers are
//! not legs; they only influence the wait time of the following leg.

use std::fmt;

use chrono::Duration;

use super::Timestamp;

/// Waits at or below this are flagged as tight connections.
const TIGHT_CONNECTION_MINS: i64 = 2;

/// Reported vehicle occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Occupancy {
    Low,
    Medium,
    High,
}

impl Occupancy {
    /// Returns the lowercase keyword for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupancy::Low => "low",
            Occupancy::Medium => "medium",
            Occupancy::High => "high",
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leg of a journey (one line, one vehicle).
///
/// # Invariants
///
/// - `arrival >= departure`
/// - `wait_before >= 0`
///
/// Both are upheld by the journey builder, which drops legs that would
/// violate them.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Line name as shown on the vehicle (e.g. "S3", "M10")
    pub line_name: String,
    /// Transport mode (e.g. "suburban", "tram", "bus")
    pub product: String,
    /// Boarding stop name
    pub origin_name: String,
    /// Alighting stop name
    pub dest_name: String,
    /// Departure time (realtime where available)
    pub departure: Timestamp,
    /// Arrival time (realtime where available)
    pub arrival: Timestamp,
    /// Idle time between the previous arrival and this departure
    pub wait_before: Duration,
    /// Departure delay in seconds, as reported
    pub departure_delay_secs: i64,
    /// Arrival delay in seconds, as reported
    pub arrival_delay_secs: i64,
    /// Occupancy parsed from remarks
    pub occupancy: Option<Occupancy>,
    /// Service warnings in the order reported
    pub service_warnings: Vec<String>,
    /// Departure platform (realized, else planned)
    pub departure_platform: Option<String>,
    /// Arrival platform (realized, else planned)
    pub arrival_platform: Option<String>,
    /// Headway of the line in whole minutes, 0 when unknown
    pub repeat_interval_mins: i64,
    /// Line background colour (e.g. "#008d4f")
    pub line_color: Option<String>,
    /// Provider trip id
    pub trip_id: String,
}

impl Leg {
    /// Returns the in-vehicle duration.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Departure delay in whole minutes, truncated toward zero.
    pub fn departure_delay_mins(&self) -> i64 {
        self.departure_delay_secs / 60
    }

    /// Arrival delay in whole minutes, truncated toward zero.
    pub fn arrival_delay_mins(&self) -> i64 {
        self.arrival_delay_secs / 60
    }

    /// Returns true if the departure is reported late.
    pub fn is_delayed(&self) -> bool {
        self.departure_delay_secs > 0
    }

    /// Returns true if the change onto this leg leaves two minutes or less.
    pub fn is_tight_connection(&self) -> bool {
        self.wait_before > Duration::zero()
            && self.wait_before <= Duration::minutes(TIGHT_CONNECTION_MINS)
    }

    /// Returns true if this leg carries any service warning.
    pub fn has_warnings(&self) -> bool {
        !self.service_warnings.is_empty()
    }

    /// Fraction of the leg completed at `now`, if the vehicle is under way.
    pub fn progress_at(&self, now: &Timestamp) -> Option<f64> {
        if now <= &self.departure || now >= &self.arrival {
            return None;
        }
        let total = self.duration().num_milliseconds();
        if total <= 0 {
            return None;
        }
        let elapsed = now.signed_duration_since(self.departure).num_milliseconds();
        Some(elapsed as f64 / total as f64)
    }
}
