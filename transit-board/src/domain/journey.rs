//! Journey types.
//!
//! A `Journey` is one suggested trip from origin to destination: an ordered,
//! non-empty list of legs together with the timing derived from them.

use chrono::Duration;

use super::{DomainError, Leg, Timestamp};

/// Key used to recognise the same journey across refresh cycles.
///
/// Made of the departure time (RFC 3339) and the first leg's line name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JourneyIdentity {
    departs: String,
    line: String,
}

impl JourneyIdentity {
    pub fn new(depart_at: &Timestamp, line: impl Into<String>) -> Self {
        Self {
            departs: depart_at.to_rfc3339(),
            line: line.into(),
        }
    }
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - `depart_at <= arrive_at`
/// - `arrive_at` is the last leg's arrival
/// - `total_wait` is the sum of every leg's `wait_before`
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    depart_at: Timestamp,
    arrive_at: Timestamp,
    total_wait: Duration,
    legs: Vec<Leg>,
    is_new: bool,
}

impl Journey {
    /// Constructs a journey from built legs.
    ///
    /// `depart_at` is passed separately because the journey may start with
    /// a walk, in which case it precedes the first leg's departure.
    ///
    /// New journeys start out flagged as new; the novelty detector decides
    /// the final value each cycle.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or the journey would arrive before
    /// it departs.
    pub fn new(depart_at: Timestamp, legs: Vec<Leg>) -> Result<Self, DomainError> {
        let last = legs.last().ok_or(DomainError::EmptyJourney)?;
        let arrive_at = last.arrival;

        if depart_at > arrive_at {
            return Err(DomainError::DepartsAfterArrival {
                depart: depart_at,
                arrive: arrive_at,
            });
        }

        let total_wait = legs.iter().map(|l| l.wait_before).sum();

        Ok(Self {
            depart_at,
            arrive_at,
            total_wait,
            legs,
            is_new: true,
        })
    }

    /// Returns the departure time.
    pub fn depart_at(&self) -> Timestamp {
        self.depart_at
    }

    /// Returns the arrival time at the destination.
    pub fn arrive_at(&self) -> Timestamp {
        self.arrive_at
    }

    /// Returns the door-to-door duration.
    pub fn total_duration(&self) -> Duration {
        self.arrive_at.signed_duration_since(self.depart_at)
    }

    /// Returns the total time spent waiting between legs.
    pub fn total_wait(&self) -> Duration {
        self.total_wait
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the first leg.
    pub fn first_leg(&self) -> &Leg {
        // Non-empty by construction
        &self.legs[0]
    }

    /// Returns true if this journey was absent from the previous refresh.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }

    /// Returns the key used for novelty detection.
    pub fn identity(&self) -> JourneyIdentity {
        JourneyIdentity::new(&self.depart_at, self.first_leg().line_name.clone())
    }
}
