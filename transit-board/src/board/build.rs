//! Journey builder.
//!
//! Turns a raw journey batch into validated, ordered `Journey` values.
//! Malformed legs and journeys are dropped individually; one bad record
//! never fails the whole batch.

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use crate::domain::{DomainError, Journey, Leg, Occupancy, TimeError, Timestamp, parse_timestamp};
use crate::vbb::{RawJourney, RawJourneyBatch, RawLeg, RawLine, RawLocation, RawRemark};

/// Transport modes the API reports.
pub const KNOWN_PRODUCTS: [&str; 7] = [
    "suburban", "subway", "tram", "bus", "ferry", "regional", "express",
];

/// Reason a leg or journey was dropped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("line has no name")]
    MissingLineName,

    #[error("bad departure: {0}")]
    BadDeparture(TimeError),

    #[error("bad arrival: {0}")]
    BadArrival(TimeError),

    #[error("arrives before it departs")]
    ArrivesBeforeDeparture,

    #[error("journey start: {0}")]
    BadJourneyStart(TimeError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Per-mode enable flags.
///
/// Modes absent from the mapping are unrestricted; an empty filter lets
/// everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeFilter {
    modes: HashMap<String, bool>,
}

impl ModeFilter {
    /// A filter that restricts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter with every known mode explicitly enabled.
    pub fn all_enabled() -> Self {
        KNOWN_PRODUCTS.iter().map(|p| (p.to_string(), true)).collect()
    }

    /// Enable or disable a mode.
    pub fn set(&mut self, mode: impl Into<String>, enabled: bool) {
        self.modes.insert(mode.into(), enabled);
    }

    /// Builder-style `set`.
    pub fn with(mut self, mode: impl Into<String>, enabled: bool) -> Self {
        self.set(mode, enabled);
        self
    }

    /// Returns false only if `mode` is explicitly disabled.
    pub fn allows(&self, mode: &str) -> bool {
        self.modes.get(mode).copied().unwrap_or(true)
    }

    /// Returns true if every leg of the journey uses an allowed mode.
    pub fn permits(&self, journey: &Journey) -> bool {
        self.modes.is_empty() || journey.legs().iter().all(|l| self.allows(&l.product))
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl FromIterator<(String, bool)> for ModeFilter {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            modes: iter.into_iter().collect(),
        }
    }
}

/// Build, filter and order the journeys in a raw batch.
///
/// The result is sorted by departure, ties broken by the smaller total
/// wait, so index 0 is always the soonest and best option.
pub fn build_journeys(batch: &RawJourneyBatch, filter: &ModeFilter) -> Vec<Journey> {
    let mut journeys: Vec<Journey> = batch
        .journeys
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| match build_journey(raw) {
            Ok(journey) => Some(journey),
            Err(e) => {
                debug!(journey = idx, error = %e, "dropping journey");
                None
            }
        })
        .filter(|journey| filter.permits(journey))
        .collect();

    sort_journeys(&mut journeys);
    journeys
}

/// Sort by departure, then by total wait. Stable for full ties.
pub fn sort_journeys(journeys: &mut [Journey]) {
    journeys.sort_by(|a, b| {
        a.depart_at()
            .cmp(&b.depart_at())
            .then_with(|| a.total_wait().cmp(&b.total_wait()))
    });
}

/// Build a single journey from its raw legs.
pub fn build_journey(raw: &RawJourney) -> Result<Journey, BuildError> {
    let mut legs = Vec::with_capacity(raw.legs.len());
    let mut prev_arrival: Option<Timestamp> = None;

    for (idx, raw_leg) in raw.legs.iter().enumerate() {
        let Some(line) = &raw_leg.line else {
            // Walk or transfer: no leg, but it moves the reference arrival
            if let Some(arr) = raw_leg.arrival.as_deref().and_then(|s| parse_timestamp(s).ok()) {
                prev_arrival = Some(arr);
            }
            continue;
        };

        match build_leg(raw_leg, line, prev_arrival) {
            Ok(leg) => {
                prev_arrival = Some(leg.arrival);
                legs.push(leg);
            }
            Err(e) => debug!(leg = idx, error = %e, "dropping leg"),
        }
    }

    if legs.is_empty() {
        return Err(DomainError::EmptyJourney.into());
    }

    // The first raw leg may be a walk to the first stop
    let first_departure = raw
        .legs
        .first()
        .and_then(|l| l.departure.as_deref())
        .unwrap_or_default();
    let depart_at = parse_timestamp(first_departure).map_err(BuildError::BadJourneyStart)?;

    Ok(Journey::new(depart_at, legs)?)
}

/// Build one leg on a line.
fn build_leg(
    raw: &RawLeg,
    line: &RawLine,
    prev_arrival: Option<Timestamp>,
) -> Result<Leg, BuildError> {
    let line_name = line
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or(BuildError::MissingLineName)?;

    let departure =
        parse_timestamp(raw.departure.as_deref().unwrap_or_default()).map_err(BuildError::BadDeparture)?;
    let arrival =
        parse_timestamp(raw.arrival.as_deref().unwrap_or_default()).map_err(BuildError::BadArrival)?;

    if arrival < departure {
        return Err(BuildError::ArrivesBeforeDeparture);
    }

    let wait_before = match prev_arrival {
        Some(prev) if departure > prev => departure.signed_duration_since(prev),
        _ => Duration::zero(),
    };

    Ok(Leg {
        line_name: line_name.to_string(),
        product: line.product.clone().unwrap_or_default(),
        origin_name: location_name(raw.origin.as_ref()),
        dest_name: location_name(raw.destination.as_ref()),
        departure,
        arrival,
        wait_before,
        departure_delay_secs: raw.departure_delay.unwrap_or(0),
        arrival_delay_secs: raw.arrival_delay.unwrap_or(0),
        occupancy: parse_occupancy(&raw.remarks),
        service_warnings: parse_service_warnings(&raw.remarks),
        departure_platform: pick_platform(
            raw.departure_platform.as_deref(),
            raw.planned_departure_platform.as_deref(),
        ),
        arrival_platform: pick_platform(
            raw.arrival_platform.as_deref(),
            raw.planned_arrival_platform.as_deref(),
        ),
        repeat_interval_mins: raw
            .cycle
            .as_ref()
            .and_then(|c| c.min)
            .map(|secs| secs.div_euclid(60))
            .unwrap_or(0),
        line_color: line
            .color
            .as_ref()
            .and_then(|c| c.bg.clone())
            .filter(|bg| !bg.is_empty()),
        trip_id: raw.trip_id.clone().unwrap_or_default(),
    })
}

fn location_name(loc: Option<&RawLocation>) -> String {
    loc.and_then(|l| l.name.clone()).unwrap_or_default()
}

/// Prefer the realized platform, fall back to the planned one.
fn pick_platform(realized: Option<&str>, planned: Option<&str>) -> Option<String> {
    realized
        .filter(|p| !p.is_empty())
        .or(planned.filter(|p| !p.is_empty()))
        .map(str::to_string)
}

/// Classify occupancy from remarks.
///
/// The first occupancy remark carrying a keyword decides. Within a remark
/// "low" is checked before "medium"/"moderate", which is checked before
/// "high".
pub fn parse_occupancy(remarks: &[RawRemark]) -> Option<Occupancy> {
    remarks.iter().find_map(|r| {
        let code = r.code.as_deref().unwrap_or_default().to_lowercase();
        let text = r.text.as_deref().unwrap_or_default().to_lowercase();

        if !code.contains("occup") && !text.contains("occupancy") {
            return None;
        }

        if text.contains("low") {
            Some(Occupancy::Low)
        } else if text.contains("medium") || text.contains("moderate") {
            Some(Occupancy::Medium)
        } else if text.contains("high") {
            Some(Occupancy::High)
        } else {
            None
        }
    })
}

/// Collect non-empty warning and status remarks in order.
pub fn parse_service_warnings(remarks: &[RawRemark]) -> Vec<String> {
    remarks
        .iter()
        .filter(|r| {
            r.kind
                .as_deref()
                .is_some_and(|k| k.eq_ignore_ascii_case("warning") || k.eq_ignore_ascii_case("status"))
        })
        .filter_map(|r| r.text.as_deref())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
