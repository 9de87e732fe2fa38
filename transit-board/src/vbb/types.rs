//! Journey API response DTOs.
//!
//! These types map directly to the `transport.rest` JSON responses. They use
//! `Option` liberally because the API omits fields rather than sending null
//! values. A missing field only affects its own leg; a field of the wrong
//! JSON type still fails the whole batch.

use serde::{Deserialize, Serialize};

/// Response from `GET /journeys`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawJourneyBatch {
    /// Suggested journeys in provider order.
    #[serde(default)]
    pub journeys: Vec<RawJourney>,
}

/// One suggested journey.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawJourney {
    /// Legs including walks and transfers.
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

/// A single leg. Walks and transfers have no `line`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    pub origin: Option<RawLocation>,
    pub destination: Option<RawLocation>,

    /// Realtime departure (ISO 8601).
    pub departure: Option<String>,

    /// Realtime arrival (ISO 8601).
    pub arrival: Option<String>,

    /// Line served; absent for walking legs.
    pub line: Option<RawLine>,

    /// Departure delay in seconds.
    pub departure_delay: Option<i64>,

    /// Arrival delay in seconds.
    pub arrival_delay: Option<i64>,

    pub departure_platform: Option<String>,
    pub planned_departure_platform: Option<String>,
    pub arrival_platform: Option<String>,
    pub planned_arrival_platform: Option<String>,

    /// Free-text hints, warnings and status messages.
    #[serde(default)]
    pub remarks: Vec<RawRemark>,

    pub trip_id: Option<String>,

    /// Headway of the line, in seconds.
    pub cycle: Option<RawCycle>,
}

/// A stop or station reference.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLocation {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A transit line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLine {
    pub name: Option<String>,

    /// Transport mode ("suburban", "subway", "tram", "bus", ...).
    pub product: Option<String>,

    pub color: Option<RawLineColor>,
}

/// Line colours as hex strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLineColor {
    pub fg: Option<String>,
    pub bg: Option<String>,
}

/// A remark attached to a leg.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRemark {
    /// "hint", "warning", "status", ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
    pub text: Option<String>,
}

/// Line headway.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCycle {
    /// Minimum headway in seconds (despite the name).
    pub min: Option<i64>,
}
