//! Client for the Berlin/Brandenburg `transport.rest` journey API.
//!
//! Key characteristics of the API:
//! - Journeys are returned with walking and transfer legs inline; those legs
//!   carry no `line`
//! - Times are ISO 8601 with an explicit offset, realtime where known
//! - Delays are given in seconds, headways (`cycle`) in seconds as well

mod client;
mod error;
mod mock;
mod types;

pub use client::{VbbClient, VbbConfig};
pub use error::SourceError;
pub use mock::MockSource;
pub use types::{
    RawCycle, RawJourney, RawJourneyBatch, RawLeg, RawLine, RawLineColor, RawLocation, RawRemark,
};
