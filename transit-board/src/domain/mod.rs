//! Domain types for the transit board.
//!
//! These types represent journeys that have already been validated by the
//! builder. Invariants are enforced at construction time, so code that
//! receives a `Journey` can trust that it has legs and sane times.

mod error;
mod journey;
mod leg;
mod route;
mod station;
mod time;

pub use error::DomainError;
pub use journey::{Journey, JourneyIdentity};
pub use leg::{Leg, Occupancy};
pub use route::Route;
pub use station::Station;
pub use time::{TimeError, Timestamp, format_clock, parse_timestamp};

#[cfg(test)]
pub(crate) use leg::test_support;
