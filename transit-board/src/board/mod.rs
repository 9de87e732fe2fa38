//! Journey board core.
//!
//! Pure transformations from a raw journey batch to the list the board
//! shows, plus the per-line delay history that survives across refreshes.
//!
//! - `build`: raw batch to validated, filtered, ordered journeys
//! - `novelty`: which journeys were not on the board last cycle
//! - `delay`: rolling per-line delay samples behind a lock

mod build;
mod delay;
mod novelty;

pub use build::{
    BuildError, KNOWN_PRODUCTS, ModeFilter, build_journey, build_journeys, parse_occupancy,
    parse_service_warnings, sort_journeys,
};
pub use delay::{DelayHistory, DelayHistoryTracker, MAX_SAMPLES};
pub use novelty::detect;

#[cfg(test)]
pub(crate) use build::test_support;
