//! Novelty detection across refresh cycles.

use std::collections::HashSet;

use crate::domain::{Journey, JourneyIdentity};

/// Mark journeys absent from the previous cycle as new.
///
/// Sets `is_new` on every journey and returns the identity set of this
/// batch, which replaces the previous set wholesale, together with whether
/// any journey was new. An empty `previous` set marks everything new.
pub fn detect(
    journeys: &mut [Journey],
    previous: &HashSet<JourneyIdentity>,
) -> (HashSet<JourneyIdentity>, bool) {
    let mut current = HashSet::with_capacity(journeys.len());
    let mut any_new = false;

    for journey in journeys.iter_mut() {
        let identity = journey.identity();
        let is_new = !previous.contains(&identity);
        journey.set_new(is_new);
        any_new |= is_new;
        current.insert(identity);
    }

    (current, any_new)
}
