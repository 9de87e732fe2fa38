//! Origin/destination pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Station;

/// A route between two stations.
///
/// Serialized as `{"origin": ..., "dest": ...}`, the shape used for
/// favorites in the preferences file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub origin: Station,
    pub dest: Station,
}

impl Route {
    pub fn new(origin: Station, dest: Station) -> Self {
        Self { origin, dest }
    }

    /// The same route travelled the other way.
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.dest.clone(),
            dest: self.origin.clone(),
        }
    }

    /// Returns true if both ends match by station id.
    pub fn same_stations(&self, other: &Route) -> bool {
        self.origin.id == other.origin.id && self.dest.id == other.dest.id
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.dest)
    }
}
