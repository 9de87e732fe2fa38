//! Station type.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A transit station as returned by the station search.
///
/// Two stations are the same station when their ids match; the display name
/// and kind are carried along for presentation only.
#[derive(Clone, Serialize, Deserialize)]
pub struct Station {
    /// Provider station id (e.g. "900100003")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Location kind reported by the provider ("stop", "station", ...)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl Station {
    /// Create a station of kind "stop".
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: "stop".to_string(),
        }
    }

    /// Returns true if this location is a boardable stop.
    pub fn is_stop(&self) -> bool {
        self.kind == "stop"
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({} {:?})", self.id, self.name)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
