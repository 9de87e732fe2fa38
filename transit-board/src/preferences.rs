//! User preferences persisted as JSON in the home directory.
//!
//! Holds the saved favorite routes and the last route shown. Loading never
//! fails: a missing or unreadable file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::domain::{Route, Station};

/// File name used under the home directory.
pub const DEFAULT_FILE_NAME: &str = ".commute_favorites.json";

/// Error type for persisting preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine home directory")]
    NoHomeDir,
}

pub fn default_origin() -> Station {
    Station::new("900180001", "S Köpenick (Berlin)")
}

pub fn default_dest() -> Station {
    Station::new("900100041", "Brunnenstr./Invalidenstr. (Berlin)")
}

/// Result of adding the current route to the favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    AlreadyPresent,
}

impl FavoriteOutcome {
    /// Status line shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            FavoriteOutcome::Added => "★ Added to favorites!",
            FavoriteOutcome::AlreadyPresent => "Already in favorites",
        }
    }
}

/// Saved favorites and the last route used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(deserialize_with = "null_as_empty")]
    pub routes: Vec<Route>,
    pub last_origin: Station,
    pub last_dest: Station,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            last_origin: default_origin(),
            last_dest: default_dest(),
        }
    }
}

/// Older files store an empty favorites list as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Route>, D::Error> {
    Ok(Option::<Vec<Route>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Preferences {
    /// The route currently shown.
    pub fn current_route(&self) -> Route {
        Route::new(self.last_origin.clone(), self.last_dest.clone())
    }

    pub fn set_route(&mut self, route: Route) {
        self.last_origin = route.origin;
        self.last_dest = route.dest;
    }

    /// Swap origin and destination, returning the new route.
    pub fn reverse(&mut self) -> Route {
        std::mem::swap(&mut self.last_origin, &mut self.last_dest);
        self.current_route()
    }

    /// Save the current route as a favorite unless the same station pair
    /// is already saved.
    pub fn add_favorite(&mut self) -> FavoriteOutcome {
        let current = self.current_route();
        if self.routes.iter().any(|r| r.same_stations(&current)) {
            return FavoriteOutcome::AlreadyPresent;
        }
        self.routes.push(current);
        FavoriteOutcome::Added
    }

    /// Remove a favorite by position.
    pub fn remove_favorite(&mut self, index: usize) -> Option<Route> {
        (index < self.routes.len()).then(|| self.routes.remove(index))
    }

    /// Make a favorite the current route and return it.
    pub fn use_favorite(&mut self, index: usize) -> Option<Route> {
        let route = self.routes.get(index)?.clone();
        self.set_route(route.clone());
        Some(route)
    }
}

/// Reads and writes the preferences file.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.commute_favorites.json`.
    pub fn in_home_dir() -> Result<Self, PreferencesError> {
        let home = dirs::home_dir().ok_or(PreferencesError::NoHomeDir)?;
        Ok(Self::new(home.join(DEFAULT_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, falling back to defaults on any failure.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(&self) -> Preferences {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no preferences file, using defaults");
                return Preferences::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
            Preferences::default()
        })
    }

    /// Write preferences, creating parent directories if needed.
    pub fn save(&self, prefs: &Preferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Save, logging instead of failing.
    pub fn save_or_warn(&self, prefs: &Preferences) {
        if let Err(e) = self.save(prefs) {
            warn!(path = %self.path.display(), error = %e, "failed to save preferences");
        }
    }
}
