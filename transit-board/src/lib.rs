//! Live transit journey board.
//!
//! Keeps a continuously refreshed list of upcoming journeys between two
//! stations: departure countdowns, per-line delay trends, connection risk
//! and which journeys appeared since the last refresh.

pub mod board;
pub mod cache;
pub mod domain;
pub mod preferences;
pub mod refresh;
pub mod source;
pub mod vbb;
pub mod view;
