//! Live refresh of the journey board.
//!
//! A single coordinator task owns the board state and publishes immutable
//! snapshots through a `watch` channel. Readers never lock; they clone the
//! current `Arc<BoardSnapshot>`.

mod config;
mod coordinator;
mod state;

pub use config::{BoardConfig, MIN_INTERVAL};
pub use coordinator::{BoardClosed, BoardHandle, Command, Coordinator};
pub use state::{BoardSnapshot, Phase, RefreshCycleState, StatusMessage};
