//! Domain layer: wire-level game types and pure display helpers.

pub mod cards_display;
pub mod cards_types;
pub mod modes;
pub mod round_summary;
pub mod seating;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use modes::GameMode;
pub use snapshot::{
    GameSnapshot, GameStatus, LastAction, Placement, Player, RoundEndReason, RoundResult,
    Timestamp, UserId,
};
