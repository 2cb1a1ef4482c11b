//! Server-authoritative table snapshot, as pushed over the realtime channel.
//!
//! Snapshots are replaced wholesale on every push. Nothing in the client
//! mutates one in place; every derived view is recomputed from the latest.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::modes::{lenient_mode, GameMode};
use crate::domain::Card;

pub type UserId = String;

/// Epoch milliseconds, as stamped by the server.
pub type Timestamp = i64;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Waiting,
    Starting,
    InProgress,
    RoundEnd,
    GameEnd,
    /// A status this client does not know. Nothing is derived from it.
    #[serde(other)]
    Unknown,
}

impl GameStatus {
    /// Statuses a round can be played or dealt in.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            GameStatus::Waiting | GameStatus::Starting | GameStatus::InProgress
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundEndReason {
    /// A player dropped and held the lowest hand.
    Regular,
    /// Special win.
    Reem,
    /// Automatic resolution on the deal (41 or 11-and-under).
    AutoTriple,
    /// A dropping player was caught with a higher hand.
    CaughtDrop,
    DeckEmpty,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastAction {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub user_id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub spreads: Vec<Vec<Card>>,
    #[serde(default)]
    pub has_taken_action_this_turn: bool,
    #[serde(default)]
    pub current_buy_in: f64,
    #[serde(default, rename = "isAI")]
    pub is_ai: bool,
    #[serde(default)]
    pub is_hit_locked: bool,
    #[serde(default)]
    pub hit_lock_counter: u32,
    #[serde(default)]
    pub has_spread_this_turn: bool,
    #[serde(default)]
    pub number_of_spreads_this_turn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_discard_card: Option<String>,
}

impl Player {
    pub fn new(user_id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            avatar_url: None,
            hand: Vec::new(),
            spreads: Vec::new(),
            has_taken_action_this_turn: false,
            current_buy_in: 0.0,
            is_ai: false,
            is_hit_locked: false,
            hit_lock_counter: 0,
            has_spread_this_turn: false,
            number_of_spreads_this_turn: 0,
            restricted_discard_card: None,
        }
    }
}

/// Full table state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub table_id: String,
    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: GameMode,
    pub status: GameStatus,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    #[serde(default)]
    pub current_player_index: usize,
    #[serde(default)]
    pub current_dealer_index: usize,
    #[serde(default)]
    pub turn: u32,
    #[serde(default)]
    pub last_action: Option<LastAction>,
    #[serde(default)]
    pub round_ended_by: Option<RoundEndReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_winner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_loser_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caught_dropping_player_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_scores: Option<HashMap<UserId, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payouts: Option<HashMap<UserId, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_stake: Option<f64>,
}

impl GameSnapshot {
    /// The player whose turn it is, if the index is in range.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn seat_of(&self, user_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.user_id == user_id)
    }

    pub fn username_of(&self, user_id: &str) -> Option<&str> {
        self.player(user_id).map(|p| p.username.as_str())
    }

    pub fn top_of_discard(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Anchor for round-end timing: the last applied action's timestamp.
    pub fn anchor_timestamp(&self) -> Option<Timestamp> {
        self.last_action.as_ref().and_then(|a| a.timestamp)
    }
}

/// One finishing position from a `roundResult` push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub user_id: UserId,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub session_id: String,
    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: GameMode,
    #[serde(default)]
    pub placements: Vec<Placement>,
}

impl RoundResult {
    pub fn first_place(&self) -> Option<&Placement> {
        self.placements.iter().find(|p| p.rank == 1)
    }
}
