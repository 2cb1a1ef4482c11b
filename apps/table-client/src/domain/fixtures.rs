//! Snapshot builders for unit tests.

use crate::domain::modes::GameMode;
use crate::domain::snapshot::{GameSnapshot, GameStatus, LastAction, Player, Timestamp};
use crate::domain::{Card, Rank, Suit};

#[derive(Clone, Debug)]
pub struct SnapshotArgs {
    pub table_id: String,
    pub mode: GameMode,
    pub status: GameStatus,
    pub turn: u32,
    pub current_player_index: usize,
    pub dealer_index: usize,
    pub hand_size: usize,
    pub discard_pile: Vec<Card>,
    pub timestamp: Option<Timestamp>,
}

impl Default for SnapshotArgs {
    fn default() -> Self {
        Self {
            table_id: "t1".to_string(),
            mode: GameMode::FreeRtcTable,
            status: GameStatus::InProgress,
            turn: 1,
            current_player_index: 0,
            dealer_index: 0,
            hand_size: 0,
            discard_pile: Vec::new(),
            timestamp: Some(1_000),
        }
    }
}

/// The 40-card Tonk deck in suit-major order.
pub fn tonk_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|suit| Rank::ALL.iter().map(move |rank| Card::new(*rank, *suit)))
        .collect()
}

pub fn username_for(user_id: &str) -> String {
    format!("{user_id}-name")
}

/// Build a snapshot where player `i` holds `hand_size` consecutive deck cards.
pub fn snapshot_with_players(user_ids: &[&str], args: SnapshotArgs) -> GameSnapshot {
    let deck = tonk_deck();
    let players: Vec<Player> = user_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let mut player = Player::new(*id, username_for(id));
            player.hand = deck
                .iter()
                .skip(i * args.hand_size)
                .take(args.hand_size)
                .copied()
                .collect();
            player
        })
        .collect();
    let dealt = user_ids.len() * args.hand_size;
    GameSnapshot {
        table_id: args.table_id,
        mode: args.mode,
        status: args.status,
        players,
        deck: deck.into_iter().skip(dealt).collect(),
        discard_pile: args.discard_pile,
        current_player_index: args.current_player_index,
        current_dealer_index: args.dealer_index,
        turn: args.turn,
        last_action: args.timestamp.map(|timestamp| LastAction {
            kind: "test".to_string(),
            payload: serde_json::Value::Null,
            timestamp: Some(timestamp),
        }),
        round_ended_by: None,
        round_winner_id: None,
        round_loser_id: None,
        caught_dropping_player_id: None,
        hand_scores: None,
        payouts: None,
        pot: None,
        base_stake: None,
    }
}

/// Snapshot at the moment the server finished dealing `hand_size` cards each.
pub fn fresh_deal(user_ids: &[&str], hand_size: usize) -> GameSnapshot {
    snapshot_with_players(
        user_ids,
        SnapshotArgs {
            hand_size,
            ..SnapshotArgs::default()
        },
    )
}
