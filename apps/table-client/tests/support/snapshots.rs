// Snapshot builders for integration tests.
//
// Player `i` is dealt `hand_size` consecutive cards of a suit-major deck, so
// hands never overlap and stay deterministic.

use table_client::domain::{
    Card, GameMode, GameSnapshot, GameStatus, LastAction, Player, Rank, RoundEndReason, Suit,
    Timestamp,
};

pub const TABLE_ID: &str = "t1";

pub fn deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|suit| Rank::ALL.iter().map(move |rank| Card::new(*rank, *suit)))
        .collect()
}

pub fn display_name(user_id: &str) -> String {
    format!("{user_id}-name")
}

#[derive(Debug, Clone)]
pub struct TableBuilder {
    user_ids: Vec<String>,
    hand_size: usize,
    snapshot: GameSnapshot,
}

impl TableBuilder {
    pub fn new(user_ids: &[&str]) -> Self {
        Self {
            user_ids: user_ids.iter().map(|s| s.to_string()).collect(),
            hand_size: 5,
            snapshot: GameSnapshot {
                table_id: TABLE_ID.to_string(),
                mode: GameMode::FreeRtcTable,
                status: GameStatus::InProgress,
                players: Vec::new(),
                deck: Vec::new(),
                discard_pile: Vec::new(),
                current_player_index: 0,
                current_dealer_index: 0,
                turn: 1,
                last_action: Some(LastAction {
                    kind: "deal".to_string(),
                    payload: serde_json::Value::Null,
                    timestamp: Some(1_000),
                }),
                round_ended_by: None,
                round_winner_id: None,
                round_loser_id: None,
                caught_dropping_player_id: None,
                hand_scores: None,
                payouts: None,
                pot: None,
                base_stake: None,
            },
        }
    }

    pub fn table_id(mut self, table_id: &str) -> Self {
        self.snapshot.table_id = table_id.to_string();
        self
    }

    pub fn hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.snapshot.mode = mode;
        self
    }

    pub fn status(mut self, status: GameStatus) -> Self {
        self.snapshot.status = status;
        self
    }

    pub fn turn(mut self, turn: u32) -> Self {
        self.snapshot.turn = turn;
        self
    }

    pub fn dealer(mut self, index: usize) -> Self {
        self.snapshot.current_dealer_index = index;
        self
    }

    pub fn current(mut self, index: usize) -> Self {
        self.snapshot.current_player_index = index;
        self
    }

    pub fn discard(mut self, cards: Vec<Card>) -> Self {
        self.snapshot.discard_pile = cards;
        self
    }

    pub fn timestamp(mut self, timestamp: Option<Timestamp>) -> Self {
        self.snapshot.last_action = timestamp.map(|timestamp| LastAction {
            kind: "action".to_string(),
            payload: serde_json::Value::Null,
            timestamp: Some(timestamp),
        });
        self
    }

    pub fn round_end(mut self, reason: RoundEndReason, winner: &str) -> Self {
        self.snapshot.status = GameStatus::RoundEnd;
        self.snapshot.round_ended_by = Some(reason);
        self.snapshot.round_winner_id = Some(winner.to_string());
        self
    }

    /// Mid-round, "current" player has not drawn yet.
    pub fn mid_round(self) -> Self {
        self.turn(4)
    }

    pub fn build(self) -> GameSnapshot {
        self.build_with(|_| {})
    }

    pub fn build_with(self, tweak: impl FnOnce(&mut GameSnapshot)) -> GameSnapshot {
        let deck = deck();
        let mut snapshot = self.snapshot;
        snapshot.players = self
            .user_ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let mut player = Player::new(id.clone(), display_name(id));
                player.hand = deck
                    .iter()
                    .skip(i * self.hand_size)
                    .take(self.hand_size)
                    .copied()
                    .collect();
                player
            })
            .collect();
        snapshot.deck = deck
            .into_iter()
            .skip(self.user_ids.len() * self.hand_size)
            .collect();
        tweak(&mut snapshot);
        snapshot
    }
}
