//! Game state store: the latest server snapshot plus the intent surface.
//!
//! The store never validates an intent against game rules. It builds the
//! wire message from the connected identity and hands it to the channel;
//! the server answers with a new snapshot or a `gameError` push.

use tracing::{debug, info};

use crate::domain::{Card, GameSnapshot, RoundResult};
use crate::error::ClientError;
use crate::ws::connection::{ConnectionManager, JoinRequest};
use crate::ws::protocol::{ClientMsg, DrawSource};
use crate::ws::transport::{ConnectionId, Transport};

/// Outcome of offering a snapshot to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    Applied,
    /// Snapshot belongs to another table than the one we joined.
    ForeignTable,
}

#[derive(Default)]
pub struct GameStore {
    connection: ConnectionManager,
    snapshot: Option<GameSnapshot>,
    round_result: Option<RoundResult>,
    last_error: Option<String>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn round_result(&self) -> Option<&RoundResult> {
        self.round_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut ConnectionManager {
        &mut self.connection
    }

    pub fn identity(&self) -> Option<&JoinRequest> {
        self.connection.identity()
    }

    pub fn local_user_id(&self) -> Option<&str> {
        self.identity().map(|j| j.user_id.as_str())
    }

    /// Replace the channel and drop everything learned on the old one.
    pub fn open(&mut self, id: ConnectionId, join: JoinRequest, transport: Box<dyn Transport>) {
        self.connection.open(id, join, transport);
        self.clear_state();
    }

    pub fn close(&mut self) -> bool {
        self.clear_state();
        self.connection.close()
    }

    fn clear_state(&mut self) {
        self.snapshot = None;
        self.round_result = None;
        self.last_error = None;
    }

    /// Replace the snapshot wholesale.
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) -> SnapshotOutcome {
        if let Some(join) = self.identity() {
            if join.table_id != snapshot.table_id {
                info!(
                    expected = %join.table_id,
                    got = %snapshot.table_id,
                    "[TABLE SESSION] ignoring snapshot for another table"
                );
                return SnapshotOutcome::ForeignTable;
            }
        }
        debug!(
            table_id = %snapshot.table_id,
            status = ?snapshot.status,
            turn = snapshot.turn,
            "[TABLE SESSION] snapshot applied"
        );
        // A new round clears a stale result once play resumes.
        if snapshot.status.is_active() {
            self.round_result = None;
        }
        self.snapshot = Some(snapshot);
        SnapshotOutcome::Applied
    }

    pub fn set_round_result(&mut self, result: RoundResult) {
        self.round_result = Some(result);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn ids(&self) -> Result<(String, String), ClientError> {
        self.identity()
            .map(|j| (j.table_id.clone(), j.user_id.clone()))
            .ok_or_else(|| ClientError::not_connected("no table joined"))
    }

    fn send(&mut self, msg: ClientMsg) -> Result<bool, ClientError> {
        self.connection.send(&msg)
    }

    pub fn draw_card(&mut self, source: DrawSource) -> Result<bool, ClientError> {
        let (table_id, user_id) = self.ids()?;
        self.send(ClientMsg::DrawCard {
            table_id,
            user_id,
            source,
        })
    }

    pub fn discard_card(&mut self, card: Card) -> Result<bool, ClientError> {
        let (table_id, user_id) = self.ids()?;
        self.send(ClientMsg::DiscardCard {
            table_id,
            user_id,
            card,
        })
    }

    pub fn spread(&mut self, cards: Vec<Card>) -> Result<bool, ClientError> {
        let (table_id, user_id) = self.ids()?;
        self.send(ClientMsg::Spread {
            table_id,
            user_id,
            cards,
        })
    }

    pub fn hit(
        &mut self,
        card: Card,
        target_player_id: impl Into<String>,
        target_spread_index: usize,
    ) -> Result<bool, ClientError> {
        let (table_id, user_id) = self.ids()?;
        self.send(ClientMsg::Hit {
            table_id,
            user_id,
            card,
            target_player_id: target_player_id.into(),
            target_spread_index,
        })
    }

    pub fn drop_hand(&mut self) -> Result<bool, ClientError> {
        let (table_id, user_id) = self.ids()?;
        self.send(ClientMsg::Drop { table_id, user_id })
    }

    pub fn leave_table(&mut self) -> Result<bool, ClientError> {
        let join = self
            .identity()
            .cloned()
            .ok_or_else(|| ClientError::not_connected("no table joined"))?;
        self.send(ClientMsg::LeaveTable {
            table_id: join.table_id,
            user_id: join.user_id,
            username: join.username,
        })
    }

    pub fn request_leave_table(&mut self) -> Result<bool, ClientError> {
        let (table_id, user_id) = self.ids()?;
        self.send(ClientMsg::RequestLeaveTable { table_id, user_id })
    }
}
