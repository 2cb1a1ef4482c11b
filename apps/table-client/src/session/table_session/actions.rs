//! Local player actions. Each one checks the advisory gate, sends at most
//! one intent and records what happened.

use tracing::warn;

use super::TableSession;
use crate::domain::Card;
use crate::error::ClientError;
use crate::events::{ClientEvent, Notice};
use crate::services::action_gate::TurnPhase;
use crate::timers::Clock;
use crate::ws::protocol::DrawSource;

pub const NOT_YOUR_TURN: &str = "It is not your turn.";
pub const DEALING: &str = "Wait for the deal to finish.";
pub const ALREADY_DREW: &str = "You have already drawn this turn.";
pub const DRAW_FIRST: &str = "Draw a card first.";
pub const DISCARD_PILE_EMPTY: &str = "Discard pile is empty!";
pub const SELECT_ONE_TO_DISCARD: &str = "Select exactly one card to discard.";
pub const SPREAD_TOO_SMALL: &str = "A spread must have at least 3 cards.";
pub const SELECT_ONE_TO_HIT: &str = "Select one card to hit with.";
pub const SELECT_SPREAD: &str = "Select a spread to hit.";
pub const NOT_CONNECTED: &str = "Not connected to the game server.";

impl<C: Clock> TableSession<C> {
    /// Draw from the deck.
    pub fn click_deck(&mut self) -> Result<(), ClientError> {
        self.require_phase(TurnPhase::Draw)?;
        let sent = self.store.draw_card(DrawSource::Deck);
        self.dispatch(sent, "You drew from the deck.".to_string())
    }

    /// Draw from the pile before drawing, discard the selected card after.
    pub fn click_discard_pile(&mut self) -> Result<(), ClientError> {
        if self.is_animating() {
            return Err(self.reject(DEALING));
        }
        match self.turn_phase() {
            TurnPhase::NotMyTurn => Err(self.reject(NOT_YOUR_TURN)),
            TurnPhase::Draw => {
                let empty = self
                    .snapshot()
                    .map(|s| s.discard_pile.is_empty())
                    .unwrap_or(true);
                if empty {
                    return Err(self.reject(DISCARD_PILE_EMPTY));
                }
                let sent = self.store.draw_card(DrawSource::Discard);
                self.dispatch(sent, "You drew from the discard pile.".to_string())
            }
            TurnPhase::PostDraw => {
                if self.selection.len() != 1 {
                    return Err(self.reject(SELECT_ONE_TO_DISCARD));
                }
                let card = self.selection.cards()[0];
                let sent = self.store.discard_card(card);
                if matches!(sent, Ok(true)) {
                    self.selection.clear();
                }
                self.dispatch(sent, "You discarded a card.".to_string())
            }
        }
    }

    /// Flip a hand card in or out of the selection. Returns false when the
    /// card cannot be selected right now.
    pub fn toggle_card(&mut self, card: Card) -> bool {
        if self.is_animating() {
            return false;
        }
        let in_hand = self
            .snapshot()
            .zip(self.local_user_id())
            .and_then(|(s, me)| s.player(me))
            .is_some_and(|p| p.hand.iter().any(|c| c.same_identity(&card)));
        if !in_hand {
            return false;
        }
        self.selection.toggle(card);
        true
    }

    pub fn spread_selected(&mut self) -> Result<(), ClientError> {
        self.require_phase(TurnPhase::PostDraw)?;
        if self.selection.len() < 3 {
            return Err(self.reject(SPREAD_TOO_SMALL));
        }
        let cards = self.selection.cards().to_vec();
        let count = cards.len();
        let sent = self.store.spread(cards);
        if matches!(sent, Ok(true)) {
            self.selection.clear();
        }
        self.dispatch(sent, format!("You spread {count} cards."))
    }

    pub fn enter_hit_mode(&mut self) -> Result<(), ClientError> {
        self.require_phase(TurnPhase::PostDraw)?;
        if self.selection.len() != 1 {
            return Err(self.reject(SELECT_ONE_TO_HIT));
        }
        self.selection.enter_hit_mode();
        self.push_notice(Notice::info(SELECT_SPREAD));
        self.action_log.push("Hit mode enabled.");
        Ok(())
    }

    pub fn cancel_hit_mode(&mut self) {
        self.selection.exit_hit_mode();
    }

    /// Hit `target_player_id`'s spread at `spread_index` with the hit card.
    pub fn execute_hit(
        &mut self,
        target_player_id: &str,
        spread_index: usize,
    ) -> Result<(), ClientError> {
        self.require_phase(TurnPhase::PostDraw)?;
        let Some(card) = self.selection.hit_card() else {
            return Err(self.reject(SELECT_ONE_TO_HIT));
        };
        let has_spread = self
            .snapshot()
            .and_then(|s| s.player(target_player_id))
            .is_some_and(|p| spread_index < p.spreads.len());
        if !has_spread {
            return Err(self.reject(SELECT_SPREAD));
        }
        let sent = self.store.hit(card, target_player_id, spread_index);
        if matches!(sent, Ok(true)) {
            self.selection.clear();
        }
        self.dispatch(sent, "You hit a spread.".to_string())
    }

    pub fn drop_hand(&mut self) -> Result<(), ClientError> {
        self.require_phase(TurnPhase::Draw)?;
        let sent = self.store.drop_hand();
        self.dispatch(sent, "You dropped.".to_string())
    }

    /// Leave immediately: send the intent, tear down, go to the lobby.
    pub fn leave_table(&mut self) -> Result<(), ClientError> {
        let sent = self.store.leave_table();
        self.teardown();
        self.events.push(ClientEvent::NavigateToLobby);
        sent.map(|_| ())
    }

    /// Ask to be removed once the current round ends.
    pub fn request_leave_table(&mut self) -> Result<(), ClientError> {
        let sent = self.store.request_leave_table();
        match sent {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.not_sent()),
            Err(err) => Err(self.intent_failed(err)),
        }
    }

    fn require_phase(&mut self, wanted: TurnPhase) -> Result<(), ClientError> {
        if self.is_animating() {
            return Err(self.reject(DEALING));
        }
        match (self.turn_phase(), wanted) {
            (phase, wanted) if phase == wanted => Ok(()),
            (TurnPhase::NotMyTurn, _) => Err(self.reject(NOT_YOUR_TURN)),
            (_, TurnPhase::Draw) => Err(self.reject(ALREADY_DREW)),
            _ => Err(self.reject(DRAW_FIRST)),
        }
    }

    fn reject(&mut self, message: &str) -> ClientError {
        self.push_notice(Notice::error(message));
        ClientError::validation(message)
    }

    fn dispatch(&mut self, sent: Result<bool, ClientError>, entry: String) -> Result<(), ClientError> {
        match sent {
            Ok(true) => {
                self.action_log.push(entry);
                Ok(())
            }
            Ok(false) => Err(self.not_sent()),
            Err(err) => Err(self.intent_failed(err)),
        }
    }

    fn not_sent(&mut self) -> ClientError {
        self.push_notice(Notice::warning(NOT_CONNECTED));
        ClientError::not_connected("intent not sent")
    }

    fn intent_failed(&mut self, err: ClientError) -> ClientError {
        warn!(error = %err, "[TABLE SESSION] intent failed");
        self.push_notice(Notice::error(err.to_string()));
        err
    }
}
