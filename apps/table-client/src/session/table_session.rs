//! The per-table client context.
//!
//! A [`TableSession`] owns everything one joined table needs: the channel,
//! the latest snapshot, selection, animation state and timers. All input
//! arrives as discrete calls (transport events, timer firings, user
//! actions) and every call runs to completion. Output is a queue of
//! [`ClientEvent`]s the caller drains.

pub mod actions;

use tracing::{debug, info, warn};

use crate::config::SessionTimings;
use crate::domain::round_summary::{round_summary, RoundSummary};
use crate::domain::seating::{seat_layout, SeatView};
use crate::domain::{GameSnapshot, GameStatus, RoundResult, Timestamp};
use crate::events::{Advisory, ClientEvent, Notice};
use crate::services::action_gate::{self, ActionGate, DiscardPileRole, TurnPhase};
use crate::services::deal_animation::{DealAnimation, DealPhase, PhaseChange};
use crate::services::round_transition::{RoundTransition, RoundTransitionDetector};
use crate::services::turn_prompt::{TurnPrompt, TURN_PROMPT};
use crate::services::{ActionLog, CardSelection};
use crate::store::{GameStore, SnapshotOutcome};
use crate::timers::{Clock, TimerId, TimerKind, TimerQueue};
use crate::ws::connection::JoinRequest;
use crate::ws::protocol::ServerMsg;
use crate::ws::transport::{ConnectionId, Transport, TransportEvent};

pub const DISCONNECTED: &str = "Disconnected from game server.";
pub const LEAVE_ACKNOWLEDGED: &str = "You will be removed from the table at the end of the round.";
pub const LEFT_TABLE: &str = "You have left the table.";
pub const UNREADABLE_UPDATE: &str = "Received an update from the game server that could not be read.";

pub struct TableSession<C: Clock> {
    clock: C,
    timings: SessionTimings,
    store: GameStore,
    detector: RoundTransitionDetector,
    animation: DealAnimation,
    selection: CardSelection,
    turn_prompt: TurnPrompt,
    action_log: ActionLog,
    timers: TimerQueue,
    advisory: Option<(Advisory, TimerId)>,
    events: Vec<ClientEvent>,
}

impl<C: Clock> TableSession<C> {
    pub fn new(clock: C, timings: SessionTimings) -> Self {
        Self {
            clock,
            timings,
            store: GameStore::new(),
            detector: RoundTransitionDetector::new(),
            animation: DealAnimation::new(timings.animation),
            selection: CardSelection::new(),
            turn_prompt: TurnPrompt::new(),
            action_log: ActionLog::new(),
            timers: TimerQueue::new(),
            advisory: None,
            events: Vec::new(),
        }
    }

    /// Adopt a new channel for `join`. Any previous channel is torn down
    /// first, together with everything derived from it.
    pub fn connect(&mut self, conn_id: ConnectionId, join: JoinRequest, transport: Box<dyn Transport>) {
        if self.store.connection().is_open() {
            self.teardown();
        }
        info!(
            conn_id = %conn_id,
            table_id = %join.table_id,
            user_id = %join.user_id,
            "[TABLE SESSION] connecting"
        );
        self.store.open(conn_id, join, transport);
    }

    pub fn disconnect(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let was_connected = self.store.connection().is_connected();
        self.store.close();
        if let Some(change) = self.animation.reset(&mut self.timers, true) {
            self.events.push(ClientEvent::DealPhaseChanged {
                from: change.from,
                to: change.to,
            });
        }
        self.dismiss_advisory();
        self.timers.cancel_all();
        self.selection.clear();
        self.detector.reset();
        self.turn_prompt.reset();
        self.action_log.clear();
        if was_connected {
            self.events.push(ClientEvent::ConnectionChanged { connected: false });
        }
    }

    pub fn handle_event(&mut self, conn_id: ConnectionId, event: TransportEvent) {
        if !self.store.connection().is_current(conn_id) {
            debug!(conn_id = %conn_id, "[TABLE SESSION] event from superseded channel ignored");
            return;
        }
        match event {
            TransportEvent::Connected => match self.store.connection_mut().on_connected() {
                Ok(()) => self.events.push(ClientEvent::ConnectionChanged { connected: true }),
                Err(err) => {
                    warn!(conn_id = %conn_id, error = %err, "[TABLE SESSION] joinTable failed");
                    self.push_notice(Notice::error(err.to_string()));
                }
            },
            TransportEvent::Disconnected { reason } => self.on_transport_lost(reason.as_deref()),
            TransportEvent::Message(msg) => self.handle_server_msg(msg),
            TransportEvent::Undecodable { detail } => {
                warn!(conn_id = %conn_id, detail = %detail, "[TABLE SESSION] push dropped");
                self.push_notice(Notice::warning(UNREADABLE_UPDATE));
            }
        }
    }

    fn on_transport_lost(&mut self, reason: Option<&str>) {
        self.store.connection_mut().on_disconnected(reason);
        // Keep the snapshot and dedup memory; drop what was derived locally.
        if let Some(change) = self.animation.reset(&mut self.timers, false) {
            self.on_phase_change(change);
        }
        self.selection.clear();
        self.turn_prompt.reset();
        self.dismiss_advisory();
        self.events.push(ClientEvent::ConnectionChanged { connected: false });
        self.push_notice(Notice::warning(DISCONNECTED));
    }

    fn handle_server_msg(&mut self, msg: ServerMsg) {
        debug!(event = msg.event_name(), "[TABLE SESSION] push received");
        match msg {
            ServerMsg::InitialGameState(snapshot) | ServerMsg::GameStateUpdate(snapshot) => {
                self.apply_snapshot(snapshot)
            }
            ServerMsg::RoundResult(result) => self.store.set_round_result(result),
            ServerMsg::TableUpdate {
                message,
                game_state,
                ..
            } => {
                if let Some(message) = message {
                    self.push_notice(Notice::info(message));
                }
                if let Some(snapshot) = game_state {
                    self.apply_snapshot(snapshot);
                }
            }
            ServerMsg::GameError { message } => {
                warn!(message = %message, "[TABLE SESSION] server rejected intent");
                self.store.set_error(message.clone());
                self.push_notice(Notice::error(message));
            }
            ServerMsg::AckLeaveRequest {} => self.push_notice(Notice::info(LEAVE_ACKNOWLEDGED)),
            ServerMsg::PlayerLeft { user_id } => {
                if self.store.local_user_id() == Some(user_id.as_str()) {
                    self.push_notice(Notice::info(LEFT_TABLE));
                    self.teardown();
                    self.events.push(ClientEvent::NavigateToLobby);
                } else {
                    debug!(user_id = %user_id, "[TABLE SESSION] player left");
                }
            }
            ServerMsg::WalletBalanceUpdate { user_id, balance } => {
                if self.store.local_user_id() == Some(user_id.as_str()) {
                    self.events.push(ClientEvent::WalletBalance { balance });
                }
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        let now = self.clock.now_ms();
        if self.store.apply_snapshot(snapshot) == SnapshotOutcome::ForeignTable {
            return;
        }
        let Some(snapshot) = self.store.snapshot() else {
            return;
        };
        let local = self.store.local_user_id().unwrap_or_default();
        let transition =
            self.detector
                .observe(snapshot, self.store.round_result(), now, &self.timings.round);
        let phase_change = self.animation.observe(snapshot, &mut self.timers, now);
        let phase = action_gate::turn_phase(Some(snapshot), local);

        match transition {
            Some(RoundTransition::Ended {
                notice, advisory, ..
            }) => {
                if let Some(notice) = notice {
                    self.push_notice(notice);
                }
                self.selection.clear();
                self.show_advisory(advisory);
                self.events.push(ClientEvent::RefreshWallet);
            }
            Some(RoundTransition::Resumed) => {
                self.selection.clear();
                self.dismiss_advisory();
            }
            None => {}
        }
        if let Some(change) = phase_change {
            self.on_phase_change(change);
        }
        if phase == TurnPhase::NotMyTurn && self.selection.is_hit_mode() {
            self.selection.exit_hit_mode();
        }
        if self.turn_prompt.observe(phase) {
            self.push_notice(Notice::info(TURN_PROMPT));
        }
    }

    /// Fire every timer due at the clock's current time.
    pub fn fire_due_timers(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired_count = 0;
        while let Some(fired) = self.timers.pop_due(now) {
            fired_count += 1;
            match fired.kind {
                TimerKind::AdvisoryExpired => {
                    if self.advisory.as_ref().is_some_and(|(_, id)| *id == fired.id) {
                        self.advisory = None;
                        self.events.push(ClientEvent::AdvisoryDismissed);
                    }
                }
                _ => {
                    if let Some(change) = self.animation.on_timer(fired, &mut self.timers) {
                        self.on_phase_change(change);
                    }
                }
            }
        }
        fired_count
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    fn on_phase_change(&mut self, change: PhaseChange) {
        if change.from == DealPhase::Idle || change.to == DealPhase::Idle {
            self.selection.clear();
        }
        if change.to == DealPhase::Shuffling {
            self.dismiss_advisory();
        }
        self.events.push(ClientEvent::DealPhaseChanged {
            from: change.from,
            to: change.to,
        });
    }

    fn show_advisory(&mut self, advisory: Advisory) {
        self.dismiss_advisory();
        let id = self
            .timers
            .schedule(TimerKind::AdvisoryExpired, advisory.expires_at);
        self.events.push(ClientEvent::AdvisoryShown(advisory.clone()));
        self.advisory = Some((advisory, id));
    }

    fn dismiss_advisory(&mut self) {
        if let Some((_, id)) = self.advisory.take() {
            self.timers.cancel(id);
            self.events.push(ClientEvent::AdvisoryDismissed);
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        self.events.push(ClientEvent::Notice(notice));
    }

    pub fn drain_events(&mut self) -> Vec<ClientEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.store.snapshot()
    }

    pub fn round_result(&self) -> Option<&RoundResult> {
        self.store.round_result()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.store.last_error()
    }

    pub fn is_connected(&self) -> bool {
        self.store.connection().is_connected()
    }

    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.store.connection().connection_id()
    }

    pub fn local_user_id(&self) -> Option<&str> {
        self.store.local_user_id()
    }

    pub fn selection(&self) -> &CardSelection {
        &self.selection
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.action_log
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref().map(|(advisory, _)| advisory)
    }

    pub fn deal_phase(&self) -> DealPhase {
        self.animation.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    pub fn turn_phase(&self) -> TurnPhase {
        action_gate::turn_phase(self.snapshot(), self.local_user_id().unwrap_or_default())
    }

    pub fn action_gate(&self) -> ActionGate {
        action_gate::evaluate(
            self.snapshot(),
            self.local_user_id().unwrap_or_default(),
            self.selection.len(),
            self.is_animating(),
        )
    }

    pub fn discard_pile_role(&self) -> DiscardPileRole {
        action_gate::discard_pile_role(self.turn_phase(), self.is_animating())
    }

    /// Cards to show per seat, in snapshot seat order.
    pub fn visible_hand_counts(&self) -> Vec<usize> {
        self.snapshot()
            .map(|s| {
                s.players
                    .iter()
                    .enumerate()
                    .map(|(seat, p)| self.animation.visible_count(seat, p.hand.len()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn seat_layout(&self) -> Vec<SeatView<'_>> {
        match self.snapshot() {
            Some(snapshot) => seat_layout(snapshot, self.local_user_id().unwrap_or_default()),
            None => Vec::new(),
        }
    }

    /// Summary of the finished round while the table sits in round-end.
    pub fn round_summary(&self) -> Option<RoundSummary> {
        let snapshot = self.snapshot()?;
        (snapshot.status == GameStatus::RoundEnd)
            .then(|| round_summary(snapshot, self.round_result()))
    }
}
