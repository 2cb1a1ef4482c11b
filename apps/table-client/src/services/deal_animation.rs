//! Cosmetic deal animation driven by round-start detection.
//!
//! The server sends fully dealt hands; this module only decides how many of
//! each seat's cards to reveal while the deal plays out. Real hand data in
//! the store is never touched.
//!
//! ```text
//! idle -> shuffling -> dealing -> placing-deck -> idle
//!                         \-- failsafe --------> idle
//! ```

use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::config::AnimationTimings;
use crate::domain::{GameSnapshot, GameStatus, Timestamp};
use crate::timers::{FiredTimer, TimerId, TimerKind, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DealPhase {
    #[default]
    Idle,
    Shuffling,
    Dealing,
    PlacingDeck,
}

impl DealPhase {
    pub const fn is_animating(self) -> bool {
        !matches!(self, DealPhase::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: DealPhase,
    pub to: DealPhase,
}

/// Identity of one particular deal. The same key never animates twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DealKey(String);

impl DealKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Heuristic: does this snapshot look like a freshly dealt round?
pub fn is_round_start(snapshot: &GameSnapshot) -> bool {
    if !matches!(snapshot.status, GameStatus::Starting | GameStatus::InProgress) {
        return false;
    }
    if snapshot.turn != 1 || !snapshot.discard_pile.is_empty() || snapshot.players.is_empty() {
        return false;
    }
    let max = max_hand_len(snapshot);
    max > 0 && snapshot.players.iter().all(|p| p.hand.len() == max)
}

fn max_hand_len(snapshot: &GameSnapshot) -> usize {
    snapshot
        .players
        .iter()
        .map(|p| p.hand.len())
        .max()
        .unwrap_or(0)
}

/// Table, dealer, sorted player ids and each player's sorted hand.
pub fn deal_key(snapshot: &GameSnapshot) -> DealKey {
    let mut seats: Vec<(&str, Vec<_>)> = snapshot
        .players
        .iter()
        .map(|p| {
            let mut hand = p.hand.clone();
            hand.sort();
            (p.user_id.as_str(), hand)
        })
        .collect();
    seats.sort_by(|a, b| a.0.cmp(b.0));

    let mut key = format!("{}|{}", snapshot.table_id, snapshot.current_dealer_index);
    for (user_id, hand) in seats {
        key.push('|');
        key.push_str(user_id);
        key.push(':');
        for card in hand {
            key.push_str(&card.to_string());
        }
    }
    DealKey(key)
}

/// Shape of the deal being animated, fixed at detection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealPlan {
    pub players: usize,
    pub hand_size: usize,
    pub dealer_index: usize,
}

impl DealPlan {
    pub fn total_cards(&self) -> usize {
        self.players * self.hand_size
    }

    /// Order in which `seat` receives its cards; the seat left of the dealer
    /// is served first.
    pub fn deal_position(&self, seat: usize) -> usize {
        let first = (self.dealer_index + 1) % self.players;
        (seat + self.players - first) % self.players
    }

    pub fn visible_count(&self, seat: usize, dealt: usize) -> usize {
        if self.players == 0 || seat >= self.players {
            return 0;
        }
        let position = self.deal_position(seat);
        if dealt <= position {
            return 0;
        }
        let received = (dealt - position).div_ceil(self.players);
        received.min(self.hand_size)
    }
}

#[derive(Debug, Default)]
struct PhaseTimers {
    shuffle: Option<TimerId>,
    tick: Option<TimerId>,
    failsafe: Option<TimerId>,
    settle: Option<TimerId>,
}

impl PhaseTimers {
    fn cancel_all(&mut self, queue: &mut TimerQueue) {
        for id in [
            self.shuffle.take(),
            self.tick.take(),
            self.failsafe.take(),
            self.settle.take(),
        ]
        .into_iter()
        .flatten()
        {
            queue.cancel(id);
        }
    }
}

#[derive(Debug)]
pub struct DealAnimation {
    timings: AnimationTimings,
    phase: DealPhase,
    plan: Option<DealPlan>,
    dealt: usize,
    /// Every deal animated since the last teardown.
    seen: HashSet<DealKey>,
    timers: PhaseTimers,
}

impl DealAnimation {
    pub fn new(timings: AnimationTimings) -> Self {
        Self {
            timings,
            phase: DealPhase::Idle,
            plan: None,
            dealt: 0,
            seen: HashSet::new(),
            timers: PhaseTimers::default(),
        }
    }

    pub fn phase(&self) -> DealPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn plan(&self) -> Option<DealPlan> {
        self.plan
    }

    pub fn has_seen(&self, key: &DealKey) -> bool {
        self.seen.contains(key)
    }

    /// Start a new animation if `snapshot` is an unseen round start.
    pub fn observe(
        &mut self,
        snapshot: &GameSnapshot,
        queue: &mut TimerQueue,
        now: Timestamp,
    ) -> Option<PhaseChange> {
        if !is_round_start(snapshot) {
            return None;
        }
        let key = deal_key(snapshot);
        if self.seen.contains(&key) {
            return None;
        }

        let players = snapshot.players.len();
        let plan = DealPlan {
            players,
            hand_size: max_hand_len(snapshot),
            dealer_index: snapshot.current_dealer_index % players,
        };
        info!(
            table_id = %snapshot.table_id,
            players,
            hand_size = plan.hand_size,
            "[TABLE SESSION] round start detected"
        );

        self.timers.cancel_all(queue);
        self.seen.insert(key);
        self.plan = Some(plan);
        self.dealt = 0;
        self.timers.shuffle = Some(queue.schedule(
            TimerKind::ShuffleDone,
            now + self.timings.shuffle_ms,
        ));
        Some(self.enter(DealPhase::Shuffling))
    }

    /// Advance on a fired timer. Firings that no longer belong to the
    /// current phase are ignored.
    pub fn on_timer(&mut self, fired: FiredTimer, queue: &mut TimerQueue) -> Option<PhaseChange> {
        let total = self.plan.map(|p| p.total_cards()).unwrap_or(0);
        let at = fired.due_at;
        match fired.kind {
            TimerKind::ShuffleDone if self.timers.shuffle == Some(fired.id) => {
                self.timers.shuffle = None;
                self.dealt = 0;
                if total == 0 {
                    return Some(self.begin_settle(queue, at));
                }
                self.timers.tick = Some(queue.schedule(
                    TimerKind::DealTick,
                    at + self.timings.deal_cadence_ms,
                ));
                self.timers.failsafe = Some(queue.schedule(
                    TimerKind::DealFailsafe,
                    at + self.timings.failsafe_after(total),
                ));
                Some(self.enter(DealPhase::Dealing))
            }
            TimerKind::DealTick if self.timers.tick == Some(fired.id) => {
                self.timers.tick = None;
                self.dealt += 1;
                if self.dealt >= total {
                    if let Some(id) = self.timers.failsafe.take() {
                        queue.cancel(id);
                    }
                    return Some(self.begin_settle(queue, at));
                }
                self.timers.tick = Some(queue.schedule(
                    TimerKind::DealTick,
                    at + self.timings.deal_cadence_ms,
                ));
                None
            }
            TimerKind::DealFailsafe if self.timers.failsafe == Some(fired.id) => {
                self.timers.failsafe = None;
                if let Some(id) = self.timers.tick.take() {
                    queue.cancel(id);
                }
                info!(dealt = self.dealt, total, "[TABLE SESSION] deal failsafe fired");
                self.dealt = total;
                Some(self.enter(DealPhase::Idle))
            }
            TimerKind::SettleDone if self.timers.settle == Some(fired.id) => {
                self.timers.settle = None;
                Some(self.enter(DealPhase::Idle))
            }
            kind => {
                trace!(?kind, "[TABLE SESSION] stale animation timer ignored");
                None
            }
        }
    }

    /// Stop any animation and cancel its timers. With `forget_key` every
    /// deal seen so far may animate again.
    pub fn reset(&mut self, queue: &mut TimerQueue, forget_key: bool) -> Option<PhaseChange> {
        self.timers.cancel_all(queue);
        self.plan = None;
        self.dealt = 0;
        if forget_key {
            self.seen.clear();
        }
        if self.phase.is_animating() {
            Some(self.enter(DealPhase::Idle))
        } else {
            None
        }
    }

    /// How many of `seat`'s `actual` cards to show right now.
    pub fn visible_count(&self, seat: usize, actual: usize) -> usize {
        match (self.phase, self.plan) {
            (DealPhase::Shuffling | DealPhase::Dealing, Some(plan)) => {
                plan.visible_count(seat, self.dealt).min(actual)
            }
            _ => actual,
        }
    }

    fn begin_settle(&mut self, queue: &mut TimerQueue, at: Timestamp) -> PhaseChange {
        self.timers.settle = Some(queue.schedule(TimerKind::SettleDone, at + self.timings.settle_ms));
        self.enter(DealPhase::PlacingDeck)
    }

    fn enter(&mut self, to: DealPhase) -> PhaseChange {
        let from = self.phase;
        self.phase = to;
        debug!(?from, ?to, "[TABLE SESSION] deal phase");
        PhaseChange { from, to }
    }
}
