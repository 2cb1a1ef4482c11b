//! Injectable clock and a deterministic timer queue.
//!
//! Every timer the table session relies on (shuffle delay, deal cadence,
//! deal failsafe, settle delay, round advisory) lives in a [`TimerQueue`].
//! Nothing sleeps: the driver asks for [`TimerQueue::next_deadline`], waits
//! however it likes, then pops due timers. Tests drive a [`ManualClock`].

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use time::OffsetDateTime;

use crate::domain::Timestamp;

pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Timestamp {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as Timestamp
    }
}

/// Shared, manually advanced clock. Clones observe the same time.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    ShuffleDone,
    DealTick,
    DealFailsafe,
    SettleDone,
    AdvisoryExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub due_at: Timestamp,
}

/// Timers ordered by (deadline, id); equal deadlines fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    order: BTreeSet<(Timestamp, TimerId)>,
    entries: HashMap<TimerId, (Timestamp, TimerKind)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, due_at: Timestamp) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.order.insert((due_at, id));
        self.entries.insert(id, (due_at, kind));
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.remove(&id) {
            Some((due_at, _)) => {
                self.order.remove(&(due_at, id));
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.order.clear();
        self.entries.clear();
        cancelled
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.order.first().map(|(due_at, _)| *due_at)
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<FiredTimer> {
        let (due_at, id) = *self.order.first()?;
        if due_at > now {
            return None;
        }
        self.order.remove(&(due_at, id));
        let (_, kind) = self.entries.remove(&id)?;
        Some(FiredTimer { id, kind, due_at })
    }
}
