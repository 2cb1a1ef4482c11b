//! Round-end / round-resume detection over consecutive snapshots.
//!
//! Round end is notified once per `(table, anchor timestamp)`. The anchor is
//! the last action's timestamp; when a snapshot carries none, the current
//! time stands in, which means such a snapshot is notified again on every
//! re-send.

use tracing::debug;

use crate::config::RoundTimings;
use crate::domain::round_summary::resolve_winner;
use crate::domain::{GameSnapshot, GameStatus, RoundEndReason, RoundResult, Timestamp};
use crate::events::{Advisory, AdvisoryKind, Notice};

#[derive(Debug, Clone, PartialEq)]
pub enum RoundTransition {
    Ended {
        anchor: Timestamp,
        notice: Option<Notice>,
        advisory: Advisory,
    },
    /// Play resumed after a round end.
    Resumed,
}

#[derive(Debug, Default)]
pub struct RoundTransitionDetector {
    last_notified: Option<(String, Timestamp)>,
    in_round_end: bool,
}

impl RoundTransitionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.last_notified = None;
        self.in_round_end = false;
    }

    pub fn last_notified(&self) -> Option<Timestamp> {
        self.last_notified.as_ref().map(|(_, ts)| *ts)
    }

    pub fn observe(
        &mut self,
        snapshot: &GameSnapshot,
        result: Option<&RoundResult>,
        now: Timestamp,
        timings: &RoundTimings,
    ) -> Option<RoundTransition> {
        if snapshot.status == GameStatus::RoundEnd {
            self.in_round_end = true;
            let anchor = snapshot.anchor_timestamp().unwrap_or(now);
            let key = (snapshot.table_id.clone(), anchor);
            if self.last_notified.as_ref() == Some(&key) {
                debug!(table_id = %snapshot.table_id, anchor, "[TABLE SESSION] round end already notified");
                return None;
            }
            self.last_notified = Some(key);
            return Some(RoundTransition::Ended {
                anchor,
                notice: round_end_notice(snapshot, result),
                advisory: follow_up_advisory(snapshot, anchor, now, timings),
            });
        }

        if snapshot.status.is_active() && (self.in_round_end || self.last_notified.is_some()) {
            self.reset();
            return Some(RoundTransition::Resumed);
        }
        None
    }
}

pub fn round_end_notice(snapshot: &GameSnapshot, result: Option<&RoundResult>) -> Option<Notice> {
    let winner = resolve_winner(snapshot, result).name;
    match snapshot.round_ended_by? {
        RoundEndReason::Reem => Some(Notice::success(format!("{winner} REEMED!"))),
        RoundEndReason::Regular => Some(Notice::info(format!("{winner} wins on lowest hand."))),
        RoundEndReason::DeckEmpty => Some(Notice::info(format!(
            "Deck empty. {winner} wins on lowest hand."
        ))),
        RoundEndReason::AutoTriple | RoundEndReason::CaughtDrop | RoundEndReason::Unrecognized => {
            None
        }
    }
}

pub fn follow_up_advisory(
    snapshot: &GameSnapshot,
    anchor: Timestamp,
    now: Timestamp,
    timings: &RoundTimings,
) -> Advisory {
    if snapshot.mode.is_continuous() {
        let restart_at = anchor + timings.restart_delay_ms;
        let remaining = restart_at - now;
        let seconds = ((remaining + 999) / 1_000).max(1);
        Advisory {
            kind: AdvisoryKind::NextRound { seconds },
            message: format!("Next round starts in {seconds} seconds."),
            expires_at: restart_at.max(now + 1_000),
        }
    } else {
        Advisory {
            kind: AdvisoryKind::ReturnToLobby,
            message: "Round complete. Return to the lobby for final results.".to_string(),
            expires_at: now + timings.lobby_advisory_ms,
        }
    }
}
