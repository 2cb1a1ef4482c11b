//! Data behind the round-over panel.
//!
//! Everything here is display-only: scores and payouts are the server's
//! numbers, missing values render as "Unknown" or "-".

use crate::domain::snapshot::{GameSnapshot, Placement, RoundEndReason, RoundResult, UserId};

pub const UNKNOWN_PLAYER: &str = "Unknown";
pub const MISSING_SCORE: &str = "-";

impl RoundEndReason {
    pub const fn label(self) -> &'static str {
        match self {
            RoundEndReason::Regular => "Player Drop",
            RoundEndReason::Reem => "Reem!",
            RoundEndReason::AutoTriple => "Automatic Win (41/<=11)",
            RoundEndReason::DeckEmpty => "Deck Empty",
            RoundEndReason::CaughtDrop => "Caught Dropping",
            RoundEndReason::Unrecognized => "Round Over",
        }
    }
}

/// Round winner, preferring a rank-1 placement over the snapshot's single
/// winner id (simple modes only report the latter).
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub user_id: Option<UserId>,
    pub name: String,
}

pub fn resolve_winner(snapshot: &GameSnapshot, result: Option<&RoundResult>) -> Winner {
    let placement: Option<&Placement> = result.and_then(RoundResult::first_place);
    let user_id = placement
        .map(|p| p.user_id.clone())
        .or_else(|| snapshot.round_winner_id.clone());

    let name = user_id
        .as_deref()
        .and_then(|id| snapshot.username_of(id))
        .map(str::to_string)
        .or_else(|| placement.and_then(|p| p.username.clone()))
        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string());

    Winner { user_id, name }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub user_id: UserId,
    pub username: String,
    pub buy_in: f64,
    pub score: Option<f64>,
    pub payout: Option<f64>,
    pub is_winner: bool,
}

impl SummaryRow {
    pub fn score_label(&self) -> String {
        self.score
            .map(|s| format!("{s}"))
            .unwrap_or_else(|| MISSING_SCORE.to_string())
    }

    pub fn payout_label(&self) -> Option<String> {
        self.payout.map(|amount| {
            if amount > 0.0 {
                format!("+${amount}")
            } else {
                format!("-${}", amount.abs())
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub reason: Option<RoundEndReason>,
    pub winner: Winner,
    pub winner_payout: Option<f64>,
    pub rows: Vec<SummaryRow>,
    pub show_scores: bool,
    pub show_payouts: bool,
}

impl RoundSummary {
    pub fn reason_label(&self) -> Option<&'static str> {
        self.reason.map(RoundEndReason::label)
    }
}

pub fn round_summary(snapshot: &GameSnapshot, result: Option<&RoundResult>) -> RoundSummary {
    let winner = resolve_winner(snapshot, result);
    let payout_for = |id: &str| snapshot.payouts.as_ref().and_then(|p| p.get(id).copied());

    let rows = snapshot
        .players
        .iter()
        .map(|player| SummaryRow {
            user_id: player.user_id.clone(),
            username: player.username.clone(),
            buy_in: player.current_buy_in,
            score: snapshot
                .hand_scores
                .as_ref()
                .and_then(|s| s.get(&player.user_id).copied()),
            payout: payout_for(&player.user_id),
            is_winner: winner.user_id.as_deref() == Some(player.user_id.as_str()),
        })
        .collect();

    RoundSummary {
        reason: snapshot.round_ended_by,
        winner_payout: winner.user_id.as_deref().and_then(payout_for),
        winner,
        rows,
        show_scores: snapshot.hand_scores.is_some(),
        show_payouts: snapshot.payouts.is_some(),
    }
}
