//! Which actions the local player may attempt right now.
//!
//! Purely advisory: the gate only decides which affordances to offer. The
//! server re-validates every intent.

use crate::domain::{GameSnapshot, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    NotMyTurn,
    /// Turn start: draw from deck or discard pile, or drop.
    Draw,
    /// Already drew: discard, spread or hit.
    PostDraw,
}

/// What clicking the discard pile means at the moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardPileRole {
    Inactive,
    DrawSource,
    DiscardTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionGate {
    pub can_draw: bool,
    pub can_discard: bool,
    pub can_spread: bool,
    pub can_hit: bool,
    pub can_drop: bool,
}

pub fn turn_phase(snapshot: Option<&GameSnapshot>, local_user_id: &str) -> TurnPhase {
    let Some(snapshot) = snapshot else {
        return TurnPhase::NotMyTurn;
    };
    if snapshot.status != GameStatus::InProgress {
        return TurnPhase::NotMyTurn;
    }
    match snapshot.current_player() {
        Some(player) if player.user_id == local_user_id => {
            if player.has_taken_action_this_turn {
                TurnPhase::PostDraw
            } else {
                TurnPhase::Draw
            }
        }
        _ => TurnPhase::NotMyTurn,
    }
}

pub fn evaluate(
    snapshot: Option<&GameSnapshot>,
    local_user_id: &str,
    selected: usize,
    animating: bool,
) -> ActionGate {
    if animating {
        return ActionGate::default();
    }
    match turn_phase(snapshot, local_user_id) {
        TurnPhase::NotMyTurn => ActionGate::default(),
        TurnPhase::Draw => ActionGate {
            can_draw: true,
            can_drop: true,
            ..ActionGate::default()
        },
        TurnPhase::PostDraw => ActionGate {
            can_discard: selected == 1,
            can_spread: selected >= 3,
            can_hit: selected == 1,
            ..ActionGate::default()
        },
    }
}

pub fn discard_pile_role(phase: TurnPhase, animating: bool) -> DiscardPileRole {
    if animating {
        return DiscardPileRole::Inactive;
    }
    match phase {
        TurnPhase::NotMyTurn => DiscardPileRole::Inactive,
        TurnPhase::Draw => DiscardPileRole::DrawSource,
        TurnPhase::PostDraw => DiscardPileRole::DiscardTarget,
    }
}
