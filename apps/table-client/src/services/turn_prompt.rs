use crate::services::action_gate::TurnPhase;

pub const TURN_PROMPT: &str = "Your turn: draw from the deck or discard pile.";

/// Raises the turn prompt on the edge into the local draw phase.
#[derive(Debug, Default)]
pub struct TurnPrompt {
    was_draw_phase: bool,
}

impl TurnPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly when `phase` is the draw phase and the previous one wasn't.
    pub fn observe(&mut self, phase: TurnPhase) -> bool {
        let now_draw = phase == TurnPhase::Draw;
        let fire = now_draw && !self.was_draw_phase;
        self.was_draw_phase = now_draw;
        fire
    }

    pub fn reset(&mut self) {
        self.was_draw_phase = false;
    }
}
