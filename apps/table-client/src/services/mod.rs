//! Client-side derivations over the latest snapshot.

pub mod action_gate;
pub mod action_log;
pub mod deal_animation;
pub mod round_transition;
pub mod selection;
pub mod turn_prompt;

pub use action_gate::{ActionGate, DiscardPileRole, TurnPhase};
pub use action_log::ActionLog;
pub use deal_animation::{DealAnimation, DealKey, DealPhase, PhaseChange};
pub use round_transition::{RoundTransition, RoundTransitionDetector};
pub use selection::CardSelection;
pub use turn_prompt::TurnPrompt;
