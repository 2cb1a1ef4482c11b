//! Cosmetic and advisory timings. None of these affect game outcomes; the
//! server alone decides when rounds start and end.

/// Deal animation timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    pub shuffle_ms: i64,
    pub deal_cadence_ms: i64,
    /// Slack added on top of `cards * cadence` before the failsafe fires.
    pub failsafe_grace_ms: i64,
    pub settle_ms: i64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            shuffle_ms: 700,
            deal_cadence_ms: 90,
            failsafe_grace_ms: 1_500,
            settle_ms: 350,
        }
    }
}

impl AnimationTimings {
    pub fn failsafe_after(&self, total_cards: usize) -> i64 {
        self.deal_cadence_ms * total_cards as i64 + self.failsafe_grace_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimings {
    /// Advertised delay between round end and the next deal in continuous modes.
    pub restart_delay_ms: i64,
    /// How long the return-to-lobby advisory stays up in terminal modes.
    pub lobby_advisory_ms: i64,
}

impl Default for RoundTimings {
    fn default() -> Self {
        Self {
            restart_delay_ms: 10_000,
            lobby_advisory_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTimings {
    pub animation: AnimationTimings,
    pub round: RoundTimings,
}
