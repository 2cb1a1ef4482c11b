//! Game modes and their player-facing copy.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    FreeRtcTable,
    RtcTournament,
    RtcSatellite,
    UsdContest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCopy {
    pub label: &'static str,
    pub badge: &'static str,
    pub description: &'static str,
}

impl GameMode {
    /// Continuous modes restart a new round automatically after round end.
    /// Every other mode returns players to the lobby.
    pub const fn is_continuous(self) -> bool {
        matches!(self, GameMode::FreeRtcTable)
    }

    pub const fn copy(self) -> ModeCopy {
        match self {
            GameMode::FreeRtcTable => ModeCopy {
                label: "Crib Run",
                badge: "Open Crib",
                description: "Continuous RTC hands where players can rotate in between rounds.",
            },
            GameMode::RtcTournament => ModeCopy {
                label: "Block Bracket",
                badge: "Bracket Play",
                description:
                    "Locked RTC bracket with fixed seats, fixed pool, and placement payout.",
            },
            GameMode::RtcSatellite => ModeCopy {
                label: "Ticket Grind",
                badge: "Ticket Hunt",
                description: "RTC qualifier tables where top finishers earn contest tickets.",
            },
            GameMode::UsdContest => ModeCopy {
                label: "Cash Crown",
                badge: "Cash Crown",
                description:
                    "Fixed USD buy-in contests with locked pools and post-match settlement.",
            },
        }
    }

    pub const fn label(self) -> &'static str {
        self.copy().label
    }
}

/// Absent mode falls back to free play.
pub fn resolve_mode(mode: Option<GameMode>) -> GameMode {
    mode.unwrap_or_default()
}

/// Null or unknown modes resolve like a missing one instead of failing the
/// whole push.
pub(crate) fn lenient_mode<'de, D>(deserializer: D) -> Result<GameMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let mode = raw.and_then(|value| match serde_json::from_value::<GameMode>(value.clone()) {
        Ok(mode) => Some(mode),
        Err(_) => {
            debug!(mode = %value, "unrecognized game mode");
            None
        }
    });
    Ok(resolve_mode(mode))
}
