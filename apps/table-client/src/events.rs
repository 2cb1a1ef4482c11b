//! Outbound events a table session raises for whatever renders it.

use crate::domain::Timestamp;
use crate::services::deal_animation::DealPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Error, message)
    }

    fn with_level(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    /// Continuous tables: the next deal is coming.
    NextRound { seconds: i64 },
    /// Terminal modes: results are final, go back to the lobby.
    ReturnToLobby,
}

/// Longer-lived banner shown between rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Notice(Notice),
    AdvisoryShown(Advisory),
    AdvisoryDismissed,
    DealPhaseChanged { from: DealPhase, to: DealPhase },
    ConnectionChanged { connected: bool },
    WalletBalance { balance: f64 },
    RefreshWallet,
    NavigateToLobby,
}
