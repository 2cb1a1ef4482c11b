use serde::{Deserialize, Serialize};

use crate::domain::{Card, GameSnapshot, RoundResult, UserId};
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    Deck,
    Discard,
}

/// Intents sent to the server. None of them carries a success guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    JoinTable {
        table_id: String,
        user_id: UserId,
        username: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        avatar_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        contest_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DrawCard {
        table_id: String,
        user_id: UserId,
        source: DrawSource,
    },
    #[serde(rename_all = "camelCase")]
    DiscardCard {
        table_id: String,
        user_id: UserId,
        card: Card,
    },
    #[serde(rename_all = "camelCase")]
    Spread {
        table_id: String,
        user_id: UserId,
        cards: Vec<Card>,
    },
    #[serde(rename_all = "camelCase")]
    Hit {
        table_id: String,
        user_id: UserId,
        card: Card,
        target_player_id: UserId,
        target_spread_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    Drop { table_id: String, user_id: UserId },
    #[serde(rename_all = "camelCase")]
    LeaveTable {
        table_id: String,
        user_id: UserId,
        username: String,
    },
    #[serde(rename_all = "camelCase")]
    RequestLeaveTable { table_id: String, user_id: UserId },
}

impl ClientMsg {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMsg::JoinTable { .. } => "joinTable",
            ClientMsg::DrawCard { .. } => "drawCard",
            ClientMsg::DiscardCard { .. } => "discardCard",
            ClientMsg::Spread { .. } => "spread",
            ClientMsg::Hit { .. } => "hit",
            ClientMsg::Drop { .. } => "drop",
            ClientMsg::LeaveTable { .. } => "leaveTable",
            ClientMsg::RequestLeaveTable { .. } => "requestLeaveTable",
        }
    }

    pub fn encode(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Pushes received from the server.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMsg {
    InitialGameState(GameSnapshot),
    GameStateUpdate(GameSnapshot),
    RoundResult(RoundResult),
    #[serde(rename_all = "camelCase")]
    TableUpdate {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        table: serde_json::Value,
        #[serde(default)]
        game_state: Option<GameSnapshot>,
    },
    GameError {
        message: String,
    },
    AckLeaveRequest {},
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        user_id: UserId,
    },
    #[serde(rename_all = "camelCase")]
    WalletBalanceUpdate {
        user_id: UserId,
        balance: f64,
    },
}

impl ServerMsg {
    pub const EVENT_NAMES: [&'static str; 8] = [
        "initialGameState",
        "gameStateUpdate",
        "roundResult",
        "tableUpdate",
        "gameError",
        "ackLeaveRequest",
        "playerLeft",
        "walletBalanceUpdate",
    ];

    pub fn decode(text: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Like [`ServerMsg::decode`], but `Ok(None)` for well-formed envelopes
    /// naming an event this client does not handle.
    pub fn decode_known(text: &str) -> Result<Option<Self>, ClientError> {
        match serde_json::from_str::<Self>(text) {
            Ok(msg) => Ok(Some(msg)),
            Err(err) => {
                let event = serde_json::from_str::<serde_json::Value>(text)
                    .ok()
                    .and_then(|v| v.get("event")?.as_str().map(str::to_owned));
                match event {
                    Some(name) if !Self::EVENT_NAMES.contains(&name.as_str()) => Ok(None),
                    _ => Err(err.into()),
                }
            }
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMsg::InitialGameState(_) => "initialGameState",
            ServerMsg::GameStateUpdate(_) => "gameStateUpdate",
            ServerMsg::RoundResult(_) => "roundResult",
            ServerMsg::TableUpdate { .. } => "tableUpdate",
            ServerMsg::GameError { .. } => "gameError",
            ServerMsg::AckLeaveRequest {} => "ackLeaveRequest",
            ServerMsg::PlayerLeft { .. } => "playerLeft",
            ServerMsg::WalletBalanceUpdate { .. } => "walletBalanceUpdate",
        }
    }
}
