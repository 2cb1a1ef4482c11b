//! Connection manager: owns at most one realtime channel per session.

use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::ws::protocol::ClientMsg;
use crate::ws::transport::{ConnectionId, Transport};

/// Identity announced to the server once the channel is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub table_id: String,
    pub user_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub contest_id: Option<String>,
}

impl JoinRequest {
    pub fn new(
        table_id: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            table_id: table_id.into(),
            user_id: user_id.into(),
            username: username.into(),
            avatar_url: None,
            contest_id: None,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_contest(mut self, contest_id: impl Into<String>) -> Self {
        self.contest_id = Some(contest_id.into());
        self
    }

    fn to_msg(&self) -> ClientMsg {
        ClientMsg::JoinTable {
            table_id: self.table_id.clone(),
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            contest_id: self.contest_id.clone(),
        }
    }
}

struct ActiveChannel {
    id: ConnectionId,
    join: JoinRequest,
    transport: Box<dyn Transport>,
    connected: bool,
}

#[derive(Default)]
pub struct ConnectionManager {
    active: Option<ActiveChannel>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a new channel, closing any previous one first.
    pub fn open(&mut self, id: ConnectionId, join: JoinRequest, transport: Box<dyn Transport>) {
        self.close();
        info!(
            conn_id = %id,
            table_id = %join.table_id,
            user_id = %join.user_id,
            "[TABLE SESSION] channel opened"
        );
        self.active = Some(ActiveChannel {
            id,
            join,
            transport,
            connected: false,
        });
    }

    /// Close the live channel. Returns false if there was none.
    pub fn close(&mut self) -> bool {
        match self.active.take() {
            Some(mut channel) => {
                channel.transport.close();
                info!(conn_id = %channel.id, "[TABLE SESSION] channel closed");
                true
            }
            None => false,
        }
    }

    pub fn is_current(&self, id: ConnectionId) -> bool {
        self.active.as_ref().is_some_and(|c| c.id == id)
    }

    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.active.as_ref().map(|c| c.id)
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.active.as_ref().is_some_and(|c| c.connected)
    }

    pub fn identity(&self) -> Option<&JoinRequest> {
        self.active.as_ref().map(|c| &c.join)
    }

    /// Mark the channel live and announce the join. Runs again on every
    /// reconnect the transport reports.
    pub fn on_connected(&mut self) -> Result<(), ClientError> {
        let channel = self
            .active
            .as_mut()
            .ok_or_else(|| ClientError::not_connected("no channel to join on"))?;
        channel.connected = true;
        let join = channel.join.to_msg();
        debug!(conn_id = %channel.id, "[TABLE SESSION] sending joinTable");
        channel.transport.send(&join)
    }

    pub fn on_disconnected(&mut self, reason: Option<&str>) {
        if let Some(channel) = self.active.as_mut() {
            channel.connected = false;
            warn!(
                conn_id = %channel.id,
                reason = reason.unwrap_or("unknown"),
                "[TABLE SESSION] channel dropped"
            );
        }
    }

    /// Send an intent. `Ok(false)` when no live channel exists.
    pub fn send(&mut self, msg: &ClientMsg) -> Result<bool, ClientError> {
        let Some(channel) = self.active.as_mut().filter(|c| c.connected) else {
            debug!(event = msg.event_name(), "[TABLE SESSION] intent dropped, not connected");
            return Ok(false);
        };
        channel.transport.send(msg)?;
        Ok(true)
    }
}
