//! Transport abstraction for the realtime channel.
//!
//! A transport only knows how to push an intent out and how to close. Inbound
//! traffic is delivered by whoever drives the session as [`TransportEvent`]s
//! tagged with the [`ConnectionId`] they belong to, so events from a replaced
//! channel can be told apart from the live one.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::ClientError;
use crate::ws::protocol::{ClientMsg, ServerMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connected,
    Disconnected { reason: Option<String> },
    Message(ServerMsg),
    /// A push for a handled event whose payload could not be decoded.
    Undecodable { detail: String },
}

pub trait Transport: Send {
    fn send(&mut self, msg: &ClientMsg) -> Result<(), ClientError>;

    /// Idempotent.
    fn close(&mut self);
}

/// In-process transport that records every intent it is asked to send.
///
/// The recorded log is shared, so a test can keep a [`SentLog`] handle after
/// handing the transport itself to the session.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    log: SentLog,
    closed: bool,
    fail_sends: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SentLog {
    inner: Arc<Mutex<SentLogInner>>,
}

#[derive(Debug, Default)]
struct SentLogInner {
    sent: Vec<ClientMsg>,
    closes: usize,
}

impl SentLog {
    pub fn sent(&self) -> Vec<ClientMsg> {
        self.inner.lock().sent.clone()
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.inner
            .lock()
            .sent
            .iter()
            .map(ClientMsg::event_name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn closes(&self) -> usize {
        self.inner.lock().closes
    }

    pub fn clear(&self) {
        self.inner.lock().sent.clear();
    }
}

impl MemoryTransport {
    pub fn new() -> (Self, SentLog) {
        let transport = Self::default();
        let log = transport.log.clone();
        (transport, log)
    }

    /// A transport whose sends fail, as if the socket died underneath.
    pub fn failing() -> (Self, SentLog) {
        let (mut transport, log) = Self::new();
        transport.fail_sends = true;
        (transport, log)
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, msg: &ClientMsg) -> Result<(), ClientError> {
        if self.closed {
            return Err(ClientError::transport("memory transport is closed"));
        }
        if self.fail_sends {
            return Err(ClientError::transport("memory transport refused send"));
        }
        self.log.inner.lock().sent.push(msg.clone());
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.log.inner.lock().closes += 1;
        }
    }
}
