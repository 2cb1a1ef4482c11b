#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod services;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod timers;
pub mod ws;

// Re-exports for public API
pub use api::wallet::{HttpWalletApi, WalletApi, WalletBalance};
pub use config::{AnimationTimings, ClientConfig, RoundTimings, SessionTimings};
pub use error::ClientError;
pub use events::{Advisory, AdvisoryKind, ClientEvent, Notice, NoticeLevel};
pub use session::TableSession;
pub use timers::{Clock, ManualClock, SystemClock};
pub use ws::{ConnectionId, JoinRequest, MemoryTransport, Transport, TransportEvent, WsTransport};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    client_test_support::logging::init();
}
