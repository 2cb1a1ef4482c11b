pub mod connection;
pub mod protocol;
pub mod transport;
pub mod ws_transport;

pub use connection::{ConnectionManager, JoinRequest};
pub use protocol::{ClientMsg, DrawSource, ServerMsg};
pub use transport::{ConnectionId, MemoryTransport, SentLog, Transport, TransportEvent};
pub use ws_transport::WsTransport;
