//! Websocket transport: JSON text frames over tokio-tungstenite.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, trace, warn};

use crate::error::ClientError;
use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::ws::transport::{ConnectionId, Transport, TransportEvent};

pub type EventSender = mpsc::Sender<(ConnectionId, TransportEvent)>;

pub struct WsTransport {
    conn_id: ConnectionId,
    outbound: mpsc::UnboundedSender<Message>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
    closed: bool,
}

impl WsTransport {
    /// Dial `url` and start the reader/writer tasks.
    ///
    /// Inbound frames are forwarded to `events` tagged with `conn_id`. A
    /// `Connected` event is queued before any server push.
    pub async fn connect(
        url: &str,
        conn_id: ConnectionId,
        events: EventSender,
    ) -> Result<Self, ClientError> {
        let (stream, _response) = connect_async(url).await?;
        info!(conn_id = %conn_id, url, "[WS TRANSPORT] connected");

        let (mut sink, mut source) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

        if events.send((conn_id, TransportEvent::Connected)).await.is_err() {
            return Err(ClientError::transport("event receiver dropped"));
        }

        let writer = tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                let closing = matches!(msg, Message::Close(_));
                if let Err(err) = sink.send(msg).await {
                    warn!(conn_id = %conn_id, error = %err, "[WS TRANSPORT] send failed");
                    break;
                }
                if closing {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        let reader = tokio::spawn(async move {
            let reason = loop {
                match source.next().await {
                    Some(Ok(Message::Text(text))) => {
                        trace!(conn_id = %conn_id, len = text.len(), "[WS TRANSPORT] frame");
                        let event = match ServerMsg::decode_known(text.as_str()) {
                            Ok(Some(msg)) => TransportEvent::Message(msg),
                            Ok(None) => {
                                debug!(conn_id = %conn_id, "[WS TRANSPORT] unhandled event skipped");
                                continue;
                            }
                            Err(err) => {
                                warn!(
                                    conn_id = %conn_id,
                                    error = %err,
                                    "[WS TRANSPORT] undecodable server message"
                                );
                                TransportEvent::Undecodable {
                                    detail: err.to_string(),
                                }
                            }
                        };
                        if events.send((conn_id, event)).await.is_err() {
                            return; // Receiver dropped
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!(conn_id = %conn_id, "[WS TRANSPORT] closed by server");
                        break frame.map(|f| f.reason.to_string());
                    }
                    Some(Ok(_)) => {} // Ping/pong handled by tungstenite
                    Some(Err(err)) => {
                        warn!(conn_id = %conn_id, error = %err, "[WS TRANSPORT] read error");
                        break Some(err.to_string());
                    }
                    None => break None,
                }
            };
            let _ = events
                .send((conn_id, TransportEvent::Disconnected { reason }))
                .await;
        });

        Ok(Self {
            conn_id,
            outbound,
            reader,
            writer,
            closed: false,
        })
    }

    pub fn conn_id(&self) -> ConnectionId {
        self.conn_id
    }
}

impl Transport for WsTransport {
    fn send(&mut self, msg: &ClientMsg) -> Result<(), ClientError> {
        if self.closed {
            return Err(ClientError::transport("websocket already closed"));
        }
        let payload = msg.encode()?;
        self.outbound
            .send(Message::text(payload))
            .map_err(|_| ClientError::transport("websocket writer stopped"))
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.outbound.send(Message::Close(None));
        // The reader would otherwise report a Disconnected for a channel we
        // tore down on purpose.
        self.reader.abort();
        info!(conn_id = %self.conn_id, "[WS TRANSPORT] closed");
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.reader.abort();
        if !self.closed {
            self.writer.abort();
        }
    }
}
