// Minimal scripted table server over a real websocket.
//
// Accepts one client, waits for `joinTable`, answers with the given pushes,
// then records every later text frame until the client goes away.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

pub struct ScriptedServer {
    pub url: String,
    pub received: mpsc::UnboundedReceiver<Value>,
    pub handle: JoinHandle<()>,
}

pub async fn spawn_table_server(on_join: Vec<Value>) -> ScriptedServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let (tx, received) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        let Ok((tcp, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(tcp).await else {
            return;
        };
        while let Some(Ok(frame)) = ws.next().await {
            let Message::Text(text) = frame else {
                continue;
            };
            let Ok(value) = serde_json::from_str::<Value>(text.as_str()) else {
                continue;
            };
            let is_join = value["event"] == "joinTable";
            let _ = tx.send(value);
            if is_join {
                for push in &on_join {
                    if ws.send(Message::text(push.to_string())).await.is_err() {
                        return;
                    }
                }
            }
        }
    });

    ScriptedServer {
        url: format!("ws://{addr}"),
        received,
        handle,
    }
}
