//! In-process WebSocket peer that answers CDP commands.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use crate::client::{CdpClient, Channel, PendingMap};

/// Maps `(method, params)` to a result. `Value::Null` leaves the request unanswered.
pub(crate) type Responder = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

/// Connect a [`Channel`] to a local peer driven by `responder`.
pub(crate) async fn fake_channel(timeout: Duration, responder: Responder) -> Channel {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let (mut tx, mut rx) = ws.split();

        while let Some(Ok(Message::Text(text))) = rx.next().await {
            let request: Value = serde_json::from_str(&text).unwrap();
            let method = request["method"].as_str().unwrap_or_default();
            let result = responder(method, &request["params"]);
            if result.is_null() {
                continue;
            }
            let reply = json!({"id": request["id"], "result": result});
            if tx.send(Message::Text(reply.to_string().into())).await.is_err() {
                break;
            }
        }
    });

    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{}", addr))
        .await
        .unwrap();
    let (sink, source) = ws.split();
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    tokio::spawn(CdpClient::receive_loop(source, pending.clone()));

    Channel::new(sink, pending, timeout)
}
