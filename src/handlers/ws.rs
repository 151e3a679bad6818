//! WebSocket handler: overlay connection lifecycle.
//!
//! Overlay clients are pure consumers. A fresh connection is registered with
//! the hub (which greets it with `hello`), then frames flow one way until the
//! peer closes or errors out.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::handlers::http::AppState;

/// Upgrade HTTP to WebSocket at `/`.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let socket_id = state.hub.open(tx).await;
    info!(socket_id = %socket_id, "ws connected");

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                // Nothing upstream is expected from overlays.
                debug!(socket_id = %socket_id, bytes = text.len(), "ignoring client frame");
            }
            Message::Binary(_) => {
                debug!(socket_id = %socket_id, "ignoring binary frame");
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => break,
        }
    }

    state.hub.close(&socket_id).await;
    send_task.abort();
    info!(socket_id = %socket_id, "ws disconnected");
}
