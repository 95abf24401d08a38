//! `GET /ws` — WebSocket upgrade for state-change pushes.
//!
//! The channel is push-only: the server sends one JSON frame per
//! notification and ignores inbound traffic. A client that stops reading is
//! detected by its next failed send and dropped from the set; nothing is
//! retried.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::debug;

use roomhub_app::ports::WebEventSink;

use crate::clients::ClientSet;
use crate::state::AppState;

/// Upgrade the connection and register the client with the notifier.
pub async fn upgrade<S>(State(state): State<AppState<S>>, ws: WebSocketUpgrade) -> Response
where
    S: WebEventSink + Send + Sync + 'static,
{
    ws.on_upgrade(move |socket| serve(socket, state.clients.clone()))
}

async fn serve(mut socket: WebSocket, clients: ClientSet) {
    let (id, mut outbound) = clients.register();
    debug!(client = ?id, "websocket client connected");

    while let Some(frame) = outbound.recv().await {
        if socket.send(Message::Text(frame.into())).await.is_err() {
            break;
        }
    }

    clients.remove(id);
    debug!(client = ?id, "websocket client disconnected");
}
