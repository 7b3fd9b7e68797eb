//! Live feed surface: one WebSocket per observer.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, error};

use crate::state::AppState;

/// GET /ws - Upgrades to a WebSocket subscribed to the pipeline.
///
/// The registry queues the current status as the first message; thereafter
/// the client receives one JSON object per analyzed article. Inbound client
/// frames are not interpreted.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let broadcaster = state.controller.broadcaster().clone();
    let (id, mut rx) = broadcaster.subscribe(state.controller.status());
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                // Channel closes only if the broadcaster dropped us after a
                // send failure.
                let Some(message) = outbound else { break };
                match serde_json::to_string(&message) {
                    Ok(text) => {
                        if sink.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(subscriber_id = id, error = %e, "Failed to serialize stream message");
                    }
                }
            }
            inbound = stream.next() => {
                match inbound {
                    None | Some(Err(_)) | Some(Ok(Message::Close(_))) => break,
                    // Client-to-server traffic keeps the connection open but
                    // is otherwise ignored.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    broadcaster.unsubscribe(id);
    debug!(subscriber_id = id, "Client disconnected");
}
