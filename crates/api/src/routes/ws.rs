//! Live status relay: forwards every `job_updates` message to the client.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::get, Router};
use vidforge_bus::MessageBus;
use vidforge_core::topics::TOPIC_JOB_UPDATES;

use crate::state::AppState;

/// GET /ws — upgrade and start relaying status updates.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| relay_updates(socket, state.bus))
}

/// Pump bus updates to the socket until either side goes away.
async fn relay_updates(mut socket: WebSocket, bus: Arc<dyn MessageBus>) {
    let mut updates = match bus.subscribe(TOPIC_JOB_UPDATES).await {
        Ok(rx) => rx,
        Err(e) => {
            tracing::error!(error = %e, "WebSocket relay could not subscribe to updates");
            return;
        }
    };

    tracing::info!("WebSocket status subscriber connected");

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(payload) => {
                    if socket.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {
                    // Clients only listen on this socket.
                }
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    }

    tracing::info!("WebSocket status subscriber disconnected");
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}
