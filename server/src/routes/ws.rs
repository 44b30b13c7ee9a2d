//! WebSocket handler — verbatim event relay.
//!
//! DESIGN
//! ======
//! On upgrade, generates a client ID and enters a `select!` loop:
//! - Incoming text frames → validate shape + fan out verbatim
//! - Fan-out copies from peers (and the client's own echo) → forward out
//!
//! The hub never inspects payloads beyond decode validation and imposes no
//! ordering across senders: two clients' concurrent frames may arrive in
//! different relative orders at different receivers.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register the connection's channel with the hub
//! 2. Client sends frames → relay validates → broadcast to all (self-inclusive)
//! 3. Close or send failure → remove from the fan-out set, no notification

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::relay;
use crate::state::{CLIENT_CHANNEL_CAPACITY, HubState};

pub async fn handle_ws(State(state): State<HubState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: HubState) {
    let client_id = Uuid::new_v4();

    // Per-connection channel fed by the hub's fan-out.
    let (client_tx, mut client_rx) = mpsc::channel::<String>(CLIENT_CHANNEL_CAPACITY);
    relay::connect(&state, client_id, client_tx).await;
    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        relay::relay(&state, client_id, text.as_str()).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            outbound = client_rx.recv() => {
                let Some(text) = outbound else { break };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    relay::disconnect(&state, client_id).await;
    info!(%client_id, "ws: client disconnected");
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
