//! Relay service — connection registry and verbatim fan-out.
//!
//! DESIGN
//! ======
//! The hub is payload-agnostic: an inbound frame is decoded just far enough
//! to validate its shape and log its event identity, then the *original
//! text* is re-emitted to every connected client, sender included. Malformed
//! frames are dropped — never applied, never rebroadcast.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is terminal for the single frame that triggered it. A bad
//! payload from one client never disturbs another client's session, and a
//! disconnect silently shrinks the fan-out set with no notification to peers.

use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::HubState;

// =============================================================================
// CONNECTION LIFECYCLE
// =============================================================================

/// Register a connection's outbound channel with the hub.
pub async fn connect(state: &HubState, client_id: Uuid, tx: mpsc::Sender<String>) {
    let mut clients = state.clients.write().await;
    clients.insert(client_id, tx);
    info!(%client_id, clients = clients.len(), "relay: client connected");
}

/// Remove a connection from the fan-out set. Peers are not notified.
pub async fn disconnect(state: &HubState, client_id: Uuid) {
    let mut clients = state.clients.write().await;
    clients.remove(&client_id);
    info!(%client_id, clients = clients.len(), "relay: client disconnected");
}

// =============================================================================
// FAN-OUT
// =============================================================================

/// Broadcast frame text to every connected client, **including** the sender.
pub async fn broadcast(state: &HubState, text: &str) {
    let clients = state.clients.read().await;
    for (client_id, tx) in clients.iter() {
        // Best-effort: a client that cannot keep up loses this copy only.
        if tx.try_send(text.to_owned()).is_err() {
            warn!(%client_id, "relay: client channel full, dropping frame copy");
        }
    }
}

/// Validate one inbound frame and fan it out verbatim.
///
/// Returns `true` when the frame was rebroadcast, `false` when it was
/// dropped as malformed.
pub async fn relay(state: &HubState, client_id: Uuid, text: &str) -> bool {
    match strokes::decode_event(text) {
        Ok(event) => {
            info!(%client_id, event = event.name(), "relay: fan-out");
            broadcast(state, text).await;
            true
        }
        Err(e) => {
            warn!(%client_id, error = %e, "relay: dropping malformed frame");
            false
        }
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
