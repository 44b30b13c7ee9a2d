//! Shared relay state.
//!
//! DESIGN
//! ======
//! `HubState` is injected into Axum handlers via the `State` extractor. The
//! connection set is the hub's only state: there are no rooms, no per-client
//! filtering, and nothing durable. It is mutated only on connect/disconnect;
//! fan-out takes a read lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// Outbound frames queued per connection before fan-out copies are dropped.
pub const CLIENT_CHANNEL_CAPACITY: usize = 256;

/// Shared hub state. Clone is required by Axum — the connection map is
/// Arc-wrapped.
#[derive(Clone, Default)]
pub struct HubState {
    /// Connected clients: `client_id` -> sender for outgoing frame text.
    pub clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
}

impl HubState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
