//! Typed cross-view signals.
//!
//! The legacy web client kept sibling views in sync with untyped DOM
//! events that each page re-fetched on. The gateway replaces that with a
//! typed broadcast channel: mutations publish a [`StoreEvent`] and any
//! interested task subscribes.

use tokio::sync::broadcast;

use autotienda_core::UserId;

/// A mutation signal published after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A user's cart changed (line added, updated, removed, or cleared).
    CartChanged {
        user_id: UserId,
    },
    /// The product collection changed.
    ProductsChanged,
    /// A user registered.
    UserCreated {
        user_id: UserId,
    },
}

/// Broadcast bus for [`StoreEvent`]s.
///
/// Publishing never blocks and never fails: with no subscribers the event
/// is simply dropped, matching a DOM event nobody listens to.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to every current subscriber.
    pub fn publish(&self, event: StoreEvent) {
        let receivers = self.tx.send(event.clone()).unwrap_or(0);
        tracing::debug!(?event, receivers, "store event published");
    }

    /// Subscribe to future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
