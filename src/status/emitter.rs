use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

use super::event::{StatusEvent, StatusKind};

/// Callback invoked for every status emission.
pub type StatusListener = Arc<dyn Fn(StatusEvent) + Send + Sync>;

/// Opaque handle returned by [`StatusEmitter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(u64);

/// Broadcasts status events to registered listeners.
///
/// Delivery is synchronous and fire-and-forget on the emitting call's
/// execution context, in listener insertion order. A listener that panics is
/// logged and skipped; it never fails the triggering operation.
pub struct StatusEmitter {
    listeners: Mutex<Vec<(u64, StatusListener)>>,
    next_id: AtomicU64,
}

impl StatusEmitter {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener. Listeners are invoked in registration order.
    pub fn subscribe(&self, listener: StatusListener) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.push((id, listener));
        SubscriptionHandle(id)
    }

    /// Remove a listener. Removing a handle that is absent is a no-op.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.retain(|(id, _)| *id != handle.0);
    }

    /// Deliver an event to every registered listener.
    pub fn emit(&self, status: StatusKind) -> StatusEvent {
        let event = StatusEvent::new(status);

        // Snapshot under the lock so listeners can subscribe/unsubscribe
        // from within their own callbacks without deadlocking.
        let snapshot: Vec<StatusListener> = {
            let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                warn!("status listener panicked while handling {:?}", status);
            }
        }

        event
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for StatusEmitter {
    fn default() -> Self {
        Self::new()
    }
}
