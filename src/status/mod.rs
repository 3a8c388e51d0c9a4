//! Session status reporting
//!
//! Every state-machine operation, success or failure, emits exactly one
//! `StatusEvent` describing the resulting status. The `StatusEmitter` fans
//! these out to registered listeners synchronously on the caller's context.

mod emitter;
mod event;

pub use emitter::{StatusEmitter, StatusListener, SubscriptionHandle};
pub use event::{StatusEvent, StatusKind};
