//! Event bus for observing menu activity.
//!
//! Subscriptions are plain callbacks invoked synchronously, in subscription
//! order, from inside the call that produced the event.

mod bus;
mod channel;

pub use bus::{EventBus, EventKind};
pub use channel::{Channel, Listener, ReplayChannel, SubscriptionId};
