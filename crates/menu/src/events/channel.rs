//! Synchronous multicast channels.

use serde::{Deserialize, Serialize};

use crate::menu::MenuBag;

/// Callback invoked synchronously for every event on a channel.
pub type Listener = Box<dyn FnMut(&MenuBag) + Send>;

/// Identifies one subscription across the whole bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub(crate) u64);

/// Listeners called in subscription order.
#[derive(Default)]
pub struct Channel {
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Channel {
    pub fn subscribe(&mut self, id: SubscriptionId, listener: Listener) {
        self.listeners.push((id, listener));
    }

    /// Remove a listener. Returns false if it was not subscribed here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, bag: &MenuBag) {
        for (_, listener) in &mut self.listeners {
            listener(bag);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// A channel that remembers the last published value and replays it to
/// each new subscriber.
#[derive(Default)]
pub struct ReplayChannel {
    channel: Channel,
    last: Option<MenuBag>,
}

impl ReplayChannel {
    /// Subscribe, receiving the last published value immediately if any.
    pub fn subscribe(&mut self, id: SubscriptionId, mut listener: Listener) {
        if let Some(bag) = &self.last {
            listener(bag);
        }
        self.channel.subscribe(id, listener);
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    /// Emit to every listener, then store as the value to replay.
    pub fn publish(&mut self, bag: MenuBag) {
        self.channel.emit(&bag);
        self.last = Some(bag);
    }

    /// Replace the stored value without emitting.
    pub fn store(&mut self, bag: MenuBag) {
        self.last = Some(bag);
    }

    /// Forget the stored value without emitting.
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&MenuBag> {
        self.last.as_ref()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
