//! Tag-scoped event bus.
//!
//! Every tag owns its own set of channels. Listeners subscribed without a
//! tag receive the events of every tag, after the tag-scoped listeners.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::channel::{Channel, Listener, ReplayChannel, SubscriptionId};
use crate::menu::MenuBag;

/// The kinds of menu events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ItemSelect,
    ItemHover,
    ItemClick,
    SubmenuToggle,
    /// Replays the latest selection to new subscribers.
    SelectedItem,
}

/// Channels for one tag.
#[derive(Default)]
struct TagChannels {
    item_select: Channel,
    item_hover: Channel,
    item_click: Channel,
    submenu_toggle: Channel,
    selected_item: ReplayChannel,
}

impl TagChannels {
    fn channel_mut(&mut self, kind: EventKind) -> Option<&mut Channel> {
        match kind {
            EventKind::ItemSelect => Some(&mut self.item_select),
            EventKind::ItemHover => Some(&mut self.item_hover),
            EventKind::ItemClick => Some(&mut self.item_click),
            EventKind::SubmenuToggle => Some(&mut self.submenu_toggle),
            EventKind::SelectedItem => None,
        }
    }
}

/// Where a subscription lives, so it can be removed by id alone.
#[derive(Debug, Clone)]
struct Route {
    kind: EventKind,
    tag: Option<String>,
}

/// Multiplexed, tag-keyed event bus.
#[derive(Default)]
pub struct EventBus {
    tags: HashMap<String, TagChannels>,
    /// Listeners for all tags. The replay channel is never used here.
    wildcard: TagChannels,
    routes: HashMap<SubscriptionId, Route>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure channels exist for `tag`.
    pub fn open(&mut self, tag: &str) {
        if !self.tags.contains_key(tag) {
            debug!(tag = %tag, "opened menu channels");
            self.tags.insert(tag.to_string(), TagChannels::default());
        }
    }

    /// Drop every channel and listener of `tag`.
    pub fn close(&mut self, tag: &str) {
        if self.tags.remove(tag).is_some() {
            self.routes.retain(|_, route| route.tag.as_deref() != Some(tag));
            debug!(tag = %tag, "closed menu channels");
        }
    }

    pub fn is_open(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Subscribe to `kind` events of `tag`, or of every tag when `tag` is
    /// `None`.
    ///
    /// `SelectedItem` subscriptions require a tag; a tag-less one is
    /// accepted but never receives anything.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        tag: Option<&str>,
        listener: Listener,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        match tag {
            Some(tag) => {
                self.open(tag);
                if let Some(channels) = self.tags.get_mut(tag) {
                    match channels.channel_mut(kind) {
                        Some(channel) => channel.subscribe(id, listener),
                        None => channels.selected_item.subscribe(id, listener),
                    }
                }
            }
            None => {
                if let Some(channel) = self.wildcard.channel_mut(kind) {
                    channel.subscribe(id, listener);
                }
            }
        }

        self.routes.insert(
            id,
            Route {
                kind,
                tag: tag.map(str::to_string),
            },
        );
        id
    }

    /// Remove a subscription. Returns false if it was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(route) = self.routes.remove(&id) else {
            return false;
        };

        let channels = match &route.tag {
            Some(tag) => match self.tags.get_mut(tag) {
                Some(channels) => channels,
                None => return false,
            },
            None => &mut self.wildcard,
        };

        match channels.channel_mut(route.kind) {
            Some(channel) => channel.unsubscribe(id),
            None => channels.selected_item.unsubscribe(id),
        }
    }

    /// Emit a non-replay event for the bag's tag.
    pub fn emit(&mut self, kind: EventKind, bag: &MenuBag) {
        if kind == EventKind::SelectedItem {
            self.publish_selected(bag.clone());
            return;
        }

        if let Some(channel) = self
            .tags
            .get_mut(&bag.tag)
            .and_then(|channels| channels.channel_mut(kind))
        {
            channel.emit(bag);
        }
        if let Some(channel) = self.wildcard.channel_mut(kind) {
            channel.emit(bag);
        }
    }

    /// Publish a new selection on the tag's replay channel.
    pub fn publish_selected(&mut self, bag: MenuBag) {
        self.open(&bag.tag);
        if let Some(channels) = self.tags.get_mut(&bag.tag) {
            channels.selected_item.publish(bag);
        }
    }

    /// Replace the tag's replayed selection without notifying listeners.
    pub fn restore_selected(&mut self, bag: MenuBag) {
        if let Some(channels) = self.tags.get_mut(&bag.tag) {
            channels.selected_item.store(bag);
        }
    }

    /// Forget the tag's replayed selection.
    pub fn clear_selected(&mut self, tag: &str) {
        if let Some(channels) = self.tags.get_mut(tag) {
            channels.selected_item.clear();
        }
    }

    /// The selection a new `SelectedItem` subscriber would receive.
    pub fn last_selected(&self, tag: &str) -> Option<&MenuBag> {
        self.tags.get(tag).and_then(|c| c.selected_item.last())
    }

    /// Total number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.routes.len()
    }
}
