//! Menu service - the context object owning every menu instance.
//!
//! The service holds the registry, the event bus and the current URL. All
//! work happens synchronously inside the call that triggers it: events for
//! one operation are fully delivered before the call returns.
//!
//! Operations addressed to an unknown tag, path or parent are no-ops.

use tracing::{debug, warn};

use crate::config::MenuConfig;
use crate::error::{MenuError, MenuResult};
use crate::events::{EventBus, EventKind, SubscriptionId};
use crate::menu::{
    ItemPath, MenuBag, MenuEntry, MenuHandle, MenuItem, MenuOptions, MenuRegistry, tree,
};
use crate::resolve::{self, Resolution};
use crate::view::{self, ViewNode};

/// An event waiting to be dispatched once tree mutation is finished.
enum Outgoing {
    Emit(EventKind, MenuBag),
    /// Goes to `ItemSelect` listeners and becomes the replayed selection.
    Selected(MenuBag),
    /// A menu under the tag no longer has a selection.
    Cleared(String),
}

/// Owns the menus of an application and dispatches their events.
pub struct MenuService {
    config: MenuConfig,
    registry: MenuRegistry,
    bus: EventBus,
    current_url: Option<String>,
}

impl MenuService {
    pub fn new(config: MenuConfig) -> Self {
        let registry = MenuRegistry::new(config.max_depth);
        Self {
            config,
            registry,
            bus: EventBus::new(),
            current_url: None,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    /// The last URL passed to [`navigate`](Self::navigate).
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    fn resolve_tag(&self, tag: Option<&str>) -> String {
        tag.unwrap_or(&self.config.default_tag).to_string()
    }

    /// Register a menu with the configured default options.
    pub fn register(&mut self, tag: Option<&str>, items: Vec<MenuItem>) -> MenuResult<MenuHandle> {
        let options = MenuOptions {
            auto_collapse: self.config.auto_collapse,
        };
        self.register_with(tag, items, options)
    }

    /// Register a menu under `tag` (or the default tag).
    ///
    /// The initial selection is the item matching the current URL, or the
    /// first item declared `selected` when nothing matches. A resulting
    /// selection is published, so later `get_selected_item` subscribers
    /// still observe it.
    pub fn register_with(
        &mut self,
        tag: Option<&str>,
        items: Vec<MenuItem>,
        options: MenuOptions,
    ) -> MenuResult<MenuHandle> {
        let tag = self.resolve_tag(tag);
        let handle = self.registry.register(&tag, items, options)?;
        self.bus.open(&tag);

        let max_depth = self.registry.max_depth();
        let url = self.current_url.clone();
        let mut outgoing = Vec::new();
        if let Some(entry) = self.registry.entry_mut(handle) {
            let resolution = resolve::resolve_initial(&mut entry.items, url.as_deref(), max_depth);
            settle(entry, resolution, false, &mut outgoing);
        }
        self.dispatch(outgoing);

        Ok(handle)
    }

    /// Register a menu from a JSON array of item descriptors.
    pub fn register_json(&mut self, tag: Option<&str>, json: &str) -> MenuResult<MenuHandle> {
        let items: Vec<MenuItem> =
            serde_json::from_str(json).map_err(|e| MenuError::InvalidDescriptors {
                tag: self.resolve_tag(tag),
                details: e.to_string(),
            })?;
        self.register(tag, items)
    }

    /// Tear down a menu instance.
    ///
    /// When it was the last menu using its tag, the tag's channels and
    /// their listeners are dropped too.
    pub fn unregister(&mut self, handle: MenuHandle) -> MenuResult<()> {
        let entry = self
            .registry
            .unregister(handle)
            .ok_or(MenuError::UnknownHandle(handle.id()))?;

        if !self.registry.has_tag(&entry.tag) {
            self.bus.close(&entry.tag);
        } else if entry.selected.is_some() {
            self.retire_selection(&entry.tag);
        }
        Ok(())
    }

    /// Items of the first menu registered under `tag`.
    pub fn items(&self, tag: Option<&str>) -> &[MenuItem] {
        let tag = self.resolve_tag(tag);
        self.registry.items(&tag)
    }

    /// Render model of the first menu registered under `tag`.
    pub fn view(&self, tag: Option<&str>) -> Vec<ViewNode> {
        view::render(self.items(tag))
    }

    /// Path of the selected item of the first menu under `tag`.
    pub fn selected_path(&self, tag: Option<&str>) -> Option<&ItemPath> {
        let tag = self.resolve_tag(tag);
        self.registry
            .entries_for(&tag)
            .next()
            .and_then(|entry| entry.selected.as_ref())
    }

    /// Find the first item titled `title` in the first menu under `tag`.
    pub fn find_item(&self, tag: Option<&str>, title: &str) -> Option<ItemPath> {
        tree::find_by_title(self.items(tag), title, self.registry.max_depth())
    }

    /// Resolve every menu against a new location.
    pub fn navigate(&mut self, url: &str) {
        self.current_url = Some(url.to_string());

        let max_depth = self.registry.max_depth();
        let mut outgoing = Vec::new();
        for entry in self.registry.entries_mut() {
            let resolution = resolve::resolve_url(&mut entry.items, url, max_depth);
            settle(entry, resolution, false, &mut outgoing);
        }

        debug!(url = %url, events = outgoing.len(), "resolved navigation");
        self.dispatch(outgoing);
    }

    /// Append items to the top level of every menu under `tag`.
    ///
    /// Returns the number of menus that received the items.
    pub fn add_items(&mut self, items: Vec<MenuItem>, tag: Option<&str>) -> MenuResult<usize> {
        let tag = self.resolve_tag(tag);
        let items = self.prepare(&tag, items, 0)?;

        let max_depth = self.registry.max_depth();
        let url = self.current_url.clone();
        let mut outgoing = Vec::new();
        let mut updated = 0;
        for entry in self.registry.entries_for_mut(&tag) {
            entry.items.extend(items.iter().cloned());
            let resolution = resolve::resolve_initial(&mut entry.items, url.as_deref(), max_depth);
            settle(entry, resolution, false, &mut outgoing);
            updated += 1;
        }

        debug!(tag = %tag, added = items.len(), menus = updated, "added menu items");
        self.dispatch(outgoing);
        Ok(updated)
    }

    /// Append items as children of `parent` in every menu under `tag`.
    ///
    /// Menus where `parent` does not exist are left untouched.
    pub fn add_items_under(
        &mut self,
        items: Vec<MenuItem>,
        parent: &ItemPath,
        tag: Option<&str>,
    ) -> MenuResult<usize> {
        let tag = self.resolve_tag(tag);
        let items = self.prepare(&tag, items, parent.depth())?;

        let max_depth = self.registry.max_depth();
        let url = self.current_url.clone();
        let mut outgoing = Vec::new();
        let mut updated = 0;
        for entry in self.registry.entries_for_mut(&tag) {
            let Some(target) = tree::item_at_mut(&mut entry.items, parent) else {
                continue;
            };
            target.children.extend(items.iter().cloned());
            let resolution = resolve::resolve_initial(&mut entry.items, url.as_deref(), max_depth);
            settle(entry, resolution, false, &mut outgoing);
            updated += 1;
        }

        if updated == 0 {
            warn!(tag = %tag, parent = %parent, "parent menu item not found, items not added");
        }
        self.dispatch(outgoing);
        Ok(updated)
    }

    fn prepare(
        &self,
        tag: &str,
        mut items: Vec<MenuItem>,
        offset: usize,
    ) -> MenuResult<Vec<MenuItem>> {
        self.registry.check_depth(tag, &items, offset)?;
        tree::normalize(&mut items);
        Ok(items)
    }

    /// Collapse every expanded item of the menus under `tag`, or of all
    /// menus when `tag` is `None`.
    ///
    /// One `SubmenuToggle` event is emitted per collapsed item, in
    /// pre-order.
    pub fn collapse_all(&mut self, tag: Option<&str>) {
        let max_depth = self.registry.max_depth();
        let mut outgoing = Vec::new();
        for entry in self.registry.entries_matching_mut(tag) {
            for path in resolve::collapse(&mut entry.items, &[], max_depth) {
                push_bag(entry, &path, EventKind::SubmenuToggle, &mut outgoing);
            }
        }

        debug!(tag = ?tag, collapsed = outgoing.len(), "collapsed menus");
        self.dispatch(outgoing);
    }

    /// Report a hover over the item at `path`.
    pub fn hover_item(&mut self, tag: Option<&str>, path: &ItemPath) {
        let tag = self.resolve_tag(tag);
        let mut outgoing = Vec::new();
        for entry in self.registry.entries_for_mut(&tag) {
            push_bag(entry, path, EventKind::ItemHover, &mut outgoing);
        }
        self.dispatch(outgoing);
    }

    /// Report a click on the item at `path`.
    ///
    /// Clicking a parent toggles its submenu; clicking any other non-group
    /// item selects it.
    pub fn click_item(&mut self, tag: Option<&str>, path: &ItemPath) {
        let tag = self.resolve_tag(tag);
        let max_depth = self.registry.max_depth();
        let mut outgoing = Vec::new();
        for entry in self.registry.entries_for_mut(&tag) {
            let Some(item) = tree::item_at(&entry.items, path) else {
                continue;
            };
            let has_children = item.has_children();

            push_bag(entry, path, EventKind::ItemClick, &mut outgoing);
            if has_children {
                toggle_in(entry, path, max_depth, &mut outgoing);
            } else {
                select_in(entry, path, max_depth, &mut outgoing);
            }
        }
        self.dispatch(outgoing);
    }

    /// Flip the `expanded` flag of the item at `path`.
    pub fn toggle_submenu(&mut self, tag: Option<&str>, path: &ItemPath) {
        let tag = self.resolve_tag(tag);
        let max_depth = self.registry.max_depth();
        let mut outgoing = Vec::new();
        for entry in self.registry.entries_for_mut(&tag) {
            toggle_in(entry, path, max_depth, &mut outgoing);
        }
        self.dispatch(outgoing);
    }

    /// Select the item at `path` programmatically.
    pub fn select_item(&mut self, tag: Option<&str>, path: &ItemPath) {
        let tag = self.resolve_tag(tag);
        let max_depth = self.registry.max_depth();
        let mut outgoing = Vec::new();
        for entry in self.registry.entries_for_mut(&tag) {
            select_in(entry, path, max_depth, &mut outgoing);
        }
        self.dispatch(outgoing);
    }

    /// URL of the first item marked `home` in the menu under `tag`.
    ///
    /// The caller hands it to its router; the resulting navigation then
    /// selects the item.
    pub fn navigate_home(&self, tag: Option<&str>) -> Option<String> {
        let url = tree::pre_order(self.items(tag), self.registry.max_depth())
            .find(|(_, item)| item.home && !item.group)
            .and_then(|(_, item)| item.url.clone());

        if url.is_none() {
            debug!(tag = ?tag, "no home item");
        }
        url
    }

    /// Listen for selections in menus under `tag` (or all menus).
    pub fn on_item_select(
        &mut self,
        tag: Option<&str>,
        listener: impl FnMut(&MenuBag) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(EventKind::ItemSelect, tag, Box::new(listener))
    }

    /// Listen for hovers in menus under `tag` (or all menus).
    pub fn on_item_hover(
        &mut self,
        tag: Option<&str>,
        listener: impl FnMut(&MenuBag) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(EventKind::ItemHover, tag, Box::new(listener))
    }

    /// Listen for clicks in menus under `tag` (or all menus).
    pub fn on_item_click(
        &mut self,
        tag: Option<&str>,
        listener: impl FnMut(&MenuBag) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(EventKind::ItemClick, tag, Box::new(listener))
    }

    /// Listen for expand/collapse flips in menus under `tag` (or all menus).
    pub fn on_submenu_toggle(
        &mut self,
        tag: Option<&str>,
        listener: impl FnMut(&MenuBag) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(EventKind::SubmenuToggle, tag, Box::new(listener))
    }

    /// Observe the selection of the menus under `tag` (or the default tag).
    ///
    /// The current selection, if any, is delivered immediately; every later
    /// selection follows.
    pub fn get_selected_item(
        &mut self,
        tag: Option<&str>,
        listener: impl FnMut(&MenuBag) + Send + 'static,
    ) -> SubscriptionId {
        let tag = self.resolve_tag(tag);
        self.bus
            .subscribe(EventKind::SelectedItem, Some(&tag), Box::new(listener))
    }

    /// Stop a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn dispatch(&mut self, outgoing: Vec<Outgoing>) {
        for event in outgoing {
            match event {
                Outgoing::Emit(kind, bag) => self.bus.emit(kind, &bag),
                Outgoing::Selected(bag) => {
                    self.bus.emit(EventKind::ItemSelect, &bag);
                    self.bus.publish_selected(bag);
                }
                Outgoing::Cleared(tag) => self.retire_selection(&tag),
            }
        }
    }

    /// One menu under `tag` lost its selection. The replayed value falls
    /// back to a selection another menu under the tag still holds, and is
    /// cleared only when none is left.
    fn retire_selection(&mut self, tag: &str) {
        let live: Vec<MenuBag> = self
            .registry
            .entries_for(tag)
            .filter_map(|entry| {
                let path = entry.selected.as_ref()?;
                tree::item_at(&entry.items, path)
                    .map(|item| MenuBag::new(entry.tag.clone(), path.clone(), item.clone()))
            })
            .collect();

        if self
            .bus
            .last_selected(tag)
            .is_some_and(|last| live.contains(last))
        {
            return;
        }
        match live.into_iter().next() {
            Some(bag) => self.bus.restore_selected(bag),
            None => self.bus.clear_selected(tag),
        }
    }
}

impl Default for MenuService {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

fn push_bag(entry: &MenuEntry, path: &ItemPath, kind: EventKind, outgoing: &mut Vec<Outgoing>) {
    if let Some(item) = tree::item_at(&entry.items, path) {
        let bag = MenuBag::new(entry.tag.clone(), path.clone(), item.clone());
        outgoing.push(Outgoing::Emit(kind, bag));
    }
}

/// Record a resolution on the entry and queue the events it implies.
///
/// Opened ancestors produce toggle events. The selection is announced when
/// it changed, or always when `force` is set (user interaction).
fn settle(
    entry: &mut MenuEntry,
    resolution: Resolution,
    force: bool,
    outgoing: &mut Vec<Outgoing>,
) {
    for path in &resolution.opened {
        push_bag(entry, path, EventKind::SubmenuToggle, outgoing);
    }

    if !force && resolution.selected == entry.selected {
        return;
    }
    entry.selected = resolution.selected;

    match &entry.selected {
        Some(path) => {
            if let Some(item) = tree::item_at(&entry.items, path) {
                let bag = MenuBag::new(entry.tag.clone(), path.clone(), item.clone());
                outgoing.push(Outgoing::Selected(bag));
            }
        }
        None => outgoing.push(Outgoing::Cleared(entry.tag.clone())),
    }
}

fn toggle_in(
    entry: &mut MenuEntry,
    path: &ItemPath,
    max_depth: usize,
    outgoing: &mut Vec<Outgoing>,
) {
    let Some(item) = tree::item_at(&entry.items, path) else {
        return;
    };
    let opening = !item.expanded;

    if entry.options.auto_collapse && opening {
        let keep: Vec<ItemPath> = path.ancestors().collect();
        for collapsed in resolve::collapse(&mut entry.items, &keep, max_depth) {
            push_bag(entry, &collapsed, EventKind::SubmenuToggle, outgoing);
        }
    }

    if let Some(item) = tree::item_at_mut(&mut entry.items, path) {
        item.expanded = opening;
    }
    push_bag(entry, path, EventKind::SubmenuToggle, outgoing);
}

fn select_in(
    entry: &mut MenuEntry,
    path: &ItemPath,
    max_depth: usize,
    outgoing: &mut Vec<Outgoing>,
) {
    match tree::item_at(&entry.items, path) {
        Some(item) if !item.group => {}
        _ => return,
    }

    if entry.options.auto_collapse {
        let mut keep: Vec<ItemPath> = path.ancestors().collect();
        keep.push(path.clone());
        for collapsed in resolve::collapse(&mut entry.items, &keep, max_depth) {
            push_bag(entry, &collapsed, EventKind::SubmenuToggle, outgoing);
        }
    }

    let resolution = resolve::apply_selection(&mut entry.items, Some(path.clone()), max_depth);
    settle(entry, resolution, true, outgoing);
}
