//! Menu registry - owns the live item tree of every rendered menu.
//!
//! Each registered menu is an entry keyed by an opaque tag. Several entries
//! may share a tag; operations addressed to that tag apply to all of them.
//! Entries under different tags never share items.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ItemPath, MenuItem, tree};
use crate::error::{MenuError, MenuResult};

/// Opaque handle identifying one registered menu instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuHandle(u64);

impl MenuHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Per-menu behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOptions {
    /// Collapse unrelated expanded items when the user selects or toggles
    /// an item.
    #[serde(default)]
    pub auto_collapse: bool,
}

/// One registered menu instance.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub handle: MenuHandle,
    pub tag: String,
    pub items: Vec<MenuItem>,
    /// Path of the currently selected item, if any.
    pub selected: Option<ItemPath>,
    pub options: MenuOptions,
}

/// Registry of all live menu instances.
#[derive(Debug)]
pub struct MenuRegistry {
    /// Entries in registration order.
    entries: Vec<MenuEntry>,
    next_handle: u64,
    max_depth: usize,
}

impl MenuRegistry {
    /// Create an empty registry accepting trees up to `max_depth` levels.
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 1,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Register a menu tree under `tag`.
    ///
    /// Group items are normalized so they carry no url and no selection.
    pub fn register(
        &mut self,
        tag: &str,
        mut items: Vec<MenuItem>,
        options: MenuOptions,
    ) -> MenuResult<MenuHandle> {
        self.check_depth(tag, &items, 0)?;

        let normalized = tree::normalize(&mut items);
        if normalized > 0 {
            debug!(tag = %tag, normalized, "stripped url/selection from group items");
        }

        let handle = MenuHandle(self.next_handle);
        self.next_handle += 1;

        debug!(tag = %tag, handle = handle.0, items = items.len(), "registered menu");

        self.entries.push(MenuEntry {
            handle,
            tag: tag.to_string(),
            items,
            selected: None,
            options,
        });

        Ok(handle)
    }

    /// Verify that `items` attached `offset` levels deep stay within bounds.
    pub fn check_depth(&self, tag: &str, items: &[MenuItem], offset: usize) -> MenuResult<()> {
        let depth = offset + tree::depth(items);
        if depth > self.max_depth {
            return Err(MenuError::TooDeep {
                tag: tag.to_string(),
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }

    /// Remove a menu instance, returning its entry.
    pub fn unregister(&mut self, handle: MenuHandle) -> Option<MenuEntry> {
        let index = self.entries.iter().position(|e| e.handle == handle)?;
        let entry = self.entries.remove(index);
        debug!(tag = %entry.tag, handle = handle.0, "unregistered menu");
        Some(entry)
    }

    pub fn entry(&self, handle: MenuHandle) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.handle == handle)
    }

    pub fn entry_mut(&mut self, handle: MenuHandle) -> Option<&mut MenuEntry> {
        self.entries.iter_mut().find(|e| e.handle == handle)
    }

    /// All entries registered under `tag`, in registration order.
    pub fn entries_for<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a MenuEntry> {
        self.entries.iter().filter(move |e| e.tag == tag)
    }

    pub fn entries_for_mut<'a>(&'a mut self, tag: &str) -> impl Iterator<Item = &'a mut MenuEntry> {
        self.entries.iter_mut().filter(move |e| e.tag == tag)
    }

    /// All entries, optionally restricted to one tag.
    pub fn entries_matching_mut<'a>(
        &'a mut self,
        tag: Option<&str>,
    ) -> impl Iterator<Item = &'a mut MenuEntry> {
        self.entries
            .iter_mut()
            .filter(move |e| tag.is_none_or(|t| e.tag == t))
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut MenuEntry> {
        self.entries.iter_mut()
    }

    /// Items of the first menu registered under `tag`.
    ///
    /// Returns an empty slice if no menu uses the tag.
    pub fn items(&self, tag: &str) -> &[MenuItem] {
        self.entries_for(tag)
            .next()
            .map(|e| e.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.entries.iter().any(|e| e.tag == tag)
    }

    /// Distinct tags in first-registration order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !tags.contains(&entry.tag.as_str()) {
                tags.push(&entry.tag);
            }
        }
        tags
    }

    /// Get menu instance count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MenuRegistry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn nested(depth: usize) -> MenuItem {
        let mut item = MenuItem::new("leaf");
        for level in 0..depth.saturating_sub(1) {
            item = MenuItem::new(format!("level {level}")).with_children(vec![item]);
        }
        item
    }

    #[test]
    fn register_assigns_distinct_handles() {
        let mut registry = MenuRegistry::default();
        let a = registry
            .register("a", vec![MenuItem::new("Home")], MenuOptions::default())
            .unwrap();
        let b = registry
            .register("b", vec![MenuItem::new("Home")], MenuOptions::default())
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.tags(), vec!["a", "b"]);
    }

    #[test]
    fn items_for_unknown_tag_is_empty() {
        let registry = MenuRegistry::default();
        assert!(registry.items("nope").is_empty());
        assert!(!registry.has_tag("nope"));
    }

    #[test]
    fn shared_tag_keeps_both_entries() {
        let mut registry = MenuRegistry::default();
        registry
            .register("shared", vec![MenuItem::new("One")], MenuOptions::default())
            .unwrap();
        registry
            .register("shared", vec![MenuItem::new("Two")], MenuOptions::default())
            .unwrap();

        assert_eq!(registry.entries_for("shared").count(), 2);
        assert_eq!(registry.items("shared")[0].title, "One");
        assert_eq!(registry.tags(), vec!["shared"]);
    }

    #[test]
    fn register_rejects_deep_trees() {
        let mut registry = MenuRegistry::new(3);
        assert!(
            registry
                .register("ok", vec![nested(3)], MenuOptions::default())
                .is_ok()
        );

        let err = registry
            .register("deep", vec![nested(4)], MenuOptions::default())
            .unwrap_err();
        assert!(matches!(err, MenuError::TooDeep { depth: 4, max: 3, .. }));
        assert!(!registry.has_tag("deep"));
    }

    #[test]
    fn unregister_removes_entry() {
        let mut registry = MenuRegistry::default();
        let handle = registry
            .register("a", vec![MenuItem::new("Home")], MenuOptions::default())
            .unwrap();

        assert!(registry.unregister(handle).is_some());
        assert!(registry.unregister(handle).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn register_normalizes_groups() {
        let mut registry = MenuRegistry::default();
        registry
            .register(
                "a",
                vec![MenuItem::new("Group").group().with_url("/x")],
                MenuOptions::default(),
            )
            .unwrap();
        assert!(registry.items("a")[0].url.is_none());
    }
}
