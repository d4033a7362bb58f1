//! Selection and expansion resolution.
//!
//! These functions only mutate a tree and report what changed; the service
//! turns the report into events.

use crate::menu::{ItemPath, MenuItem, tree};
use crate::url_match;

/// Outcome of one resolution pass over a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The item now selected, if any.
    pub selected: Option<ItemPath>,
    /// Ancestors whose `expanded` flag flipped to true, top level first.
    pub opened: Vec<ItemPath>,
}

/// Path of the first item (pre-order) whose url matches `url`.
///
/// Groups are skipped, hidden items are not.
pub fn find_url_match(items: &[MenuItem], url: &str, max_depth: usize) -> Option<ItemPath> {
    tree::pre_order(items, max_depth)
        .find(|(_, item)| {
            item.match_url()
                .is_some_and(|item_url| url_match::matches(item.path_match, url, item_url))
        })
        .map(|(path, _)| path)
}

/// Path of the first non-group item carrying `selected: true`.
pub fn find_declared(items: &[MenuItem], max_depth: usize) -> Option<ItemPath> {
    tree::pre_order(items, max_depth)
        .find(|(_, item)| item.selected && !item.group)
        .map(|(path, _)| path)
}

/// Select the first item whose url matches `url`.
///
/// Every other item is deselected and the ancestors of the winner are
/// expanded. Expansion is never turned off here.
pub fn resolve_url(items: &mut [MenuItem], url: &str, max_depth: usize) -> Resolution {
    let winner = find_url_match(items, url, max_depth);
    apply_selection(items, winner, max_depth)
}

/// Select the first item registered with `selected: true`.
pub fn resolve_declared(items: &mut [MenuItem], max_depth: usize) -> Resolution {
    let winner = find_declared(items, max_depth);
    apply_selection(items, winner, max_depth)
}

/// Prefer a url match, falling back to the declared selection.
///
/// Used when a tree is created or grows, so flags supplied by the caller
/// survive unless the current location points elsewhere.
pub fn resolve_initial(items: &mut [MenuItem], url: Option<&str>, max_depth: usize) -> Resolution {
    let winner = url
        .and_then(|url| find_url_match(items, url, max_depth))
        .or_else(|| find_declared(items, max_depth));
    apply_selection(items, winner, max_depth)
}

/// Make `target` the only selected item and open its ancestors.
pub fn apply_selection(
    items: &mut [MenuItem],
    target: Option<ItemPath>,
    max_depth: usize,
) -> Resolution {
    let paths: Vec<ItemPath> = tree::pre_order(items, max_depth)
        .map(|(path, _)| path)
        .collect();
    for path in &paths {
        if let Some(item) = tree::item_at_mut(items, path) {
            item.selected = Some(path) == target.as_ref();
        }
    }

    let mut opened = Vec::new();
    if let Some(target) = &target {
        for ancestor in target.ancestors() {
            if let Some(item) = tree::item_at_mut(items, &ancestor)
                && !item.expanded
            {
                item.expanded = true;
                opened.push(ancestor);
            }
        }
    }

    Resolution {
        selected: target,
        opened,
    }
}

/// Collapse every expanded item except those in `keep`.
///
/// Returns the collapsed paths in pre-order, so a parent precedes its
/// children and siblings come left to right.
pub fn collapse(items: &mut [MenuItem], keep: &[ItemPath], max_depth: usize) -> Vec<ItemPath> {
    let expanded: Vec<ItemPath> = tree::pre_order(items, max_depth)
        .filter(|(path, item)| item.expanded && !keep.contains(path))
        .map(|(path, _)| path)
        .collect();

    for path in &expanded {
        if let Some(item) = tree::item_at_mut(items, path) {
            item.expanded = false;
        }
    }

    expanded
}
