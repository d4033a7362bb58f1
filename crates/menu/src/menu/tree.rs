//! Traversal utilities over menu item trees.
//!
//! All walks are depth-first pre-order: a parent is visited before its
//! children, siblings left to right. Every walk is bounded by a maximum
//! depth so a pathological tree can never cause unbounded traversal.

use super::{ItemPath, MenuItem};

/// Depth-first pre-order iterator yielding each item with its path.
pub struct PreOrder<'a> {
    stack: Vec<(ItemPath, &'a MenuItem)>,
    max_depth: usize,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (ItemPath, &'a MenuItem);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, item) = self.stack.pop()?;

        if path.depth() < self.max_depth {
            for (index, child) in item.children.iter().enumerate().rev() {
                self.stack.push((path.child(index), child));
            }
        }

        Some((path, item))
    }
}

/// Walk `items` in pre-order, not descending below `max_depth` levels.
pub fn pre_order(items: &[MenuItem], max_depth: usize) -> PreOrder<'_> {
    let stack = if max_depth == 0 {
        Vec::new()
    } else {
        items
            .iter()
            .enumerate()
            .rev()
            .map(|(index, item)| (ItemPath::root(index), item))
            .collect()
    };

    PreOrder { stack, max_depth }
}

/// Resolve a path to an item.
pub fn item_at<'a>(items: &'a [MenuItem], path: &ItemPath) -> Option<&'a MenuItem> {
    let (first, rest) = path.indices().split_first()?;
    let mut item = items.get(*first)?;
    for index in rest {
        item = item.children.get(*index)?;
    }
    Some(item)
}

/// Resolve a path to a mutable item.
pub fn item_at_mut<'a>(items: &'a mut [MenuItem], path: &ItemPath) -> Option<&'a mut MenuItem> {
    let (first, rest) = path.indices().split_first()?;
    let mut item = items.get_mut(*first)?;
    for index in rest {
        item = item.children.get_mut(*index)?;
    }
    Some(item)
}

/// All items in pre-order.
pub fn flatten(items: &[MenuItem]) -> Vec<&MenuItem> {
    pre_order(items, usize::MAX).map(|(_, item)| item).collect()
}

/// Maximum nesting depth; an empty sequence has depth 0.
pub fn depth(items: &[MenuItem]) -> usize {
    pre_order(items, usize::MAX)
        .map(|(path, _)| path.depth())
        .max()
        .unwrap_or(0)
}

/// Path of the first item (in pre-order) with the given title.
pub fn find_by_title(items: &[MenuItem], title: &str, max_depth: usize) -> Option<ItemPath> {
    pre_order(items, max_depth)
        .find(|(_, item)| item.title == title)
        .map(|(path, _)| path)
}

/// Enforce that group items carry no url and are never selected.
///
/// Returns the number of items that were changed.
pub fn normalize(items: &mut [MenuItem]) -> usize {
    let mut changed = 0;
    for item in items.iter_mut() {
        if item.group && (item.url.is_some() || item.selected) {
            item.url = None;
            item.selected = false;
            changed += 1;
        }
        changed += normalize(&mut item.children);
    }
    changed
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> Vec<MenuItem> {
        vec![
            MenuItem::new("A").with_children(vec![
                MenuItem::new("A1"),
                MenuItem::new("A2").with_children(vec![MenuItem::new("A2a")]),
            ]),
            MenuItem::new("B"),
        ]
    }

    fn titles<'a>(iter: impl Iterator<Item = (ItemPath, &'a MenuItem)>) -> Vec<&'a str> {
        iter.map(|(_, item)| item.title.as_str()).collect()
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        let items = sample();
        assert_eq!(
            titles(pre_order(&items, usize::MAX)),
            vec!["A", "A1", "A2", "A2a", "B"]
        );
    }

    #[test]
    fn pre_order_respects_depth_bound() {
        let items = sample();
        assert_eq!(titles(pre_order(&items, 1)), vec!["A", "B"]);
        assert_eq!(titles(pre_order(&items, 2)), vec!["A", "A1", "A2", "B"]);
        assert_eq!(pre_order(&items, 0).count(), 0);
    }

    #[test]
    fn item_at_resolves_nested_paths() {
        let mut items = sample();
        let path = ItemPath::new(vec![0, 1, 0]);
        assert_eq!(item_at(&items, &path).unwrap().title, "A2a");
        assert!(item_at(&items, &ItemPath::new(vec![0, 5])).is_none());
        assert!(item_at(&items, &ItemPath::default()).is_none());

        item_at_mut(&mut items, &path).unwrap().expanded = true;
        assert!(items[0].children[1].children[0].expanded);
    }

    #[test]
    fn flatten_and_depth() {
        let items = sample();
        assert_eq!(flatten(&items).len(), 5);
        assert_eq!(depth(&items), 3);
        assert_eq!(depth(&[]), 0);
    }

    #[test]
    fn find_by_title_returns_first_match() {
        let items = sample();
        assert_eq!(
            find_by_title(&items, "A2", usize::MAX),
            Some(ItemPath::new(vec![0, 1]))
        );
        assert_eq!(find_by_title(&items, "missing", usize::MAX), None);
    }

    #[test]
    fn normalize_strips_group_links() {
        let mut items = vec![
            MenuItem::new("Group").with_url("/g").group().selected(),
            MenuItem::new("Link").with_url("/l"),
        ];
        assert_eq!(normalize(&mut items), 1);
        assert!(items[0].url.is_none());
        assert!(!items[0].selected);
        assert_eq!(items[1].url.as_deref(), Some("/l"));
    }
}
