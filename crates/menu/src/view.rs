//! Render model handed to the presentation layer.
//!
//! The view is a projection of the live tree: hidden items are dropped,
//! groups become plain labels, and every other item carries a link with its
//! `href` and `target` passed through untouched.

use serde::Serialize;

use crate::menu::MenuItem;

/// Link attributes of a rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One rendered menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// `None` for group labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ViewLink>,
    pub group: bool,
    /// Rendered as the active item.
    pub selected: bool,
    /// Marker on the child container.
    pub expanded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

/// Project visible items into view nodes.
pub fn render(items: &[MenuItem]) -> Vec<ViewNode> {
    items
        .iter()
        .filter(|item| !item.hidden)
        .map(|item| ViewNode {
            title: item.title.clone(),
            icon: item.icon.clone(),
            link: (!item.group).then(|| ViewLink {
                href: item.url.clone(),
                target: item.target.clone(),
            }),
            group: item.group,
            selected: item.selected,
            expanded: item.expanded,
            children: render(&item.children),
        })
        .collect()
}

/// Number of rendered items, counting nested ones.
pub fn rendered_count(nodes: &[ViewNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + rendered_count(&node.children))
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn hidden_items_are_not_rendered() {
        let items = vec![
            MenuItem::new("Visible item"),
            MenuItem::new("Hidden item").hidden(),
            MenuItem::new("Visible item"),
        ];
        assert_eq!(render(&items).len(), 2);
    }

    #[test]
    fn group_renders_without_link() {
        let nodes = render(&[MenuItem::new("Group item").group()]);
        assert!(nodes[0].link.is_none());
        assert!(nodes[0].group);
    }

    #[test]
    fn targets_pass_through() {
        let nodes = render(&[
            MenuItem::new("Blank").with_target("_blank"),
            MenuItem::new("Self").with_target("_self"),
            MenuItem::new("Invalid").with_target("anyNotValid"),
        ]);
        let targets: Vec<_> = nodes
            .iter()
            .map(|n| n.link.as_ref().unwrap().target.as_deref().unwrap())
            .collect();
        assert_eq!(targets, vec!["_blank", "_self", "anyNotValid"]);
    }

    #[test]
    fn url_becomes_href() {
        let nodes = render(&[MenuItem::new("Link").with_url("https://test.link")]);
        assert_eq!(
            nodes[0].link.as_ref().unwrap().href.as_deref(),
            Some("https://test.link")
        );
    }

    #[test]
    fn expanded_children_are_rendered() {
        let items = vec![
            MenuItem::new("Parent item")
                .expanded()
                .with_children(vec![MenuItem::new("Child item")]),
        ];
        let nodes = render(&items);
        assert!(nodes[0].expanded);
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(rendered_count(&nodes), 2);
    }

    #[test]
    fn serializes_markers() {
        let nodes = render(&[MenuItem::new("Home").selected()]);
        let json = serde_json::to_value(&nodes).unwrap();
        assert_eq!(json[0]["selected"], true);
        assert_eq!(json[0]["title"], "Home");
        assert!(json[0].get("children").is_none());
    }
}
