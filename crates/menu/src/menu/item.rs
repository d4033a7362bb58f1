//! Menu item records, item paths, and event payloads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How an item's `url` is compared with the current location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatch {
    /// Path segments must be identical.
    #[serde(alias = "full")]
    Exact,
    /// The item path must be a segment prefix of the current location.
    #[default]
    #[serde(alias = "prefix")]
    Contains,
}

/// A node of a menu tree.
///
/// Item descriptors are plain records: every optional attribute is an
/// explicit field with a default, so partial JSON such as
/// `{"title": "Home"}` deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    /// Display text.
    pub title: String,
    /// Icon identifier, passed through to the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Link target path or absolute URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link-target token (`_blank`, `_self`, ...). Never validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// How the item url is compared with the current location.
    pub path_match: PathMatch,
    /// Renders as a label; never selected, never linked.
    pub group: bool,
    /// Excluded from rendering but still matched on navigation.
    pub hidden: bool,
    /// Whether the submenu is open.
    pub expanded: bool,
    /// Whether this is the active item of its menu.
    pub selected: bool,
    /// Marks the item followed by `navigate_home`.
    pub home: bool,
    /// Nested items, in display order.
    pub children: Vec<MenuItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<BTreeMap<String, String>>,
}

impl MenuItem {
    /// Create an item with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_path_match(mut self, path_match: PathMatch) -> Self {
        self.path_match = path_match;
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn group(mut self) -> Self {
        self.group = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn home(mut self) -> Self {
        self.home = true;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The url this item is matched with, if it can be selected at all.
    pub(crate) fn match_url(&self) -> Option<&str> {
        if self.group {
            return None;
        }
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Index path from the top-level sequence down to one item.
///
/// `[1, 0]` is the first child of the second top-level item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemPath(Vec<usize>);

impl ItemPath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of a top-level item.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    /// Ancestors from the top level down, excluding `self`.
    pub fn ancestors(&self) -> impl Iterator<Item = ItemPath> + '_ {
        (1..self.0.len()).map(|n| Self(self.0[..n].to_vec()))
    }

    /// True when `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &ItemPath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Number of levels; top-level items have depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ItemPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// Event payload: the tag of the menu and a snapshot of the item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuBag {
    pub tag: String,
    pub path: ItemPath,
    pub item: MenuItem,
}

impl MenuBag {
    pub fn new(tag: impl Into<String>, path: ItemPath, item: MenuItem) -> Self {
        Self {
            tag: tag.into(),
            path,
            item,
        }
    }
}
