#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Fixtures build menus through the public `MenuService` API, and
//! [`Recorder`] captures emitted bags so tests can assert on order.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use routemenu::{MenuBag, MenuItem, MenuService};

/// Collects every bag delivered to its listeners.
#[derive(Clone, Default)]
pub struct Recorder {
    bags: Arc<Mutex<Vec<MenuBag>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends to this recorder.
    pub fn listener(&self) -> impl FnMut(&MenuBag) + Send + 'static + use<> {
        let bags = Arc::clone(&self.bags);
        move |bag: &MenuBag| bags.lock().push(bag.clone())
    }

    pub fn bags(&self) -> Vec<MenuBag> {
        self.bags.lock().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.bags
            .lock()
            .iter()
            .map(|bag| bag.item.title.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bags.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.lock().is_empty()
    }
}

/// A service with one menu registered under `tag`.
pub fn service_with(tag: &str, items: Vec<MenuItem>) -> MenuService {
    let mut service = MenuService::default();
    service.register(Some(tag), items).unwrap();
    service
}

/// A parent item with a single child.
pub fn parent_with_child(title: &str) -> MenuItem {
    MenuItem::new(title).with_children(vec![MenuItem::new("Menu item inner")])
}

/// A small documentation-site menu with nested routes.
pub fn docs_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Home").with_url("/home").home(),
        MenuItem::new("Guides").group(),
        MenuItem::new("Getting started").with_children(vec![
            MenuItem::new("Install").with_url("/docs/install"),
            MenuItem::new("Configure").with_url("/docs/configure"),
        ]),
        MenuItem::new("Reference").with_children(vec![
            MenuItem::new("Components").with_children(vec![
                MenuItem::new("Menu").with_url("/docs/components/menu"),
            ]),
        ]),
        MenuItem::new("Changelog").with_url("/changelog").hidden(),
    ]
}
