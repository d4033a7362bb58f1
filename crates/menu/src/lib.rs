//! Route-aware navigation menus.
//!
//! Several independent menus, each identified by a tag, share one
//! [`MenuService`]. On every navigation the service selects the item whose
//! url matches the current location, expands its ancestors, and notifies
//! listeners through a tag-scoped event bus.
//!
//! The `routemenu` binary is a thin command-line front end over this library.

pub mod config;
pub mod error;
pub mod events;
pub mod menu;
pub mod resolve;
pub mod service;
pub mod url_match;
pub mod view;

pub use config::MenuConfig;
pub use error::{MenuError, MenuResult};
pub use events::{EventKind, SubscriptionId};
pub use menu::{ItemPath, MenuBag, MenuHandle, MenuItem, MenuOptions, PathMatch};
pub use service::MenuService;
pub use url_match::{is_url_path_contain, is_url_path_equal};
