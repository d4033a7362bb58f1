//! Menu tree data model and the tag-scoped registry.
//!
//! - [`MenuItem`] records form ordered, finite trees
//! - [`ItemPath`] addresses one item within a tree
//! - [`MenuRegistry`] owns the live tree of every rendered menu instance

mod item;
mod registry;
pub mod tree;

pub use item::{ItemPath, MenuBag, MenuItem, PathMatch};
pub use registry::{MenuEntry, MenuHandle, MenuOptions, MenuRegistry};
