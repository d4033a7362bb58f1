//! Menu error types.
//!
//! Only structurally invalid input is an error. Lookups on unknown tags,
//! missing parents and unknown paths are no-ops, not failures.

use thiserror::Error;

/// Errors raised while registering menus.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Item descriptors could not be parsed.
    #[error("menu '{tag}': invalid item descriptors: {details}")]
    InvalidDescriptors { tag: String, details: String },

    /// The tree nests deeper than the configured limit.
    #[error("menu '{tag}': tree depth {depth} exceeds the maximum of {max}")]
    TooDeep {
        tag: String,
        depth: usize,
        max: usize,
    },

    /// No menu is registered under the handle.
    #[error("no menu registered with handle {0}")]
    UnknownHandle(u64),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
