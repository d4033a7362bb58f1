//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Tag used when a caller registers or addresses a menu without one.
pub const DEFAULT_TAG: &str = "menu";

/// Default bound on tree depth, applied at registration and traversal.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Menu service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Tag for menus registered without one (default: "menu").
    pub default_tag: String,

    /// Maximum tree depth accepted at registration (default: 32).
    pub max_depth: usize,

    /// Default for `MenuOptions::auto_collapse` (default: false).
    pub auto_collapse: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            auto_collapse: false,
        }
    }
}

impl MenuConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let default_tag = env::var("MENU_DEFAULT_TAG")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TAG.to_string());

        let max_depth = match env::var("MENU_MAX_DEPTH") {
            Ok(v) => v
                .trim()
                .parse()
                .context("MENU_MAX_DEPTH must be a valid usize")?,
            Err(_) => DEFAULT_MAX_DEPTH,
        };

        let auto_collapse = match env::var("MENU_AUTO_COLLAPSE") {
            Ok(v) => parse_bool(&v).context("MENU_AUTO_COLLAPSE must be true or false")?,
            Err(_) => false,
        };

        Ok(Self {
            default_tag,
            max_depth,
            auto_collapse,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized boolean '{other}'"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MenuConfig::default();
        assert_eq!(config.default_tag, "menu");
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.auto_collapse);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool(" ON ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
