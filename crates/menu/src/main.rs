//! routemenu command-line front end.
//!
//! Loads a menu from a JSON file, replays a sequence of navigations, and
//! prints the resulting render model as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use routemenu::{MenuConfig, MenuService};

/// Resolve a navigation menu against one or more URLs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of menu item descriptors.
    #[arg(long)]
    items: PathBuf,

    /// Menu tag (defaults to MENU_DEFAULT_TAG or "menu").
    #[arg(long)]
    tag: Option<String>,

    /// URLs to navigate to, in order.
    #[arg(long = "url")]
    urls: Vec<String>,

    /// Collapse every expanded item after navigating.
    #[arg(long)]
    collapse_all: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = MenuConfig::from_env().context("failed to load configuration")?;

    let json = fs::read_to_string(&args.items)
        .with_context(|| format!("failed to read {}", args.items.display()))?;

    let mut service = MenuService::new(config);
    let tag = args.tag.as_deref();
    service
        .register_json(tag, &json)
        .context("failed to register menu")?;

    service.on_item_select(None, |bag| {
        info!(tag = %bag.tag, path = %bag.path, title = %bag.item.title, "item selected");
    });
    service.on_submenu_toggle(None, |bag| {
        info!(
            tag = %bag.tag,
            path = %bag.path,
            title = %bag.item.title,
            expanded = bag.item.expanded,
            "submenu toggled"
        );
    });

    for url in &args.urls {
        service.navigate(url);
    }
    if args.collapse_all {
        service.collapse_all(tag);
    }

    let view = service.view(tag);
    let output = serde_json::to_string_pretty(&view).context("failed to serialize menu view")?;
    println!("{output}");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
