//! Whole-network commands: import, export, clear.

use anyhow::{Context, Result};
use colored::Colorize;
use qnet::prelude::*;
use std::path::Path;

use super::{open_manager, save_network, Options};

pub async fn import(opts: &Options, file: &Path) -> Result<()> {
    let snapshot = load_snapshot(file)
        .with_context(|| format!("Failed to read snapshot: {}", file.display()))?;

    let (mut manager, path) = open_manager(opts)?;
    manager
        .import_network(&snapshot)
        .await
        .with_context(|| format!("Failed to import {}", file.display()))?;
    save_network(manager.network(), &path)?;

    let store = manager.network().store();
    println!(
        "{} Imported {} nodes and {} links from {}",
        "✓".green(),
        store.node_count().to_string().cyan(),
        store.link_count().to_string().cyan(),
        file.display()
    );
    Ok(())
}

pub fn export(opts: &Options, file: &Path) -> Result<()> {
    let (network, _) = super::open_network(opts)?;
    save_network(&network, file)?;

    println!(
        "{} Exported {} nodes and {} links to {}",
        "✓".green(),
        network.store().node_count().to_string().cyan(),
        network.store().link_count().to_string().cyan(),
        file.display()
    );
    Ok(())
}

pub async fn clear(opts: &Options) -> Result<()> {
    let (mut manager, path) = open_manager(opts)?;
    manager.clear_network().await?;
    save_network(manager.network(), &path)?;

    println!("{} Network cleared", "✓".green());
    Ok(())
}
