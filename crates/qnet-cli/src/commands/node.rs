//! Node commands.

use anyhow::{bail, Result};
use colored::Colorize;
use qnet::prelude::*;

use super::{open_manager, open_network, save_network, Options};

pub async fn add(opts: &Options, id: &str, kind: NodeKind, position: Option<(f64, f64)>) -> Result<()> {
    let (mut manager, path) = open_manager(opts)?;
    let id = NodeId::from(id);
    manager.add_node(id.clone(), kind).await?;

    let mut network = manager.into_network();
    if let Some((x, y)) = position {
        network.set_position(&id, Position::new(x, y));
    }
    save_network(&network, &path)?;

    println!("{} Added {} {}", "✓".green(), kind.to_string().blue(), id.to_string().white().bold());
    Ok(())
}

pub async fn remove(opts: &Options, id: &str) -> Result<()> {
    let (mut manager, path) = open_manager(opts)?;
    let removed = manager.remove_node(&NodeId::from(id)).await?;
    save_network(manager.network(), &path)?;

    println!("{} Removed {}", "✓".green(), id.white().bold());
    for link in &removed {
        println!("  {} {} {}", "-".red(), link.key, format!("({})", link.cost).dimmed());
    }
    Ok(())
}

pub fn list(opts: &Options) -> Result<()> {
    let (network, path) = open_network(opts)?;
    let store = network.store();

    if store.node_count() == 0 {
        bail!("No nodes in {}. Add one with {}.", path.display(), "qnet node add".cyan());
    }

    println!("{} {} nodes:", "→".blue(), store.node_count().to_string().cyan());
    println!();
    for node in store.nodes() {
        let kind = match node.kind {
            NodeKind::Endpoint => node.kind.to_string().green(),
            NodeKind::Repeater => node.kind.to_string().yellow(),
        };
        let position = node
            .position
            .map(|p| format!("  @ ({:.1}, {:.1})", p.x, p.y))
            .unwrap_or_default();
        println!(
            "  {:<20} {:<10} degree {}{}",
            node.id.to_string().white().bold(),
            kind,
            store.degree(&node.id),
            position.dimmed()
        );
    }
    Ok(())
}
