//! Link commands.

use anyhow::{bail, Result};
use colored::Colorize;
use qnet::prelude::*;

use super::{open_manager, open_network, save_network, Options};

pub async fn add(opts: &Options, a: &str, b: &str, cost: f64) -> Result<()> {
    let (mut manager, path) = open_manager(opts)?;
    let link = manager.add_link(&NodeId::from(a), &NodeId::from(b), cost).await?;
    save_network(manager.network(), &path)?;

    println!("{} Added {} {}", "✓".green(), link.key, format!("cost {}", link.cost).cyan());
    Ok(())
}

pub async fn modify(opts: &Options, a: &str, b: &str, cost: f64) -> Result<()> {
    let (mut manager, path) = open_manager(opts)?;
    let previous = manager.modify_link(&NodeId::from(a), &NodeId::from(b), cost).await?;
    save_network(manager.network(), &path)?;

    println!(
        "{} {} <-> {} cost {} → {}",
        "✓".green(),
        a,
        b,
        previous.to_string().dimmed(),
        cost.to_string().cyan()
    );
    Ok(())
}

pub async fn remove(opts: &Options, a: &str, b: &str) -> Result<()> {
    let (mut manager, path) = open_manager(opts)?;
    let link = manager.remove_link(&NodeId::from(a), &NodeId::from(b)).await?;
    save_network(manager.network(), &path)?;

    println!("{} Removed {}", "✓".green(), link.key);
    Ok(())
}

pub fn list(opts: &Options) -> Result<()> {
    let (network, path) = open_network(opts)?;
    let links = network.store().links();

    if links.is_empty() {
        bail!("No links in {}. Add one with {}.", path.display(), "qnet link add".cyan());
    }

    println!("{} {} links:", "→".blue(), links.len().to_string().cyan());
    println!();
    for link in links {
        println!(
            "  {:<12} <-> {:<12} {}",
            link.low().to_string().white().bold(),
            link.high().to_string().white().bold(),
            link.cost.to_string().cyan()
        );
    }
    Ok(())
}
