//! Show network statistics.

use anyhow::Result;
use colored::Colorize;
use qnet::prelude::*;

use super::{open_network, Options};

pub fn run(opts: &Options) -> Result<()> {
    let (network, path) = open_network(opts)?;
    let stats = network.stats();
    let nodes = stats.endpoints + stats.repeaters;

    println!("{}", "qnet Network Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!("  Snapshot:          {}", path.display().to_string().dimmed());
    println!();

    println!("{}", "Nodes".blue().bold());
    println!("  Endpoints:         {}", stats.endpoints.to_string().cyan());
    println!("  Repeaters:         {}", stats.repeaters.to_string().cyan());
    println!();

    println!("{}", "Links".blue().bold());
    println!("  Total links:       {}", stats.links.to_string().cyan());
    println!("  Components:        {}", stats.components.to_string().cyan());
    if stats.links > 0 {
        println!("  Total cost:        {:.3}", stats.total_cost);
        println!("  Avg link cost:     {:.3}", stats.total_cost / stats.links as f64);
    }
    println!();

    // Density calculation
    if nodes > 1 {
        let max_links = (nodes * (nodes - 1)) / 2;
        let density = stats.links as f64 / max_links as f64;
        println!("{}", "Density".blue().bold());
        println!("  Graph density:     {:.6}", density);
        println!();
    }

    println!("{}", "═".repeat(40).dimmed());
    Ok(())
}
