//! Route queries: cheapest path and link-cost validation.

use anyhow::{bail, Result};
use colored::Colorize;
use qnet::prelude::*;

use super::{open_network, Options};

pub fn path(opts: &Options, from: &str, to: &str) -> Result<()> {
    let (network, _) = open_network(opts)?;
    let store = network.store();
    let (from, to) = (NodeId::from(from), NodeId::from(to));

    for id in [&from, &to] {
        if !store.contains_node(id) {
            bail!("Node not found: {}", id);
        }
    }

    match store.shortest_path(&from, &to) {
        Some((path, cost)) => {
            let hops: Vec<String> = path.iter().map(|n| n.to_string()).collect();
            println!(
                "{} {} {}",
                "→".blue(),
                hops.join(" → ").white().bold(),
                format!("(cost {}, {} hops)", cost, path.len() - 1).dimmed()
            );
        }
        None => {
            println!("{} {} and {} are not connected", "•".yellow(), from, to);
        }
    }
    Ok(())
}

pub fn validate(opts: &Options, a: &str, b: &str, cost: f64) -> Result<()> {
    let (network, _) = open_network(opts)?;
    let check = network.check_proposal(&NodeId::from(a), &NodeId::from(b), cost);

    match check {
        ProposalCheck::Unconstrained => {
            println!("{} {} <-> {} at {}: no existing route, any cost accepted", "✓".green(), a, b, cost);
        }
        ProposalCheck::WithinBound { proposed, bound } => {
            println!(
                "{} {} <-> {} at {}: within cheapest route ({})",
                "✓".green(),
                a,
                b,
                proposed.to_string().cyan(),
                bound
            );
        }
        ProposalCheck::ExceedsBound { proposed, bound } => {
            bail!(
                "{} <-> {} at {} exceeds the cheapest existing route ({})",
                a,
                b,
                proposed,
                bound
            );
        }
    }
    Ok(())
}
