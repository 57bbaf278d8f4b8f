//! Protocol runs on the simulator. Results are printed as returned.

use anyhow::Result;
use colored::Colorize;
use qnet::prelude::*;

use super::{open_manager, Options};

pub async fn epr(opts: &Options, a: &str, b: &str) -> Result<()> {
    let (manager, _) = open_manager(opts)?;
    let value = manager.create_epr(&NodeId::from(a), &NodeId::from(b)).await?;
    report("EPR pair", &value)
}

pub async fn measure(opts: &Options, node: &str) -> Result<()> {
    let (manager, _) = open_manager(opts)?;
    let value = manager.measure(&NodeId::from(node)).await?;
    report("Measurement", &value)
}

pub async fn teleport(opts: &Options, sender: &str, receiver: &str) -> Result<()> {
    let (manager, _) = open_manager(opts)?;
    let value = manager
        .teleport(&NodeId::from(sender), &NodeId::from(receiver))
        .await?;
    report("Teleportation", &value)
}

pub async fn superdense(opts: &Options, sender: &str, receiver: &str, message: &str) -> Result<()> {
    let (manager, _) = open_manager(opts)?;
    let value = manager
        .superdense_coding(&NodeId::from(sender), &NodeId::from(receiver), message)
        .await?;
    report("Superdense coding", &value)
}

fn report(what: &str, value: &serde_json::Value) -> Result<()> {
    println!("{} {}", "✓".green(), what.white().bold());
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
