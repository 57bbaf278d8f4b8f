//! Highlight schedules: compile, print and replay.

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use qnet::prelude::*;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;

use super::{open_manager, open_network, Options};

const MAX_REPLAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Compile a saved request_entanglement response.
pub async fn from_file(opts: &Options, response: &Path, json: bool, play: bool) -> Result<()> {
    let content = std::fs::read_to_string(response)
        .with_context(|| format!("Failed to read {}", response.display()))?;
    let result: ConnectionResult = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", response.display()))?;

    let (mut network, _) = open_network(opts)?;
    let schedule = network.highlight(&result);
    show(&schedule, json, play).await
}

/// Ask the simulator for entanglement and show what happened.
pub async fn entangle(opts: &Options, e1: &str, e2: &str, json: bool, play: bool) -> Result<()> {
    let (mut manager, _) = open_manager(opts)?;
    let schedule = manager
        .request_entanglement(&NodeId::from(e1), &NodeId::from(e2))
        .await?;
    show(&schedule, json, play).await
}

async fn show(schedule: &Schedule, json: bool, play: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(schedule)?);
    } else if play {
        replay(schedule).await;
    } else {
        print_schedule(schedule);
    }
    Ok(())
}

fn print_schedule(schedule: &Schedule) {
    if schedule.is_empty() {
        println!("{} Nothing to highlight", "•".yellow());
        return;
    }
    println!(
        "{} {} instructions over {} ms",
        "→".blue(),
        schedule.len().to_string().cyan(),
        schedule.total_duration_ms().to_string().cyan()
    );
    println!();
    for ins in schedule.timeline() {
        println!("  {}", describe(ins));
    }
}

/// Print each instruction when its offset comes due.
async fn replay(schedule: &Schedule) {
    let start = Instant::now();
    for ins in schedule.timeline() {
        tokio::time::sleep_until(due(start, ins.start_offset_ms)).await;
        println!("  {}", describe(ins));
    }
    tokio::time::sleep_until(due(start, schedule.total_duration_ms())).await;
    println!("{} done", "✓".green());
}

/// `start + offset_ms`, capped at a day past `start`.
fn due(start: Instant, offset_ms: u64) -> Instant {
    start + Duration::from_millis(offset_ms.min(MAX_REPLAY_MS))
}

fn describe(ins: &HighlightInstruction) -> String {
    let hop = format!("{} <-> {}", ins.from, ins.to);
    match ins.action {
        HighlightAction::Set => format!(
            "{:>6} ms  set   {:<24} {}",
            ins.start_offset_ms,
            hop,
            paint(ins.color)
        ),
        HighlightAction::FadeToNeutral => format!(
            "{:>6} ms  fade  {:<24} {}",
            ins.start_offset_ms,
            hop,
            format!("over {} ms", ins.fade_duration_ms).dimmed()
        ),
    }
}

fn paint(color: HighlightColor) -> ColoredString {
    match color {
        HighlightColor::Success => color.as_str().green(),
        HighlightColor::Failure => color.as_str().red(),
        HighlightColor::Neutral => color.as_str().dimmed(),
    }
}
