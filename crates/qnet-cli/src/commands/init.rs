//! Initialize a new qnet project.

use anyhow::{Context, Result};
use colored::Colorize;
use qnet::prelude::{save_snapshot, NetworkSnapshot};
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    println!("{} Initializing qnet project...", "→".blue());

    // Create default config
    let config = Config::default();
    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    // Create an empty network
    let snapshot_path = base_path.join(&config.network.snapshot);
    if !snapshot_path.exists() {
        save_snapshot(&snapshot_path, &NetworkSnapshot::empty())
            .with_context(|| format!("Failed to write {}", snapshot_path.display()))?;
        println!("  {} Created {}", "✓".green(), snapshot_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), snapshot_path.display());
    }

    println!();
    println!("{} qnet project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} qnet node add alice --kind endpoint", "1.".blue());
    println!("  {} qnet link add alice r1 2.5", "2.".blue());
    println!("  {} qnet entangle alice bob --play", "3.".blue());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_config_and_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("lab");

        run(Some(project.clone())).unwrap();
        assert!(project.join(CONFIG_FILE).exists());

        let snapshot = qnet::prelude::load_snapshot(project.join("network.json")).unwrap();
        assert_eq!(snapshot, NetworkSnapshot::empty());

        // Second run leaves existing files alone.
        run(Some(project)).unwrap();
    }
}
