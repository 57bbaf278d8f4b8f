//! CLI command implementations.
//!
//! Every command loads the working snapshot, acts on it, and writes it
//! back if it changed anything.

pub mod init;
pub mod node;
pub mod link;
pub mod route;
pub mod highlight;
pub mod snapshot;
pub mod stats;
pub mod quantum;

use anyhow::{Context, Result};
use qnet::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;

/// Global flags shared by every command.
pub struct Options {
    pub snapshot: Option<PathBuf>,
    pub offline: bool,
}

impl Options {
    fn config(&self) -> Result<Config> {
        Config::load()
    }

    fn snapshot_path(&self, config: &Config) -> PathBuf {
        self.snapshot.clone().unwrap_or_else(|| config.snapshot_path())
    }
}

/// Load the working network. A missing snapshot file is an empty network.
pub fn open_network(opts: &Options) -> Result<(Network, PathBuf)> {
    let config = opts.config()?;
    let path = opts.snapshot_path(&config);
    let network = load_network(&path)?.with_compiler(ScheduleCompiler::with_timing(config.schedule));
    Ok((network, path))
}

/// Load the working network behind the configured simulator backend.
pub fn open_manager(opts: &Options) -> Result<(NetworkManager<DynBackend>, PathBuf)> {
    let config = opts.config()?;
    let path = opts.snapshot_path(&config);
    let network = load_network(&path)?.with_compiler(ScheduleCompiler::with_timing(config.schedule));

    let backend_config = config.backend_config(opts.offline);
    let backend = create_backend(&backend_config).context("Failed to create simulator backend")?;
    debug!(backend = backend.name(), snapshot = %path.display(), "opened network");
    Ok((NetworkManager::with_network(network, backend), path))
}

fn load_network(path: &Path) -> Result<Network> {
    if !path.exists() {
        debug!(snapshot = %path.display(), "no snapshot yet, starting empty");
        return Ok(Network::new());
    }
    let snapshot = load_snapshot(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let store = import_snapshot(&snapshot)
        .with_context(|| format!("Invalid snapshot: {}", path.display()))?;
    Ok(Network::from_store(store))
}

/// Write the network back to its snapshot file.
pub fn save_network(network: &Network, path: &Path) -> Result<()> {
    let snapshot = export_snapshot(network.store());
    save_snapshot(path, &snapshot)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))
}
