//! Configuration management for the qnet CLI.

use anyhow::{Context, Result};
use qnet::prelude::{BackendConfig, ScheduleTiming};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "qnet.toml";

/// qnet project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub schedule: ScheduleTiming,
    /// Directory the config was loaded from; relative paths resolve here.
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Working snapshot file.
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    /// Mirror changes to the simulator.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_snapshot() -> String { "network.json".to_string() }
fn default_url() -> String { "http://localhost:5000".to_string() }
fn default_timeout() -> u64 { 30 }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
        }
    }
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Load config from qnet.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from(&cwd)
    }

    /// Load config by searching upward from `start`.
    pub fn load_from(start: &Path) -> Result<Self> {
        let Some(path) = find_config_file(start) else {
            return Ok(Config::default());
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.root = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Snapshot path, resolved against the config directory.
    pub fn snapshot_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.network.snapshot);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }

    /// Backend selection; `offline` overrides the config file.
    pub fn backend_config(&self, offline: bool) -> BackendConfig {
        if offline || !self.backend.enabled {
            BackendConfig::Offline
        } else {
            BackendConfig::Http {
                url: self.backend.url.clone(),
                timeout_secs: self.backend.timeout_secs,
            }
        }
    }
}

/// Find qnet.toml in `start` or its parent directories.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
