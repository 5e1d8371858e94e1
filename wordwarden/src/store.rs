// wordwarden/src/store.rs
//! On-disk rule storage: one JSON file per community, named
//! `<community>.json`, inside a configuration directory.
//!
//! The file content is the decoded rule shape [`FilterConfig`] speaks; this
//! module owns only where the bytes live. License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::fs;
use std::path::PathBuf;

use wordwarden_core::cache::RuleStore;
use wordwarden_core::config::{CommunityId, FilterConfig};

/// Stores each community's rules as `<dir>/<community>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file a community's rules live in.
    pub fn path_for(&self, community: CommunityId) -> PathBuf {
        self.dir.join(format!("{community}.json"))
    }

    /// Reads a community's rules. A missing file is an empty collection,
    /// not an error; an unreadable or malformed file is.
    pub fn load_config(&self, community: CommunityId) -> Result<FilterConfig> {
        let path = self.path_for(community);
        if !path.exists() {
            debug!("No rule file at {}; using empty rules", path.display());
            return Ok(FilterConfig::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
        FilterConfig::from_json_str(&text)
            .with_context(|| format!("Failed to parse rule file: {}", path.display()))
    }

    /// Writes a community's rules in the canonical shape, creating the
    /// configuration directory on first save.
    pub fn save_config(&self, community: CommunityId, config: &FilterConfig) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create configuration directory: {}", self.dir.display())
        })?;
        let path = self.path_for(community);
        let json = config.to_json_string_pretty()?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write rule file: {}", path.display()))?;
        debug!("Saved {} rule(s) to {}", config.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl RuleStore for JsonFileStore {
    async fn load(&self, community: CommunityId) -> Result<FilterConfig> {
        self.load_config(community)
    }
}
