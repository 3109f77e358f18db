//! Run settings shared by the runner and the fuzz harness.
//! This module exists so one JSON document can describe a whole run.
//! It does not own argument parsing; binaries overlay their flags on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use coverage::StrategyKind;
use serde::{Deserialize, Serialize};

/// Largest room side the generator accepts.
pub const MAX_SIDE: usize = 4096;

/// Parameters of the generated room the agent explores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapGenConfig {
    pub width: usize,
    pub height: usize,
    /// Probability that an interior cell is blocked, in `[0, 1]`.
    pub wall_density: f64,
    pub seed: u64,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self { width: 16, height: 10, wall_density: 0.2, seed: 0 }
    }
}

impl MapGenConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0 && self.height > 0, "map must be at least 1x1");
        ensure!(
            self.width <= MAX_SIDE && self.height <= MAX_SIDE,
            "map {}x{} exceeds the {MAX_SIDE}x{MAX_SIDE} limit",
            self.width,
            self.height
        );
        ensure!(
            (0.0..=1.0).contains(&self.wall_density),
            "wall density {} is outside [0, 1]",
            self.wall_density
        );
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub strategy: StrategyKind,
    /// Feeds the random strategy.
    pub seed: u64,
    /// Step ceiling; `None` runs until coverage or until the strategy goes idle.
    pub max_steps: Option<u64>,
    pub map: MapGenConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Dfs,
            seed: 42,
            max_steps: None,
            map: MapGenConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read run config: {}", path.display()))?;
        let config: RunConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse run config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.map.validate().context("invalid map settings")
    }
}
