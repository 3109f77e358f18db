//! The run loop around [`Administrator::step`].
//!
//! The core only knows single steps. This module decides when a run is over: the map
//! is covered, the optional step ceiling is hit, or the strategy goes idle with cells
//! still uncovered. Each run is summarized in a [`RunReport`] whose fingerprint hashes
//! the full move sequence, so two runs can be compared without storing their traces.

use std::hash::Hasher;

use anyhow::{Context, Result};
use coverage::{Administrator, Agent, Map, Pos, StepOutcome, StrategyKind};
use log::info;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::config::RunConfig;
use crate::mapgen;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every reachable cell was visited.
    Covered,
    /// The step ceiling was reached first.
    Exhausted,
    /// The strategy had no move left while reachable cells were still uncovered.
    Stalled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub strategy: StrategyKind,
    pub seed: u64,
    pub status: RunStatus,
    pub steps: u64,
    pub reachable: usize,
    pub not_covered: usize,
    pub unreachable: usize,
    pub coverage_ratio: f64,
    pub fingerprint: u64,
}

/// Ordered `(from, to)` pairs of every accepted move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunTrace {
    moves: Vec<(Pos, Pos)>,
}

impl RunTrace {
    pub fn record(&mut self, from: Pos, to: Pos) {
        self.moves.push((from, to));
    }

    pub fn moves(&self) -> &[(Pos, Pos)] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Stable hash of the move sequence.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.moves.len() as u64);
        for (from, to) in &self.moves {
            hasher.write_i32(from.y);
            hasher.write_i32(from.x);
            hasher.write_i32(to.y);
            hasher.write_i32(to.x);
        }
        hasher.finish()
    }
}

/// Generates the configured room and places a fresh agent on its start.
pub fn prepare(config: &RunConfig) -> Result<(Map, Agent)> {
    let layout = mapgen::generate(&config.map).context("Failed to generate map")?;
    let map = Map::new(layout);
    let agent = Agent::new(&map, config.strategy, config.seed);
    Ok((map, agent))
}

/// Steps `admin` until the run settles, then reports how it ended.
pub fn run(admin: &mut Administrator<'_>, config: &RunConfig) -> Result<RunReport> {
    let (report, _) = run_traced(admin, config)?;
    Ok(report)
}

/// Same as [`run`], also returning every move taken.
pub fn run_traced(
    admin: &mut Administrator<'_>,
    config: &RunConfig,
) -> Result<(RunReport, RunTrace)> {
    let mut trace = RunTrace::default();
    let status = loop {
        if admin.is_covered() {
            break RunStatus::Covered;
        }
        if config.max_steps.is_some_and(|limit| trace.len() as u64 >= limit) {
            break RunStatus::Exhausted;
        }
        let step = trace.len() + 1;
        let outcome = admin
            .step()
            .with_context(|| format!("{} run aborted at step {step}", config.strategy))?;
        match outcome {
            StepOutcome::Moved { from, to, .. } => trace.record(from, to),
            StepOutcome::Idle => break RunStatus::Stalled,
        }
    };

    let map = admin.map();
    let report = RunReport {
        strategy: admin.agent().kind(),
        seed: config.seed,
        status,
        steps: trace.len() as u64,
        reachable: map.reachable_count(),
        not_covered: map.not_covered_count(),
        unreachable: map.unreachable_count(),
        coverage_ratio: map.coverage_ratio(),
        fingerprint: trace.fingerprint(),
    };
    info!(
        "{} run {:?} after {} steps ({} of {} reachable cells uncovered)",
        report.strategy, report.status, report.steps, report.not_covered, report.reachable
    );
    Ok((report, trace))
}
