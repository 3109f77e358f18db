use std::fmt;

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::agent::Strategy;
use crate::grid::neighbors;
use crate::map::Map;
use crate::types::{Direction, Pos, StrategyKind};

/// Uniform random walk over traversable neighbors, reproducible from its seed.
///
/// Candidates are collected in N, E, S, W order and indexed by `next_u64() % count`,
/// so a given seed always yields the same move sequence on the same map.
pub struct RandomAgent {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Debug for RandomAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomAgent").field("seed", &self.seed).finish_non_exhaustive()
    }
}

impl Strategy for RandomAgent {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn decide_next_move(&mut self, position: Pos, map: &Map) -> Option<Direction> {
        let options: Vec<Direction> = neighbors(position)
            .into_iter()
            .filter(|(_, next)| map.is_traversable(*next))
            .map(|(direction, _)| direction)
            .collect();
        if options.is_empty() {
            return None;
        }
        let pick = self.rng.next_u64() as usize % options.len();
        Some(options[pick])
    }

    fn apply_move(&mut self, _from: Pos, _to: Pos, _map: &Map) {}
}
