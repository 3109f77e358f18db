//! The agent wrapper shared by every exploration strategy.
//!
//! [`Agent`] owns what all variants have in common: the current position, the step
//! index, and the move observers. Everything a strategy remembers between steps (a
//! backtrack stack, a wave field, a frontier, an RNG) lives behind [`Strategy`].

use log::trace;

use crate::error::CoverageError;
use crate::map::{Map, MapId};
use crate::observer::{Observer, ObserverId, ObserverSet};
use crate::types::{Direction, MoveEvent, Pos, StrategyKind};

mod dfs;
mod greedy;
mod random;
mod wavefront;

pub use dfs::DfsAgent;
pub use greedy::GreedyHeuristic;
pub use random::RandomAgent;
pub use wavefront::WavefrontAgent;

/// A navigation policy driven purely by what the map exposes.
pub trait Strategy {
    fn kind(&self) -> StrategyKind;

    /// Proposes the next move from `position`, or `None` when the strategy has nothing
    /// left to do. Must only propose moves into traversable cells.
    fn decide_next_move(&mut self, position: Pos, map: &Map) -> Option<Direction>;

    /// Updates strategy bookkeeping after a move was accepted. `map` still reflects the
    /// state before `to` is marked visited.
    fn apply_move(&mut self, from: Pos, to: Pos, map: &Map);
}

impl StrategyKind {
    /// Fresh strategy state. `seed` is only consumed by [`StrategyKind::Random`].
    pub fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Dfs => Box::new(DfsAgent::new()),
            StrategyKind::Greedy => Box::new(GreedyHeuristic::new()),
            StrategyKind::Wavefront => Box::new(WavefrontAgent::new()),
            StrategyKind::Random => Box::new(RandomAgent::new(seed)),
        }
    }
}

pub struct Agent {
    map: MapId,
    position: Pos,
    steps: u64,
    strategy: Box<dyn Strategy>,
    observers: ObserverSet<MoveEvent>,
}

impl Agent {
    /// Agent bound to `map`, standing on its start cell.
    pub fn new(map: &Map, kind: StrategyKind, seed: u64) -> Self {
        Self::with_strategy(map, kind.build(seed))
    }

    pub fn with_strategy(map: &Map, strategy: Box<dyn Strategy>) -> Self {
        Self {
            map: map.id(),
            position: map.start(),
            steps: 0,
            strategy,
            observers: ObserverSet::new(),
        }
    }

    /// The map this agent was built for.
    pub fn map_id(&self) -> MapId {
        self.map
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn decide_next_move(&mut self, map: &Map) -> Option<Direction> {
        self.strategy.decide_next_move(self.position, map)
    }

    /// Moves one cell in `direction`. Fails with `IllegalMove` if the target is not
    /// traversable, leaving position, strategy state and observers untouched.
    pub fn apply_move(&mut self, direction: Direction, map: &Map) -> Result<Pos, CoverageError> {
        let from = self.position;
        let to = from.step(direction);
        if !map.is_traversable(to) {
            return Err(CoverageError::IllegalMove { from, direction });
        }

        self.strategy.apply_move(from, to, map);
        self.position = to;
        self.steps += 1;
        trace!("{} agent step {}: {from} -> {to}", self.strategy.kind(), self.steps);
        self.observers.notify(&MoveEvent { from, to, step: self.steps });
        Ok(to)
    }

    pub fn add_observer(&mut self, observer: impl Observer<MoveEvent> + 'static) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }
}
