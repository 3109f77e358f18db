//! Greedy nearest-frontier heuristic.

use std::collections::BTreeSet;

use log::debug;

use crate::agent::Strategy;
use crate::grid::{DistanceField, neighbors};
use crate::map::Map;
use crate::types::{Direction, Pos, StrategyKind};

/// Steps to the traversable neighbor with the smallest walking distance to any frontier
/// cell (reachable and not yet visited), ties broken N, E, S, W.
///
/// Distances are hop counts around walls, so every move brings the agent one step
/// closer to its nearest frontier cell and concave pockets cannot trap it. With a
/// horizon set, the agent only pursues frontier cells at most that many steps away
/// and goes idle when none are.
#[derive(Clone, Debug, Default)]
pub struct GreedyHeuristic {
    frontier: Option<BTreeSet<Pos>>,
    horizon: Option<u32>,
}

impl GreedyHeuristic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizon(horizon: u32) -> Self {
        Self { frontier: None, horizon: Some(horizon) }
    }

    pub fn horizon(&self) -> Option<u32> {
        self.horizon
    }

    /// Frontier cells still pending. `None` until the first decision seeds it.
    pub fn frontier_len(&self) -> Option<usize> {
        self.frontier.as_ref().map(BTreeSet::len)
    }

    fn frontier(&mut self, map: &Map) -> &BTreeSet<Pos> {
        self.frontier.get_or_insert_with(|| {
            map.positions().filter(|pos| map.is_reachable(*pos) && !map.is_visited(*pos)).collect()
        })
    }
}

impl Strategy for GreedyHeuristic {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }

    fn decide_next_move(&mut self, position: Pos, map: &Map) -> Option<Direction> {
        let horizon = self.horizon;
        let frontier = self.frontier(map);
        let field = DistanceField::propagate(
            map.width(),
            map.height(),
            frontier.iter().copied(),
            |p| map.is_traversable(p),
        );
        let Some(nearest) = field.get(position) else {
            debug!("greedy idle at {position}: no frontier cell left to walk to");
            return None;
        };
        if horizon.is_some_and(|radius| nearest > radius) {
            debug!(
                "greedy idle at {position}: nearest of {} frontier cells is {nearest} steps away",
                frontier.len()
            );
            return None;
        }

        let mut best: Option<(u32, Direction)> = None;
        for (direction, next) in neighbors(position) {
            if !map.is_traversable(next) {
                continue;
            }
            let Some(score) = field.get(next) else {
                continue;
            };
            if best.is_none_or(|(best_score, _)| score < best_score) {
                best = Some((score, direction));
            }
        }
        best.map(|(_, direction)| direction)
    }

    fn apply_move(&mut self, _from: Pos, to: Pos, _map: &Map) {
        if let Some(frontier) = self.frontier.as_mut() {
            frontier.remove(&to);
        }
    }
}
