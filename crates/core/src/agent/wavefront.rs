//! Wavefront (flood-fill) navigation toward the nearest unvisited cells.
//! This module exists to keep distance-field bookkeeping out of the shared agent.
//! It does not own the propagation primitive, which lives in `grid`.

use log::debug;

use crate::agent::Strategy;
use crate::grid::{DistanceField, neighbors};
use crate::map::Map;
use crate::types::{Direction, Pos, StrategyKind};

/// Follows a distance field propagated breadth-first from every reachable unvisited
/// cell, always stepping to a neighbor whose wave value is exactly one lower (ties
/// broken N, E, S, W).
///
/// The field is rebuilt when it goes stale: on first use, when the agent reaches a
/// target (wave value 0), or when the current cell has no wave value. Every target is
/// reached in at most diameter-many steps, so coverage takes at most
/// `reachable * diameter` moves.
#[derive(Clone, Debug, Default)]
pub struct WavefrontAgent {
    field: Option<DistanceField>,
    recomputations: u32,
}

impl WavefrontAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the field has been propagated so far.
    pub fn recomputations(&self) -> u32 {
        self.recomputations
    }

    /// Wave value of `pos` in the current field, if any.
    pub fn wave_value(&self, pos: Pos) -> Option<u32> {
        self.field.as_ref().and_then(|field| field.get(pos))
    }

    fn is_stale(&self, position: Pos) -> bool {
        matches!(self.wave_value(position), None | Some(0))
    }

    fn recompute(&mut self, map: &Map) {
        let targets =
            map.positions().filter(|pos| map.is_reachable(*pos) && !map.is_visited(*pos));
        let field =
            DistanceField::propagate(map.width(), map.height(), targets, |p| map.is_traversable(p));
        self.field = Some(field);
        self.recomputations += 1;
    }
}

impl Strategy for WavefrontAgent {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Wavefront
    }

    fn decide_next_move(&mut self, position: Pos, map: &Map) -> Option<Direction> {
        if self.is_stale(position) {
            self.recompute(map);
            match self.wave_value(position) {
                Some(distance) => {
                    debug!(
                        "wavefront field #{} at {position}: nearest target {distance} away",
                        self.recomputations
                    );
                }
                None => {
                    debug!("wavefront at {position}: no reachable unvisited cell left");
                    return None;
                }
            }
        }

        let here = self.wave_value(position)?;
        neighbors(position)
            .into_iter()
            .find(|(_, next)| {
                map.is_traversable(*next) && self.wave_value(*next) == Some(here.saturating_sub(1))
            })
            .map(|(direction, _)| direction)
    }

    fn apply_move(&mut self, _from: Pos, to: Pos, _map: &Map) {
        if self.wave_value(to) == Some(0) {
            self.field = None;
        }
    }
}
