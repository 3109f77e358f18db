//! Iterative depth-first exploration with an explicit backtrack stack.

use log::debug;

use crate::agent::Strategy;
use crate::grid::neighbors;
use crate::map::Map;
use crate::types::{Direction, Pos, StrategyKind};

/// Enters the first unvisited traversable neighbor in N, E, S, W order; with none left,
/// steps back to the cell it came from. Each reachable cell is entered forward once and
/// left backward at most once, so coverage takes at most `2 * (reachable - 1)` moves.
#[derive(Clone, Debug, Default)]
pub struct DfsAgent {
    stack: Vec<Pos>,
    exhausted: bool,
}

impl DfsAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells the agent would walk back through before reaching the start.
    pub fn backtrack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Strategy for DfsAgent {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Dfs
    }

    fn decide_next_move(&mut self, position: Pos, map: &Map) -> Option<Direction> {
        let unexplored = neighbors(position)
            .into_iter()
            .find(|(_, next)| map.is_traversable(*next) && !map.is_visited(*next));
        if let Some((direction, _)) = unexplored {
            return Some(direction);
        }

        match self.stack.last() {
            Some(previous) => position.direction_to(*previous),
            None => {
                if !self.exhausted {
                    debug!("dfs exhausted at {position}: stack empty, no unvisited neighbor");
                    self.exhausted = true;
                }
                None
            }
        }
    }

    fn apply_move(&mut self, from: Pos, to: Pos, _map: &Map) {
        if self.stack.last() == Some(&to) {
            self.stack.pop();
        } else {
            self.stack.push(from);
        }
    }
}
