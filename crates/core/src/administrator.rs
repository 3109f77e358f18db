//! Single-step coordination between one map and one agent.
//! This module exists to keep the decide, validate, move, and mark sequence in one place.
//! It does not own a run loop; callers decide how many steps to take and when to stop.

use log::{trace, warn};

use crate::agent::Agent;
use crate::error::CoverageError;
use crate::map::Map;
use crate::types::StepOutcome;

pub struct Administrator<'a> {
    map: &'a mut Map,
    agent: &'a mut Agent,
}

impl<'a> Administrator<'a> {
    /// Binds `agent` to `map`. The agent must have been built for this map and stand
    /// where the map places it.
    pub fn new(map: &'a mut Map, agent: &'a mut Agent) -> Result<Self, CoverageError> {
        if agent.position() != map.agent_position() {
            return Err(CoverageError::AgentNotBound {
                agent: agent.position(),
                map: map.agent_position(),
            });
        }
        if agent.map_id() != map.id() {
            return Err(CoverageError::ForeignAgent { agent_map: agent.map_id(), map: map.id() });
        }
        Ok(Self { map, agent })
    }

    /// Advances the simulation by one move.
    ///
    /// An exhausted strategy yields [`StepOutcome::Idle`] and changes nothing. A move
    /// into a blocked or out-of-bounds cell is rejected before any state changes, with
    /// [`CoverageError::StrategyFault`].
    pub fn step(&mut self) -> Result<StepOutcome, CoverageError> {
        let from = self.agent.position();
        let Some(direction) = self.agent.decide_next_move(self.map) else {
            trace!("{} agent idle at {from}", self.agent.kind());
            return Ok(StepOutcome::Idle);
        };

        let to = from.step(direction);
        if !self.map.is_traversable(to) {
            let strategy = self.agent.kind();
            warn!("{strategy} proposed {direction} from {from} into blocked cell {to}");
            return Err(CoverageError::StrategyFault { strategy, from, direction });
        }

        self.agent.apply_move(direction, self.map)?;
        self.map.commit_agent_position(to)?;
        let newly_covered = self.map.mark_visited(to)? && self.map.is_reachable(to);
        Ok(StepOutcome::Moved { from, to, direction, newly_covered })
    }

    pub fn map(&self) -> &Map {
        self.map
    }

    pub fn agent(&self) -> &Agent {
        self.agent
    }

    pub fn is_covered(&self) -> bool {
        self.map.is_covered()
    }
}
