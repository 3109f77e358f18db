//! Error taxonomy for the coverage core.
//!
//! Every variant is a logic error: the caller issued a call the contract forbids, or a
//! strategy proposed a move it should never have proposed. Nothing here is transient,
//! so nothing is retried.

use thiserror::Error;

use crate::map::MapId;
use crate::types::{Direction, Pos, StrategyKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    /// Mutation referencing an out-of-bounds or blocked cell.
    #[error("invalid coordinate {pos}: out of bounds or not traversable")]
    InvalidCoordinate { pos: Pos },

    /// `Agent::apply_move` was asked to move into a cell that is not traversable.
    #[error("illegal move {direction} from {from}")]
    IllegalMove { from: Pos, direction: Direction },

    /// The administrator's pre-check rejected a proposed move.
    #[error("strategy fault: {strategy} proposed {direction} from {from} into a blocked cell")]
    StrategyFault { strategy: StrategyKind, from: Pos, direction: Direction },

    #[error("agent at {agent} is not bound to the map's agent position {map}")]
    AgentNotBound { agent: Pos, map: Pos },

    /// The agent was built for a different map, even if it stands on a matching cell.
    #[error("agent was built for map {agent_map}, not map {map}")]
    ForeignAgent { agent_map: MapId, map: MapId },
}

/// Rejections raised while validating map construction input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("map layout has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("layout declares {expected} cells but {found} were supplied")]
    SizeMismatch { expected: usize, found: usize },

    #[error("map dimensions {width}x{height} exceed the addressable range")]
    TooLarge { width: usize, height: usize },

    #[error("start {start} is outside the map")]
    StartOutOfBounds { start: Pos },

    #[error("start {start} is not traversable")]
    StartBlocked { start: Pos },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy `{0}` (expected dfs, greedy, wavefront or random)")]
pub struct UnknownStrategy(pub String);
