use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownStrategy;

/// Grid coordinate as (row, column). Signed so that neighbors of edge cells can be
/// expressed and queried as out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub const fn step(self, direction: Direction) -> Self {
        let (dy, dx) = direction.offset();
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// Direction of a single adjacency move from `self` to `other`, if they are neighbors.
    pub fn direction_to(self, other: Pos) -> Option<Direction> {
        Direction::PRIORITY.into_iter().find(|direction| self.step(*direction) == other)
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// 4-connected move set. `North` decreases the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed tie-break order shared by every deterministic strategy.
    pub const PRIORITY: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// `(dy, dx)` applied by a move in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Dfs,
    Greedy,
    Wavefront,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] =
        [StrategyKind::Dfs, StrategyKind::Greedy, StrategyKind::Wavefront, StrategyKind::Random];

    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Dfs => "dfs",
            StrategyKind::Greedy => "greedy",
            StrategyKind::Wavefront => "wavefront",
            StrategyKind::Random => "random",
        }
    }

    /// Whether two runs over the same map always produce the same moves
    /// without fixing a seed.
    pub const fn is_deterministic(self) -> bool {
        !matches!(self, StrategyKind::Random)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Snapshot of one cell as the map exposes it. Out-of-bounds queries yield [`CellView::BLOCKED`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellView {
    pub traversable: bool,
    pub visited: bool,
    pub reachable: bool,
}

impl CellView {
    pub const BLOCKED: CellView = CellView { traversable: false, visited: false, reachable: false };
}

/// Emitted by the map on every `mark_visited` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellEvent {
    pub pos: Pos,
    pub was_visited: bool,
    pub now_visited: bool,
}

impl CellEvent {
    pub const fn is_first_visit(&self) -> bool {
        !self.was_visited && self.now_visited
    }
}

/// Emitted by the agent after every accepted move. `step` starts at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveEvent {
    pub from: Pos,
    pub to: Pos,
    pub step: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: Pos, to: Pos, direction: Direction, newly_covered: bool },
    /// The strategy had no move to offer; nothing changed.
    Idle,
}

impl StepOutcome {
    pub const fn moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}
