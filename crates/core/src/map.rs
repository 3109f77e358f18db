//! Grid map with per-cell traversability, visitation, and coverage bookkeeping.
//!
//! Adjacency is 4-connected. The reachable set is fixed at construction by flood fill
//! from the start cell, and only reachable cells count toward [`Map::not_covered_count`].
//! The start cell is visited on construction since the agent already stands on it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::error::CoverageError;
use crate::grid::{self, DistanceField};
use crate::layout::MapLayout;
use crate::observer::{Observer, ObserverId, ObserverSet};
use crate::types::{CellEvent, CellView, Pos};

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Map`], fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapId(u64);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct Map {
    id: MapId,
    width: usize,
    height: usize,
    traversable: Vec<bool>,
    reachable: Vec<bool>,
    visited: Vec<bool>,
    start: Pos,
    agent_pos: Pos,
    traversable_count: usize,
    reachable_count: usize,
    visited_count: usize,
    not_covered: usize,
    observers: ObserverSet<CellEvent>,
}

impl Map {
    pub fn new(layout: MapLayout) -> Self {
        let (width, height, start) = (layout.width(), layout.height(), layout.start());
        let reachable: Vec<bool> =
            DistanceField::propagate(width, height, [start], |p| layout.is_traversable(p))
                .reached()
                .collect();
        let traversable = layout.into_cells();

        let mut visited = vec![false; width * height];
        if let Some(idx) = grid::index(width, height, start) {
            visited[idx] = true;
        }

        let traversable_count = traversable.iter().filter(|cell| **cell).count();
        let reachable_count = reachable.iter().filter(|cell| **cell).count();
        debug!(
            "map {width}x{height}: {traversable_count} traversable, \
             {reachable_count} reachable from {start}"
        );

        Self {
            id: MapId(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)),
            width,
            height,
            traversable,
            reachable,
            visited,
            start,
            agent_pos: start,
            traversable_count,
            reachable_count,
            visited_count: 1,
            not_covered: reachable_count - 1,
            observers: ObserverSet::new(),
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// False for out-of-bounds or blocked cells.
    pub fn is_traversable(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|idx| self.traversable[idx])
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|idx| self.visited[idx])
    }

    pub fn is_reachable(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|idx| self.reachable[idx])
    }

    pub fn cell(&self, pos: Pos) -> CellView {
        match self.index(pos) {
            Some(idx) => CellView {
                traversable: self.traversable[idx],
                visited: self.visited[idx],
                reachable: self.reachable[idx],
            },
            None => CellView::BLOCKED,
        }
    }

    /// Row-major iteration over every in-bounds coordinate.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        grid::positions(self.width, self.height)
    }

    pub fn agent_position(&self) -> Pos {
        self.agent_pos
    }

    /// Reachable cells not yet visited. Reaches zero exactly when coverage is complete.
    pub fn not_covered_count(&self) -> usize {
        self.not_covered
    }

    pub fn is_covered(&self) -> bool {
        self.not_covered == 0
    }

    pub fn reachable_count(&self) -> usize {
        self.reachable_count
    }

    pub fn traversable_count(&self) -> usize {
        self.traversable_count
    }

    /// Traversable cells cut off from the start. These stay uncovered forever.
    pub fn unreachable_count(&self) -> usize {
        self.traversable_count - self.reachable_count
    }

    /// Every traversable cell not yet visited, reachable or not.
    pub fn uncovered_traversable_count(&self) -> usize {
        self.traversable_count - self.visited_count
    }

    pub fn coverage_ratio(&self) -> f64 {
        (self.reachable_count - self.not_covered) as f64 / self.reachable_count as f64
    }

    /// Marks `pos` visited and notifies observers. Idempotent: only the first call on a
    /// reachable cell decrements the not-covered count. Returns whether the cell was newly
    /// visited.
    pub fn mark_visited(&mut self, pos: Pos) -> Result<bool, CoverageError> {
        let Some(idx) = self.index(pos).filter(|idx| self.traversable[*idx]) else {
            return Err(CoverageError::InvalidCoordinate { pos });
        };

        let was_visited = self.visited[idx];
        if !was_visited {
            self.visited[idx] = true;
            self.visited_count += 1;
            if self.reachable[idx] {
                self.not_covered -= 1;
            }
        }

        self.observers.notify(&CellEvent { pos, was_visited, now_visited: true });
        Ok(!was_visited)
    }

    pub fn add_observer(&mut self, observer: impl Observer<CellEvent> + 'static) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// ASCII rendering: `#` blocked, `@` agent, `o` visited, `.` uncovered reachable,
    /// `~` traversable but unreachable.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for pos in self.positions() {
            let cell = self.cell(pos);
            let glyph = if pos == self.agent_pos {
                '@'
            } else if !cell.traversable {
                '#'
            } else if cell.visited {
                'o'
            } else if cell.reachable {
                '.'
            } else {
                '~'
            };
            out.push(glyph);
            if pos.x as usize == self.width - 1 {
                out.push('\n');
            }
        }
        out
    }

    pub(crate) fn commit_agent_position(&mut self, pos: Pos) -> Result<(), CoverageError> {
        if !self.is_traversable(pos) {
            return Err(CoverageError::InvalidCoordinate { pos });
        }
        self.agent_pos = pos;
        Ok(())
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        grid::index(self.width, self.height, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::EventLog;
    use crate::test_support::*;

    #[test]
    fn start_cell_is_covered_on_construction() {
        let map = map_from(&["S.."]);
        assert!(map.is_visited(Pos::new(0, 0)));
        assert_eq!(map.reachable_count(), 3);
        assert_eq!(map.not_covered_count(), 2);
        assert_eq!(map.agent_position(), map.start());
    }

    #[test]
    fn out_of_bounds_queries_report_blocked_instead_of_failing() {
        let map = map_from(&["S.", ".."]);
        for pos in [Pos::new(-1, 0), Pos::new(0, -1), Pos::new(2, 0), Pos::new(0, 2)] {
            assert!(!map.in_bounds(pos));
            assert!(!map.is_traversable(pos));
            assert!(!map.is_visited(pos));
            assert_eq!(map.cell(pos), CellView::BLOCKED);
        }
    }

    #[test]
    fn mark_visited_is_idempotent() {
        let mut map = map_from(&["S.."]);
        let target = Pos::new(0, 2);

        assert_eq!(map.mark_visited(target), Ok(true));
        assert_eq!(map.not_covered_count(), 1);
        assert_eq!(map.mark_visited(target), Ok(false));
        assert_eq!(map.not_covered_count(), 1, "second visit must not decrement again");
        assert!(map.is_visited(target));
    }

    #[test]
    fn mark_visited_rejects_blocked_and_out_of_bounds_cells() {
        let mut map = map_from(&["S#."]);
        let blocked = Pos::new(0, 1);
        assert_eq!(
            map.mark_visited(blocked),
            Err(CoverageError::InvalidCoordinate { pos: blocked })
        );
        let outside = Pos::new(3, 3);
        assert_eq!(
            map.mark_visited(outside),
            Err(CoverageError::InvalidCoordinate { pos: outside })
        );
        assert!(!map.is_visited(blocked));
    }

    #[test]
    fn unreachable_cells_do_not_count_toward_coverage() {
        let mut map = map_from(&["S.#..", "..#.."]);
        assert_eq!(map.traversable_count(), 8);
        assert_eq!(map.reachable_count(), 4);
        assert_eq!(map.unreachable_count(), 4);
        assert!(!map.is_reachable(Pos::new(0, 3)));

        // Visiting an unreachable cell is legal but never touches the reachable count.
        assert_eq!(map.mark_visited(Pos::new(0, 3)), Ok(true));
        assert_eq!(map.not_covered_count(), 3);
        assert_eq!(map.uncovered_traversable_count(), 6);
    }

    #[test]
    fn every_mark_visited_call_notifies_with_before_and_after_state() {
        let mut map = map_from(&["S.."]);
        let log = EventLog::<CellEvent>::new();
        map.add_observer(log.clone());

        let target = Pos::new(0, 1);
        map.mark_visited(target).unwrap();
        map.mark_visited(target).unwrap();

        assert_eq!(
            log.events(),
            vec![
                CellEvent { pos: target, was_visited: false, now_visited: true },
                CellEvent { pos: target, was_visited: true, now_visited: true },
            ]
        );
        assert!(log.events()[0].is_first_visit());
    }

    #[test]
    fn failed_mark_visited_does_not_notify() {
        let mut map = map_from(&["S#"]);
        let log = EventLog::<CellEvent>::new();
        map.add_observer(log.clone());
        assert!(map.mark_visited(Pos::new(0, 1)).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn removed_observer_is_not_notified() {
        let mut map = map_from(&["S.."]);
        let log = EventLog::<CellEvent>::new();
        let id = map.add_observer(log.clone());
        assert!(map.remove_observer(id));
        map.mark_visited(Pos::new(0, 1)).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn render_marks_agent_walls_and_coverage_state() {
        let mut map = map_from(&["S.#.", "...#"]);
        map.mark_visited(Pos::new(1, 0)).unwrap();
        assert_eq!(map.render(), "@.#~\no..#\n");
    }

    #[test]
    fn coverage_ratio_tracks_visited_reachable_cells() {
        let mut map = map_from(&["S..."]);
        assert!((map.coverage_ratio() - 0.25).abs() < f64::EPSILON);
        map.mark_visited(Pos::new(0, 3)).unwrap();
        assert!((map.coverage_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
