//! Adjacency and breadth-first propagation primitives over a dense row-major grid.
//! This module exists so the reachable-set computation and the wavefront strategy share
//! one flood fill. It does not own any exploration policy.

use std::collections::VecDeque;

use crate::types::{Direction, Pos};

pub(crate) fn index(width: usize, height: usize, pos: Pos) -> Option<usize> {
    if pos.x < 0 || pos.y < 0 {
        return None;
    }
    let (x, y) = (pos.x as usize, pos.y as usize);
    if x >= width || y >= height {
        return None;
    }
    Some(y * width + x)
}

/// Neighbors in [`Direction::PRIORITY`] order. May include out-of-bounds positions.
pub(crate) fn neighbors(p: Pos) -> [(Direction, Pos); 4] {
    Direction::PRIORITY.map(|direction| (direction, p.step(direction)))
}

pub(crate) fn positions(width: usize, height: usize) -> impl Iterator<Item = Pos> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
}

/// Hop counts from the nearest source, `None` where propagation never arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DistanceField {
    width: usize,
    height: usize,
    values: Vec<Option<u32>>,
}

impl DistanceField {
    /// Multi-source breadth-first propagation. Sources that are out of bounds or not
    /// passable are ignored.
    pub(crate) fn propagate<Sources, Passable>(
        width: usize,
        height: usize,
        sources: Sources,
        passable: Passable,
    ) -> Self
    where
        Sources: IntoIterator<Item = Pos>,
        Passable: Fn(Pos) -> bool,
    {
        let mut values = vec![None; width * height];
        let mut queue = VecDeque::new();

        for source in sources {
            if let Some(idx) = index(width, height, source)
                && values[idx].is_none()
                && passable(source)
            {
                values[idx] = Some(0);
                queue.push_back((source, 0u32));
            }
        }

        while let Some((current, dist)) = queue.pop_front() {
            for (_, neighbor) in neighbors(current) {
                if let Some(idx) = index(width, height, neighbor)
                    && values[idx].is_none()
                    && passable(neighbor)
                {
                    values[idx] = Some(dist + 1);
                    queue.push_back((neighbor, dist + 1));
                }
            }
        }

        Self { width, height, values }
    }

    pub(crate) fn get(&self, pos: Pos) -> Option<u32> {
        index(self.width, self.height, pos).and_then(|idx| self.values[idx])
    }

    pub(crate) fn reached(&self) -> impl Iterator<Item = bool> + '_ {
        self.values.iter().map(Option::is_some)
    }
}
