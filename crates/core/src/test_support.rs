//! Shared test fixtures for the core's unit test suites.
//! This module exists to avoid repeating grid setup across many tests.
//! It does not own production map loading.

use crate::administrator::Administrator;
use crate::error::CoverageError;
use crate::layout::MapLayout;
use crate::map::Map;
use crate::types::{Pos, StepOutcome};

/// `#` blocked, `.` open, `S` open start cell (defaults to the first open cell).
pub(crate) fn layout_from(rows: &[&str]) -> MapLayout {
    let grid: Vec<Vec<bool>> =
        rows.iter().map(|row| row.chars().map(|glyph| glyph != '#').collect()).collect();
    let start = explicit_start(rows)
        .or_else(|| first_open(&grid))
        .expect("fixture needs at least one open cell");
    MapLayout::from_rows(&grid, start).expect("fixture layout must be valid")
}

pub(crate) fn map_from(rows: &[&str]) -> Map {
    Map::new(layout_from(rows))
}

fn explicit_start(rows: &[&str]) -> Option<Pos> {
    rows.iter()
        .enumerate()
        .find_map(|(y, row)| row.find('S').map(|x| Pos { y: y as i32, x: x as i32 }))
}

fn first_open(grid: &[Vec<bool>]) -> Option<Pos> {
    grid.iter().enumerate().find_map(|(y, row)| {
        row.iter().position(|open| *open).map(|x| Pos { y: y as i32, x: x as i32 })
    })
}

/// Steps until coverage, an idle step, or `max_steps`, returning every outcome.
pub(crate) fn run_steps(
    admin: &mut Administrator<'_>,
    max_steps: usize,
) -> Result<Vec<StepOutcome>, CoverageError> {
    let mut outcomes = Vec::new();
    while !admin.is_covered() && outcomes.len() < max_steps {
        let outcome = admin.step()?;
        outcomes.push(outcome);
        if outcome == StepOutcome::Idle {
            break;
        }
    }
    Ok(outcomes)
}

pub(crate) fn visited_path(outcomes: &[StepOutcome]) -> Vec<Pos> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            StepOutcome::Moved { to, .. } => Some(*to),
            StepOutcome::Idle => None,
        })
        .collect()
}
