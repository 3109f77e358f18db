#![allow(dead_code)]

use coverage_core::{Administrator, CoverageError, Map, MapLayout, Pos, StepOutcome};

/// `#` blocked, `.` open, `S` start.
pub fn layout_from(rows: &[&str]) -> MapLayout {
    let grid: Vec<Vec<bool>> =
        rows.iter().map(|row| row.chars().map(|glyph| glyph != '#').collect()).collect();
    let start = rows
        .iter()
        .enumerate()
        .find_map(|(y, row)| row.find('S').map(|x| Pos::new(y as i32, x as i32)))
        .expect("fixture must mark its start with S");
    MapLayout::from_rows(&grid, start).expect("fixture layout must be valid")
}

pub fn map_from(rows: &[&str]) -> Map {
    Map::new(layout_from(rows))
}

/// Steps until coverage, an idle step, or `max_steps`.
pub fn run_until_settled(
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

pub fn moves(outcomes: &[StepOutcome]) -> Vec<(Pos, Pos)> {
    outcomes
        .iter()
        .filter_map(|outcome| match *outcome {
            StepOutcome::Moved { from, to, .. } => Some((from, to)),
            StepOutcome::Idle => None,
        })
        .collect()
}
