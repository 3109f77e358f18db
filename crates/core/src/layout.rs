//! Validated map construction input.
//!
//! Loaders (files, generators, test fixtures) produce a [`MapLayout`]; the map itself is
//! only ever built from one, so malformed grids are rejected before the core exists.

use crate::error::LayoutError;
use crate::grid;
use crate::types::Pos;

/// Rectangular traversability grid plus a traversable start cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapLayout {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    start: Pos,
}

impl MapLayout {
    /// `cells` is row-major, `true` meaning traversable.
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<bool>,
        start: Pos,
    ) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::Empty);
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(LayoutError::TooLarge { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(LayoutError::SizeMismatch { expected, found: cells.len() });
        }
        let Some(idx) = grid::index(width, height, start) else {
            return Err(LayoutError::StartOutOfBounds { start });
        };
        if !cells[idx] {
            return Err(LayoutError::StartBlocked { start });
        }
        Ok(Self { width, height, cells, start })
    }

    pub fn from_rows<Row>(rows: &[Row], start: Pos) -> Result<Self, LayoutError>
    where
        Row: AsRef<[bool]>,
    {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(LayoutError::Ragged {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Self::new(width, rows.len(), cells, start)
    }

    /// Every cell traversable.
    pub fn open(width: usize, height: usize, start: Pos) -> Result<Self, LayoutError> {
        Self::new(width, height, vec![true; width * height], start)
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

    pub fn is_traversable(&self, pos: Pos) -> bool {
        grid::index(self.width, self.height, pos).is_some_and(|idx| self.cells[idx])
    }

    pub(crate) fn into_cells(self) -> Vec<bool> {
        self.cells
    }
}
