//! Grid coordinate and dimension types.

use serde::{Deserialize, Serialize};

/// A cell position on the composite grid.
///
/// `x` counts columns west to east, `y` counts rows using the published
/// coordinate convention of the product (see [`RowOrigin`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: usize,
    pub y: usize,
}

impl GridCoordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Size of the composite grid.
///
/// RADOLAN dimension strings are written rows-first (`"1200x1100"` is 1200
/// rows by 1100 columns); keeping named fields here stops the decoder, the
/// extractor and the projection from disagreeing about the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimension {
    pub columns: usize,
    pub rows: usize,
}

impl GridDimension {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Check if a coordinate lies within this grid.
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        coord.x < self.columns && coord.y < self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

/// Which geographic edge of the grid carries row 0.
///
/// The classic binary composites publish their coordinates with row 0 at the
/// southern edge while the data block is transmitted northernmost row first;
/// the HDF5 successor indexes from the north. This is a per-format constant,
/// never detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrigin {
    North,
    South,
}

impl RowOrigin {
    /// Map a transmitted row index (top row first) to the published
    /// row coordinate.
    pub fn normalize_row(self, scan_row: usize, rows: usize) -> usize {
        match self {
            RowOrigin::North => scan_row,
            RowOrigin::South => rows - 1 - scan_row,
        }
    }
}
