//! Inclusive bounding boxes in grid index space.

use serde::{Deserialize, Serialize};

use crate::coord::{GridCoordinate, GridDimension};
use crate::error::{RadolanError, RadolanResult};

/// An inclusive rectangular region of grid cells.
///
/// Both corners are part of the region: `GridBox::new(3, 4, 3, 4)` selects
/// exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBox {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl GridBox {
    /// Create a bounding box from its lower and upper corners.
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> RadolanResult<Self> {
        if x0 > x1 || y0 > y1 {
            return Err(RadolanError::InvalidRegion(format!(
                "corners out of order: ({}, {}) .. ({}, {})",
                x0, y0, x1, y1
            )));
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Check that both corners lie inside the grid.
    pub fn check_within(&self, dim: &GridDimension) -> RadolanResult<()> {
        for corner in [
            GridCoordinate::new(self.x0, self.y0),
            GridCoordinate::new(self.x1, self.y1),
        ] {
            if !dim.contains(corner) {
                return Err(RadolanError::CoordinateOutOfRange {
                    x: corner.x,
                    y: corner.y,
                    columns: dim.columns,
                    rows: dim.rows,
                });
            }
        }
        Ok(())
    }

    /// Check if a cell is contained within this box.
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        coord.x >= self.x0 && coord.x <= self.x1 && coord.y >= self.y0 && coord.y <= self.y1
    }

    /// Column span of this box on the given row, if the row intersects it.
    pub fn columns_on_row(&self, y: usize) -> Option<(usize, usize)> {
        if y >= self.y0 && y <= self.y1 {
            Some((self.x0, self.x1))
        } else {
            None
        }
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        (self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
