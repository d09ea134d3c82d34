//! Extraction request: the fixed set of cells a caller wants from each frame.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bbox::GridBox;
use crate::coord::{GridCoordinate, GridDimension};
use crate::error::{RadolanError, RadolanResult};

/// The set of coordinates and regions to extract from every frame of a
/// sequencing pass.
///
/// A request is built once, validated once against the frame dimension, and
/// never mutated by the decoder afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestSpec {
    points: HashSet<GridCoordinate>,
    boxes: Vec<GridBox>,
}

impl RequestSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from individual coordinates.
    pub fn from_points<I: IntoIterator<Item = GridCoordinate>>(points: I) -> Self {
        Self {
            points: points.into_iter().collect(),
            boxes: Vec::new(),
        }
    }

    pub fn add_point(&mut self, coord: GridCoordinate) {
        self.points.insert(coord);
    }

    pub fn add_box(&mut self, bbox: GridBox) {
        self.boxes.push(bbox);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.boxes.is_empty()
    }

    /// Validate every requested cell against a frame dimension.
    ///
    /// Called by the extractor before any byte of the value matrix is
    /// consumed; a failure here never leaves the stream half-read within
    /// the matrix.
    pub fn validate(&self, dim: &GridDimension) -> RadolanResult<()> {
        for point in &self.points {
            if !dim.contains(*point) {
                return Err(RadolanError::CoordinateOutOfRange {
                    x: point.x,
                    y: point.y,
                    columns: dim.columns,
                    rows: dim.rows,
                });
            }
        }
        for bbox in &self.boxes {
            bbox.check_within(dim)?;
        }
        Ok(())
    }

    /// Membership test against points and boxes, without ordering
    /// assumptions. Prefer [`RequestSpec::row_scan`] inside scan loops.
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.points.contains(&coord) || self.boxes.iter().any(|b| b.contains(coord))
    }

    /// Prepare the membership plan for one row.
    ///
    /// Box spans intersecting the row are merged into disjoint sorted
    /// intervals once, so the per-cell test inside the column loop is a
    /// cursor walk plus a hash lookup.
    pub fn row_scan(&self, y: usize) -> RowScan<'_> {
        RowScan {
            points: &self.points,
            y,
            intervals: self.merged_intervals(y),
            cursor: 0,
        }
    }

    /// Sorted, deduplicated columns requested on one row.
    ///
    /// Used by random-access sources (the container variant) to visit only
    /// requested cells while keeping row-major emission order.
    pub fn columns_for_row(&self, y: usize) -> Vec<usize> {
        let mut columns: Vec<usize> = self
            .points
            .iter()
            .filter(|p| p.y == y)
            .map(|p| p.x)
            .collect();
        for (start, end) in self.merged_intervals(y) {
            columns.extend(start..=end);
        }
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    fn merged_intervals(&self, y: usize) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> = self
            .boxes
            .iter()
            .filter_map(|b| b.columns_on_row(y))
            .collect();
        spans.sort_unstable();

        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last_mut() {
                Some((_, last_end)) if start <= *last_end + 1 => {
                    *last_end = (*last_end).max(end);
                }
                _ => merged.push((start, end)),
            }
        }
        merged
    }
}

/// Per-row membership cursor produced by [`RequestSpec::row_scan`].
///
/// `matches` must be called with strictly increasing column indices; the
/// interval cursor only ever moves forward, so a full row costs O(columns)
/// regardless of how many boxes were requested.
#[derive(Debug)]
pub struct RowScan<'a> {
    points: &'a HashSet<GridCoordinate>,
    y: usize,
    intervals: Vec<(usize, usize)>,
    cursor: usize,
}

impl RowScan<'_> {
    pub fn matches(&mut self, x: usize) -> bool {
        while self.cursor < self.intervals.len() && self.intervals[self.cursor].1 < x {
            self.cursor += 1;
        }
        if let Some((start, _)) = self.intervals.get(self.cursor) {
            if *start <= x {
                return true;
            }
        }
        self.points.contains(&GridCoordinate::new(x, self.y))
    }

    /// Whether any cell of this row can match at all.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty() && !self.points.iter().any(|p| p.y == self.y)
    }
}
