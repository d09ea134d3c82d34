//! Streaming extraction from the row-major value matrix.

use std::io::Read;

use radolan_common::{GridCoordinate, RadolanResult, RequestSpec};
use tracing::trace;

use crate::header::{read_exact_or_truncated, Header};

/// Scan one frame's value matrix, emitting only requested cells.
///
/// The matrix is consumed in a single forward pass: one `columns * 2` byte
/// row buffer is reused across rows, so memory use is independent of the
/// grid height and of the request size. Values are pushed through
/// `on_value` in transmitted scan order with their row index normalized to
/// the product's published coordinate convention.
///
/// The request is validated against `header.dimension` before any byte of
/// the matrix is read; every row is consumed even when nothing in it was
/// requested, leaving `reader` positioned after the matrix.
pub fn extract_values<R, F>(
    header: &Header,
    reader: &mut R,
    request: &RequestSpec,
    mut on_value: F,
) -> RadolanResult<()>
where
    R: Read,
    F: FnMut(GridCoordinate, f64),
{
    request.validate(&header.dimension)?;

    let columns = header.dimension.columns;
    let rows = header.dimension.rows;
    let mut row_buf = vec![0u8; columns * 2];

    for scan_row in 0..rows {
        read_exact_or_truncated(reader, &mut row_buf, "value matrix row")?;

        let y = header.row_origin.normalize_row(scan_row, rows);
        let mut scan = request.row_scan(y);
        if scan.is_empty() {
            continue;
        }

        for x in 0..columns {
            if !scan.matches(x) {
                continue;
            }
            let raw = u16::from_le_bytes([row_buf[2 * x], row_buf[2 * x + 1]]);
            let value = header.decode_cell(raw);
            trace!(x, y, raw, value, "extracted cell");
            on_value(GridCoordinate::new(x, y), value);
        }
    }

    Ok(())
}
