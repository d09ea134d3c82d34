//! Raw cell generators with predictable values.

/// Cells in transmitted order where cell `(x, scan_row)` holds
/// `(scan_row * columns + x) % 1000`, so any extracted value can be checked
/// against its coordinate. Never produces the no-data pattern.
pub fn ramp_cells(rows: usize, columns: usize) -> Vec<u16> {
    let mut cells = Vec::with_capacity(rows * columns);
    for scan_row in 0..rows {
        for x in 0..columns {
            cells.push(((scan_row * columns + x) % 1000) as u16);
        }
    }
    cells
}

/// A full matrix of one raw value.
pub fn uniform_cells(rows: usize, columns: usize, raw: u16) -> Vec<u16> {
    vec![raw; rows * columns]
}
