//! Error types for the radolan-decoder workspace.

use thiserror::Error;

/// Result type alias using RadolanError.
pub type RadolanResult<T> = Result<T, RadolanError>;

/// Primary error type for composite decoding operations.
///
/// No variant is retried internally; every failure aborts the current
/// decoding pass and is surfaced to the caller. Frames fully emitted
/// before the failure remain valid.
#[derive(Debug, Error)]
pub enum RadolanError {
    // === Format Errors ===
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Truncated stream while reading {0}")]
    TruncatedStream(String),

    // === Request Errors ===
    #[error("Coordinate ({x}, {y}) outside grid of {columns} columns x {rows} rows")]
    CoordinateOutOfRange {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },

    #[error("Invalid extraction region: {0}")]
    InvalidRegion(String),

    // === Projection Errors ===
    #[error("Point ({lat}, {lon}) projects outside the {columns}x{rows} grid")]
    OutOfGrid {
        lat: f64,
        lon: f64,
        columns: usize,
        rows: usize,
    },

    #[error("No physical extent registered for a {rows}x{columns} grid")]
    UnknownGridGeometry { rows: usize, columns: usize },

    // === Collaborator Errors ===
    #[error("Container attribute error: {0}")]
    ContainerAttribute(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
