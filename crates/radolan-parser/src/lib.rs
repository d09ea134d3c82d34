//! Decoders for the RADOLAN composite raster formats.
//!
//! This crate parses the fixed-layout binary composite header, streams cell
//! values out of the row-major value matrix, and adapts the HDF5-based
//! successor format through an opaque attribute accessor. It never touches
//! the network or the archive container itself; callers hand it positioned
//! byte streams.

pub mod container;
pub mod header;
pub mod layout;
pub mod values;

pub use container::{extract_container_values, read_container_header, CompositeSource};
pub use header::{
    decode_header, Header, ValueScaling, HEADER_TERMINATOR, MAX_METADATA_LEN, NO_DATA_PATTERN,
    SENTINEL_VALUE,
};
pub use layout::HeaderLayout;
pub use values::extract_values;
