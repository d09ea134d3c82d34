//! Common types shared across the radolan-decoder workspace.

pub mod bbox;
pub mod coord;
pub mod error;
pub mod request;

pub use bbox::GridBox;
pub use coord::{GridCoordinate, GridDimension, RowOrigin};
pub use error::{RadolanError, RadolanResult};
pub use request::{RequestSpec, RowScan};
