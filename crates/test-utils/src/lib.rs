//! Shared test utilities for the radolan-decoder workspace.

pub mod builder;
pub mod generators;

pub use builder::CompositeBuilder;
pub use generators::{ramp_cells, uniform_cells};
