//! Geodetic projection onto the RADOLAN composite grids.
//!
//! Implements the polar stereographic projection from scratch without
//! external dependencies.

pub mod stereographic;

pub use stereographic::{EarthModel, PolarStereographic};
