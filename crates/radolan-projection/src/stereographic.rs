//! Polar stereographic projection for the RADOLAN composite grids.
//!
//! The composites are defined on a north polar stereographic plane with
//! true scale at 60°N and central meridian 10°E. Two published parameter
//! sets coexist: the historical spherical earth model and a WGS84
//! ellipsoidal one. They place the same point a few cells apart; which one
//! is authoritative depends on the product epoch, so both stay selectable.
//!
//! Grid origins are not published directly. Each grid geometry is
//! calibrated from a fixed anchor point (51°N 9°E) that sits a known
//! physical distance from the grid's south-west origin; that distance pair
//! is a format constant keyed by the grid dimension.

use std::f64::consts::PI;

use radolan_common::{GridCoordinate, GridDimension, RadolanError, RadolanResult, RowOrigin};
use serde::{Deserialize, Serialize};

/// Latitude of true scale (degrees north).
const TRUE_SCALE_LAT_DEG: f64 = 60.0;
/// Central meridian (degrees east).
const CENTRAL_MERIDIAN_DEG: f64 = 10.0;
/// Calibration anchor used to locate grid origins (degrees).
const ANCHOR_LAT_DEG: f64 = 51.0;
const ANCHOR_LON_DEG: f64 = 9.0;

/// Radius of the historical spherical earth model (km).
const SPHERE_RADIUS_KM: f64 = 6370.040;
/// WGS84 semi-major / semi-minor axes (km).
const WGS84_SEMI_MAJOR_KM: f64 = 6378.137;
const WGS84_SEMI_MINOR_KM: f64 = 6356.752314245;

/// Earth model parameter set, selected per product epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarthModel {
    Sphere,
    Wgs84,
}

/// Physical distance (km) from a grid's south-west origin to the anchor.
#[derive(Debug, Clone, Copy)]
struct GridExtent {
    dx: f64,
    dy: f64,
}

/// Known grid geometries, keyed by (rows, columns). New composite grids
/// require a new table entry.
fn extent_for(dim: &GridDimension) -> Option<GridExtent> {
    match (dim.rows, dim.columns) {
        (900, 900) => Some(GridExtent {
            dx: 450.0,
            dy: 450.0,
        }),
        (1200, 1100) => Some(GridExtent {
            dx: 470.0,
            dy: 600.0,
        }),
        _ => None,
    }
}

/// Polar stereographic projector for one earth model.
#[derive(Debug, Clone, Copy)]
pub struct PolarStereographic {
    model: EarthModel,
}

impl PolarStereographic {
    pub fn new(model: EarthModel) -> Self {
        Self { model }
    }

    pub fn sphere() -> Self {
        Self::new(EarthModel::Sphere)
    }

    pub fn wgs84() -> Self {
        Self::new(EarthModel::Wgs84)
    }

    pub fn model(&self) -> EarthModel {
        self.model
    }

    /// Project geographic coordinates (degrees) onto the stereographic
    /// plane. Returns (x, y) in kilometers, pole-centered: x grows east of
    /// the central meridian, y grows toward the pole (and is negative over
    /// the composite footprint).
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let mut dlon = (lon_deg - CENTRAL_MERIDIAN_DEG).to_radians();
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let rho = match self.model {
            EarthModel::Sphere => {
                let lat_ts = TRUE_SCALE_LAT_DEG.to_radians();
                let m = (1.0 + lat_ts.sin()) / (1.0 + lat.sin());
                SPHERE_RADIUS_KM * m * lat.cos()
            }
            EarthModel::Wgs84 => {
                let a = WGS84_SEMI_MAJOR_KM;
                let b = WGS84_SEMI_MINOR_KM;
                let e = (1.0 - (b / a) * (b / a)).sqrt();
                let lat_ts = TRUE_SCALE_LAT_DEG.to_radians();
                a * conformal_m(lat_ts, e) * conformal_t(lat, e) / conformal_t(lat_ts, e)
            }
        };

        (rho * dlon.sin(), -rho * dlon.cos())
    }

    /// Map geographic coordinates to a cell index on a known grid.
    ///
    /// The returned coordinate uses the grid's geometric convention with
    /// row 0 at the southern edge; indices are the ceiling of the projected
    /// offset from the calibrated origin.
    pub fn grid_coordinate(
        &self,
        lat_deg: f64,
        lon_deg: f64,
        dim: &GridDimension,
    ) -> RadolanResult<GridCoordinate> {
        let extent = extent_for(dim).ok_or(RadolanError::UnknownGridGeometry {
            rows: dim.rows,
            columns: dim.columns,
        })?;

        let (anchor_x, anchor_y) = self.project(ANCHOR_LAT_DEG, ANCHOR_LON_DEG);
        let origin_x = anchor_x - extent.dx;
        let origin_y = anchor_y - extent.dy;

        let (px, py) = self.project(lat_deg, lon_deg);
        let x = (px - origin_x).ceil();
        let y = (py - origin_y).ceil();

        if x < 0.0 || y < 0.0 || x >= dim.columns as f64 || y >= dim.rows as f64 {
            return Err(RadolanError::OutOfGrid {
                lat: lat_deg,
                lon: lon_deg,
                columns: dim.columns,
                rows: dim.rows,
            });
        }

        Ok(GridCoordinate::new(x as usize, y as usize))
    }

    /// Like [`PolarStereographic::grid_coordinate`], expressed in the
    /// published convention of a product family. North-origin products
    /// (the HDF5 successor) count rows from the northern edge.
    pub fn grid_coordinate_with_origin(
        &self,
        lat_deg: f64,
        lon_deg: f64,
        dim: &GridDimension,
        row_origin: RowOrigin,
    ) -> RadolanResult<GridCoordinate> {
        let coord = self.grid_coordinate(lat_deg, lon_deg, dim)?;
        Ok(match row_origin {
            RowOrigin::South => coord,
            RowOrigin::North => GridCoordinate::new(coord.x, dim.rows - 1 - coord.y),
        })
    }

    /// Check if a geographic point falls on a known grid.
    pub fn contains(&self, lat_deg: f64, lon_deg: f64, dim: &GridDimension) -> bool {
        self.grid_coordinate(lat_deg, lon_deg, dim).is_ok()
    }
}

/// Snyder's conformal latitude function `t` for the ellipsoidal polar
/// stereographic projection.
fn conformal_t(lat: f64, e: f64) -> f64 {
    let sin_lat = lat.sin();
    (PI / 4.0 - lat / 2.0).tan() / ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).powf(e / 2.0)
}

/// Scale function `m` at a latitude on the ellipsoid.
fn conformal_m(lat: f64, e: f64) -> f64 {
    let sin_lat = lat.sin();
    lat.cos() / (1.0 - e * e * sin_lat * sin_lat).sqrt()
}
