//! Longitude/latitude helpers.
use std::f64::consts::PI;

use crate::geo::{Bounds, Point};
use crate::geo::vector::Vec3;

/// Sphere radius, in metres (WGS84 semi-major axis).
pub const R: f64 = 6378137.0;

/// The whole world, in decimal degrees.
pub const WORLD_BOUNDS: Bounds = Bounds { xmin: -180.0, ymin: -90.0, xmax: 180.0, ymax: 90.0 };

/// Returns the point (decimal degrees) projected onto a sphere of the given
/// radius, centered on the origin.
pub fn lonlat_to_xyz(lon: f64, lat: f64, radius: f64) -> Vec3 {
    let lambda = lon.to_radians();
    let phi = lat.to_radians();
    let cos_phi = phi.cos();
    [
        cos_phi * lambda.cos() * radius,
        cos_phi * lambda.sin() * radius,
        phi.sin() * radius,
    ]
}

/// Returns the length (in `radius` units) of one degree along a great
/// circle.
pub fn degree_length(radius: f64) -> f64 {
    PI * radius / 180.0
}

/// `true` iff the bounds could plausibly be decimal degrees.
///
/// We can't know for sure: a planar dataset in a tiny projected unit will
/// fool us. Callers who know better pass `planar`.
pub fn probably_decimal_degree_bounds(bounds: &Bounds) -> bool {
    WORLD_BOUNDS.contains_bounds(bounds)
}

/// `true` iff the point sits exactly on the antimeridian or a pole.
pub fn is_world_edge(point: Point) -> bool {
    point.0 == 180.0 || point.0 == -180.0 || point.1 == 90.0 || point.1 == -90.0
}

/// `true` iff the bounds reach the antimeridian or a pole.
pub fn reaches_world_edge(bounds: &Bounds) -> bool {
    bounds.xmin <= -180.0 || bounds.xmax >= 180.0 || bounds.ymin <= -90.0 || bounds.ymax >= 90.0
}
