//! Turns an output resolution into a simplification interval.
//!
//! If a map will be drawn 1000 pixels wide, detail smaller than a pixel is
//! invisible. The interval is the length of one "pixel", in data units.
use crate::geo::Bounds;
use crate::geo::sphere::degree_length;

/// Returns the interval that fits `width` x `height` of content into
/// `xres` x `yres` pixels.
///
/// Whichever axis runs out of pixels first constrains the interval. A zero
/// resolution means "don't constrain this axis"; both can't be zero.
pub fn calc_planar_interval(xres: f64, yres: f64, width: f64, height: f64) -> f64 {
    debug_assert!(xres > 0.0 || yres > 0.0, "a resolution needs a nonzero width or height");

    let fit_width = yres == 0.0 || (xres != 0.0 && width / xres > height / yres);

    if fit_width {
        width / xres
    } else {
        height / yres
    }
}

/// Like `calc_planar_interval()`, for longitude/latitude bounds: the
/// interval is in metres on a sphere of the given radius.
///
/// A degree of latitude is the same length everywhere; a degree of
/// longitude shrinks toward the poles, so we measure width at the bounds'
/// central latitude.
pub fn calc_spherical_interval(xres: f64, yres: f64, bounds: &Bounds, radius: f64) -> f64 {
    let degree = degree_length(radius);
    let center_latitude = bounds.center().1.to_radians();

    let width = bounds.width() * center_latitude.cos() * degree;
    let height = bounds.height() * degree;

    calc_planar_interval(xres, yres, width, height)
}
