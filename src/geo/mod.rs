use std::fmt;

pub mod sphere;
pub mod vector;

/// A place in space.
///
/// In spherical datasets this is a (longitude, latitude) pair in decimal
/// degrees. In planar datasets it's whatever projected unit the data came in.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Point(pub f64, pub f64);

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{},{},{}]", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

impl Bounds {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Bounds {
        Bounds { xmin: xmin, ymin: ymin, xmax: xmax, ymax: ymax }
    }

    /// Returns the smallest Bounds containing every (x, y) pair, or None if
    /// there are no pairs.
    pub fn from_xy<'a, T: IntoIterator<Item=(&'a f64, &'a f64)>>(xy: T) -> Option<Bounds> {
        let mut ret: Option<Bounds> = None;

        for (&x, &y) in xy {
            ret = Some(match ret {
                None => Bounds::new(x, y, x, y),
                Some(b) => Bounds::new(b.xmin.min(x), b.ymin.min(y), b.xmax.max(x), b.ymax.max(y)),
            });
        }

        ret
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Point {
        Point((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    /// `true` iff `other` lies entirely inside (or on the edge of) self.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.xmin >= self.xmin && other.xmax <= self.xmax
            && other.ymin >= self.ymin && other.ymax <= self.ymax
    }

    /// `true` iff the point lies exactly on one of the four sides.
    pub fn touches(&self, x: f64, y: f64) -> bool {
        x == self.xmin || x == self.xmax || y == self.ymin || y == self.ymax
    }
}
