use std::mem;
use std::ops::Range;

use crate::error::{Result, SimplifyError};
use crate::geo::{Bounds, Point};

/// Every Arc in a dataset, stored in shared buffers.
///
/// Arc `i` owns vertices `ii[i] .. ii[i] + nn[i]` of `xx` and `yy`. Arcs are
/// stored back to back, so no two arcs own the same physical vertex: a
/// boundary shared by two polygons is a single Arc that both polygons refer
/// to (one of them, probably, backwards -- see `arc_points()`).
///
/// `zz` holds one "importance" per vertex. It's empty until somebody
/// computes or installs thresholds. The first and last vertex of each Arc
/// always have importance `INFINITY`: they're the nodes joining Arcs, and we
/// never remove them.
#[derive(Clone, Debug)]
pub struct ArcCollection {
    xx: Vec<f64>,
    yy: Vec<f64>,
    zz: Vec<f64>,
    nn: Vec<usize>,
    ii: Vec<usize>,

    /// Vertices with `zz[i] < zlimit` are filtered out when reading arcs.
    zlimit: f64,
}

/// Borrowed view of an ArcCollection's buffers.
#[derive(Debug)]
pub struct VertexData<'a> {
    pub xx: &'a [f64],
    pub yy: &'a [f64],
    pub zz: &'a [f64],
    pub nn: &'a [usize],
    pub ii: &'a [usize],
}

/// One Arc's vertices, with its thresholds open for writing.
///
/// Views of different Arcs never overlap, so they can be handed to different
/// threads.
#[derive(Debug)]
pub struct ArcView<'a> {
    pub arc_id: usize,
    pub xx: &'a [f64],
    pub yy: &'a [f64],
    pub zz: &'a mut [f64],
}

impl<'a> ArcView<'a> {
    pub fn len(&self) -> usize {
        self.xx.len()
    }

    pub fn point(&self, i: usize) -> Point {
        Point(self.xx[i], self.yy[i])
    }
}

impl ArcCollection {
    /// Builds an ArcCollection from nested points: arc => vertex.
    pub fn new(arcs: Vec<Vec<Point>>) -> Result<ArcCollection> {
        let len: usize = arcs.iter().map(|a| a.len()).sum();
        let nn: Vec<usize> = arcs.iter().map(|a| a.len()).collect();

        let mut xx = Vec::<f64>::with_capacity(len);
        let mut yy = Vec::<f64>::with_capacity(len);

        for arc in arcs {
            for Point(x, y) in arc {
                xx.push(x);
                yy.push(y);
            }
        }

        ArcCollection::from_vertex_data(xx, yy, nn)
    }

    /// Builds an ArcCollection from flat buffers: `nn[i]` is the number of
    /// vertices in Arc `i`.
    pub fn from_vertex_data(xx: Vec<f64>, yy: Vec<f64>, nn: Vec<usize>) -> Result<ArcCollection> {
        if xx.len() != yy.len() {
            return Err(SimplifyError::InvalidVertexData(
                format!("{} x values but {} y values", xx.len(), yy.len())
            ));
        }

        if let Some((arc_id, &len)) = nn.iter().enumerate().find(|&(_, &n)| n < 2) {
            return Err(SimplifyError::DegenerateArc { arc_id: arc_id, len: len });
        }

        let total: usize = nn.iter().sum();
        if total != xx.len() {
            return Err(SimplifyError::InvalidVertexData(
                format!("arcs claim {} vertices but buffers hold {}", total, xx.len())
            ));
        }

        let ii: Vec<usize> = nn.iter()
            .scan(0, |offset, &n| {
                let start = *offset;
                *offset += n;
                Some(start)
            })
            .collect();

        Ok(ArcCollection {
            xx: xx,
            yy: yy,
            zz: vec![],
            nn: nn,
            ii: ii,
            zlimit: 0.0,
        })
    }

    /// Number of Arcs.
    pub fn size(&self) -> usize {
        self.nn.len()
    }

    /// Number of physical vertices.
    pub fn point_count(&self) -> usize {
        self.xx.len()
    }

    /// Returns the indices of Arc `arc_id`'s vertices in the shared buffers.
    ///
    /// Panics if `arc_id >= self.size()`.
    pub fn arc_range(&self, arc_id: usize) -> Range<usize> {
        let start = self.ii[arc_id];
        start .. start + self.nn[arc_id]
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_xy(self.xx.iter().zip(self.yy.iter()))
    }

    pub fn vertex_data(&self) -> VertexData {
        VertexData {
            xx: &self.xx[..],
            yy: &self.yy[..],
            zz: &self.zz[..],
            nn: &self.nn[..],
            ii: &self.ii[..],
        }
    }

    /// `true` once thresholds have been computed or installed.
    pub fn has_thresholds(&self) -> bool {
        !self.zz.is_empty()
    }

    /// Returns the flat threshold buffer (empty if there are no thresholds).
    pub fn thresholds(&self) -> &[f64] {
        &self.zz[..]
    }

    /// Installs thresholds: `thresholds[i]` belongs to Arc `i`.
    pub fn set_thresholds(&mut self, thresholds: Vec<Vec<f64>>) -> Result<&mut ArcCollection> {
        if thresholds.len() != self.size() {
            return Err(SimplifyError::InvalidVertexData(
                format!("{} arcs but {} threshold arrays", self.size(), thresholds.len())
            ));
        }

        for (arc_id, arc_thresholds) in thresholds.iter().enumerate() {
            if arc_thresholds.len() != self.nn[arc_id] {
                return Err(SimplifyError::ThresholdMismatch {
                    arc_id: arc_id,
                    expected: self.nn[arc_id],
                    actual: arc_thresholds.len(),
                });
            }
        }

        self.zz = thresholds.into_iter().flat_map(|t| t.into_iter()).collect();
        Ok(self)
    }

    /// Sets every interior threshold to 0 and every endpoint to INFINITY.
    pub fn reset_thresholds(&mut self) {
        let mut zz = vec![0.0; self.xx.len()];
        for (&start, &n) in self.ii.iter().zip(self.nn.iter()) {
            zz[start] = f64::INFINITY;
            zz[start + n - 1] = f64::INFINITY;
        }
        self.zz = zz;
    }

    /// Returns one writable view per Arc, in Arc order.
    ///
    /// Resets thresholds first if there aren't any.
    pub fn arc_views_mut(&mut self) -> Vec<ArcView> {
        if self.zz.len() != self.xx.len() {
            self.reset_thresholds();
        }

        let mut rest: &mut [f64] = &mut self.zz[..];
        let mut views = Vec::<ArcView>::with_capacity(self.nn.len());

        for (arc_id, (&start, &n)) in self.ii.iter().zip(self.nn.iter()).enumerate() {
            let (zz, tail) = mem::take(&mut rest).split_at_mut(n);
            rest = tail;
            views.push(ArcView {
                arc_id: arc_id,
                xx: &self.xx[start .. start + n],
                yy: &self.yy[start .. start + n],
                zz: zz,
            });
        }

        views
    }

    /// Maps a signed Arc reference to (Arc index, reversed?).
    ///
    /// `!id` (that is, `-id - 1`) means Arc `id`, backwards.
    pub fn absolute_id(arc_ref: isize) -> (usize, bool) {
        if arc_ref < 0 {
            ((!arc_ref) as usize, true)
        } else {
            (arc_ref as usize, false)
        }
    }

    fn is_retained(&self, i: usize) -> bool {
        self.zz.is_empty() || self.zz[i] >= self.zlimit
    }

    /// Returns the retained vertices of an Arc, in the referenced direction.
    ///
    /// Panics if the reference names an Arc past `self.size()`.
    pub fn arc_points(&self, arc_ref: isize) -> Vec<Point> {
        let (arc_id, reversed) = ArcCollection::absolute_id(arc_ref);

        let mut points: Vec<Point> = self.arc_range(arc_id)
            .filter(|&i| self.is_retained(i))
            .map(|i| Point(self.xx[i], self.yy[i]))
            .collect();

        if reversed {
            points.reverse();
        }

        points
    }

    /// Returns every Arc's retained vertices: arc => vertex.
    pub fn to_vec(&self) -> Vec<Vec<Point>> {
        (0 .. self.size()).map(|i| self.arc_points(i as isize)).collect()
    }

    pub fn retained_interval(&self) -> f64 {
        self.zlimit
    }

    /// Retains only vertices whose threshold is at least `interval`.
    pub fn set_retained_interval(&mut self, interval: f64) -> Result<()> {
        if !(interval >= 0.0) {
            return Err(SimplifyError::InvalidInterval(interval));
        }
        self.zlimit = interval;
        Ok(())
    }

    /// Retains (roughly) `pct` of the removable vertices.
    pub fn set_retained_pct(&mut self, pct: f64) -> Result<()> {
        let interval = self.threshold_by_pct(pct)?;
        self.set_retained_interval(interval)
    }

    /// Returns the threshold that retains (roughly) `pct` of the removable
    /// vertices.
    ///
    /// `1` retains everything; `0` retains only vertices with INFINITY
    /// importance.
    pub fn threshold_by_pct(&self, pct: f64) -> Result<f64> {
        if !(pct >= 0.0 && pct <= 1.0) {
            return Err(SimplifyError::InvalidPercentage(pct));
        }

        let mut removable = self.removable_thresholds();
        let n = removable.len();
        if n == 0 {
            return Ok(0.0);
        }

        let rank = ((1.0 - pct) * (n + 2) as f64).floor() as usize;

        Ok(if rank == 0 {
            0.0
        } else if rank > n {
            f64::INFINITY
        } else {
            let (_, &mut z, _) = removable.select_nth_unstable_by(rank - 1, |a, b| a.total_cmp(b));
            z
        })
    }

    /// Returns every finite interior threshold.
    fn removable_thresholds(&self) -> Vec<f64> {
        if self.zz.is_empty() {
            return vec![];
        }

        self.ii.iter().zip(self.nn.iter())
            .flat_map(|(&start, &n)| self.zz[start + 1 .. start + n - 1].iter().cloned())
            .filter(|z| z.is_finite())
            .collect()
    }
}
