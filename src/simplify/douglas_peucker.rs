//! Douglas and Peucker's algorithm, which ranks each vertex by its distance
//! from the chord it would be replaced by.
use std::f64::INFINITY;

use crate::geo::vector::{segment_distance, Vec3};

/// Writes one threshold per vertex into `zz`.
///
/// The farthest interior point from the chord joining a span's endpoints
/// splits the span in two; its distance is its threshold. A point's threshold
/// is capped at the threshold of the point that split its span, so a point
/// is never kept after the point that made it a candidate was removed.
pub fn calc_arc_thresholds(vertices: &[Vec3], zz: &mut [f64]) {
    let len = vertices.len();
    zz[0] = INFINITY;
    zz[len - 1] = INFINITY;

    // (start, end, threshold of the point that created this span)
    let mut spans: Vec<(usize, usize, f64)> = vec![ (0, len - 1, INFINITY) ];

    while let Some((start, end, limit)) = spans.pop() {
        if end - start < 2 {
            continue;
        }

        let (index, distance) = (start + 1 .. end)
            .map(|i| (i, segment_distance(&vertices[i], &vertices[start], &vertices[end])))
            .fold((start + 1, -1.0), |best, candidate| if candidate.1 > best.1 { candidate } else { best });

        let threshold = distance.min(limit);
        zz[index] = threshold;

        spans.push((index, end, threshold));
        spans.push((start, index, threshold));
    }
}
