//! Threshold fix-ups for vertices on the edge of the world, or of the data.
use std::f64::INFINITY;

use crate::geo::Bounds;
use crate::geo::sphere::is_world_edge;
use crate::topology::{ArcCollection, ArcView};

/// Makes antimeridian and pole seams simplify as a unit.
///
/// A polygon that wraps the world has a seam along ±180° (or along a pole).
/// If the seam's vertices simplified independently of each other, the seam
/// would pull away from the edge on one side of the map and not the other.
/// So for each Arc with interior vertices exactly on the world edge, those
/// vertices all take the highest interior threshold in the Arc: they go
/// when the Arc's most important interior vertex goes, and not before.
///
/// Arcs without interior vertices on the edge are untouched.
pub fn protect_world_edges(arcs: &mut ArcCollection) {
    if !arcs.has_thresholds() {
        return;
    }

    for view in arcs.arc_views_mut() {
        protect_arc_world_edges(view);
    }
}

fn protect_arc_world_edges(view: ArcView) {
    let len = view.len();
    let interior = 1 .. len - 1;

    let on_edge: Vec<usize> = interior.clone()
        .filter(|&i| is_world_edge(view.point(i)))
        .collect();

    if on_edge.is_empty() {
        return;
    }

    let zmax = view.zz[interior].iter().cloned().fold(0.0, f64::max);
    trace!("arc {}: pinning {} world-edge vertices at {}", view.arc_id, on_edge.len(), zmax);

    for i in on_edge {
        view.zz[i] = zmax;
    }
}

/// Pins every interior vertex that touches `bounds` (usually the content's
/// bounding box) so no simplification can remove it.
///
/// This keeps shapes from shrinking away from their bounding box: a
/// rectangle stays a rectangle even at 0% retention.
pub fn protect_content_edges(arcs: &mut ArcCollection, bounds: &Bounds) {
    if !arcs.has_thresholds() {
        return;
    }

    let mut n_pinned = 0;

    for view in arcs.arc_views_mut() {
        for i in 1 .. view.len() - 1 {
            let p = view.point(i);
            if bounds.touches(p.0, p.1) {
                view.zz[i] = INFINITY;
                n_pinned += 1;
            }
        }
    }

    trace!("lock-box: pinned {} vertices on {}", n_pinned, bounds);
}
