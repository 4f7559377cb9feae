//! Visvalingam and Whyatt's algorithm, which ranks each vertex by the area
//! of the triangle it forms with its neighbors.
//!
//! https://hydra.hull.ac.uk/resources/hull:8338
use std::cmp::Ordering;
use std::f64::INFINITY;
use itertools::Itertools;

use crate::geo::vector::{cosine, triangle_area, Vec3};

/// Effective area of vertex b, between a and c.
pub fn standard_metric(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    triangle_area(a, b, c)
}

/// Effective area of vertex b, scaled by how sharply the line turns at b.
///
/// The scale is `1 + weighting * cos(abc)`: a straight run (cos = -1)
/// shrinks toward `1 - weighting`, a hairpin (cos = 1) grows toward
/// `1 + weighting`. So sharp turns survive longer than gentle bends of the
/// same area.
pub fn weighted_metric(weighting: f64) -> impl Fn(&Vec3, &Vec3, &Vec3) -> f64 {
    move |a: &Vec3, b: &Vec3, c: &Vec3| {
        let weight = (1.0 + weighting * cosine(a, b, c)).max(0.0);
        triangle_area(a, b, c) * weight
    }
}

#[derive(Clone, Copy, Debug)]
struct Point {
    /// The "importance" of the point: its effective area given its current
    /// neighbors. Endpoints never change.
    weight: f64,

    /// Position in the binary heap (minimum weight first).
    heap_index: usize,

    /// Neighbors in a linked list of unvisited points, in order.
    ///
    /// When we remove a point from the heap and linked list, we recalculate
    /// the weights of its neighbors.
    previous: usize,
    next: usize,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// A min-heap of interior point indices, ordered by weight (ties: lowest
/// index first, so the ranking is deterministic).
struct PointHeap<'a, M> {
    vertices: &'a [Vec3],
    points: Vec<Point>,
    heap: Vec<usize>,
    metric: M,
}

impl<'a, M> PointHeap<'a, M>
    where M: Fn(&Vec3, &Vec3, &Vec3) -> f64
{
    fn new(vertices: &'a [Vec3], metric: M) -> PointHeap<'a, M> {
        let len = vertices.len();
        assert!(len >= 3);

        let mut points: Vec<Point> = (0 .. len)
            .map(|i| Point {
                weight: INFINITY,
                heap_index: 0,
                previous: i.saturating_sub(1),
                next: (i + 1).min(len - 1),
            })
            .collect();

        // Compute initial weights
        for (i, (a, b, c)) in vertices.iter().tuple_windows().enumerate() {
            points[i + 1].weight = metric(a, b, c);
            points[i + 1].heap_index = i;
        }

        let mut ret = PointHeap {
            vertices: vertices,
            points: points,
            heap: (1 .. len - 1).collect(),
            metric: metric,
        };
        ret.heapify();
        ret
    }

    /// `true` iff heap slot `a` should sit above heap slot `b`.
    fn is_before(&self, a: usize, b: usize) -> bool {
        let (pa, pb) = (self.heap[a], self.heap[b]);
        match self.points[pa].weight.total_cmp(&self.points[pb].weight) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => pa < pb,
        }
    }

    fn heapify(&mut self) {
        // https://en.wikipedia.org/wiki/Heapsort
        let len = self.heap.len();

        if len > 1 {
            let mut start = parent(len - 1);

            loop {
                self.sift_down(start, len - 1);
                if start == 0 {
                    break;
                }
                start -= 1;
            }
        }
    }

    fn sift_down(&mut self, start: usize, end: usize) {
        let mut root = start;

        while left_child(root) <= end {
            let child = left_child(root);
            let mut swap = root;

            if self.is_before(child, swap) {
                swap = child;
            }

            if child + 1 <= end && self.is_before(child + 1, swap) {
                swap = child + 1;
            }

            if swap == root {
                // root holds smallest element
                return;
            }

            self.swap(root, swap);
            root = swap;
        }
    }

    fn sift_up(&mut self, start: usize, end: usize) {
        let mut child = end;

        while child > start {
            let parent = parent(child);
            if self.is_before(child, parent) {
                self.swap(parent, child);
                child = parent;
            } else {
                return;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let (pa, pb) = (self.heap[a], self.heap[b]);
        self.points[pa].heap_index = a;
        self.points[pb].heap_index = b;
    }

    /// Removes the smallest-weight point from the heap and the linked list;
    /// returns its index.
    fn pop(&mut self) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        if !self.heap.is_empty() {
            let end = self.heap.len() - 1;
            self.sift_down(0, end);
        }

        let Point { previous, next, .. } = self.points[top];
        self.points[previous].next = next;
        self.points[next].previous = previous;

        Some(top)
    }

    /// Recomputes a point's weight from its current neighbors and moves it
    /// within the heap to match.
    fn recalculate_point_weight(&mut self, i: usize) {
        if i == 0 || i == self.points.len() - 1 {
            // First or last point. Its weight can't change.
            return;
        }

        let Point { weight, heap_index, previous, next } = self.points[i];
        let new_weight = (self.metric)(&self.vertices[previous], &self.vertices[i], &self.vertices[next]);
        self.points[i].weight = new_weight;

        if new_weight < weight {
            // It may now be smaller than its parent. (It won't become smaller
            // than its children: it was larger before.)
            self.sift_up(0, heap_index);
        } else if new_weight > weight {
            let end = self.heap.len() - 1;
            self.sift_down(heap_index, end);
        }
    }
}

/// Writes one threshold per vertex into `zz`.
///
/// 1. remove the smallest-weight point: its weight is its threshold
/// 2. recalculate the weights of the points before and after it, now that
///    it's gone
/// 3. repeat until only the endpoints remain.
///
/// A point's threshold is never lower than that of a point removed before
/// it: that way, any threshold removes a point only after removing every
/// point that was eliminated earlier.
///
/// Thresholds are the square root of the effective area, so they're in the
/// same units as the coordinates (and as Douglas-Peucker thresholds).
pub fn calc_arc_thresholds<M>(vertices: &[Vec3], metric: M, zz: &mut [f64])
    where M: Fn(&Vec3, &Vec3, &Vec3) -> f64
{
    let len = vertices.len();
    zz[0] = INFINITY;
    zz[len - 1] = INFINITY;

    if len < 3 {
        return;
    }

    let mut point_heap = PointHeap::new(vertices, metric);
    let mut last_weight = 0.0;

    while let Some(i) = point_heap.pop() {
        let weight = point_heap.points[i].weight.max(last_weight);
        last_weight = weight;
        zz[i] = weight.sqrt();

        let Point { previous, next, .. } = point_heap.points[i];
        point_heap.recalculate_point_weight(previous);
        point_heap.recalculate_point_weight(next);
    }
}
