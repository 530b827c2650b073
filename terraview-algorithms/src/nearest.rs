//! Nearest-point query driving pointer picking
//!
//! A deliberate linear scan: it is fast enough at interactive latency for
//! the cloud sizes the viewer targets, and the strict-less-than comparison
//! makes the earliest-index tie-break an observable contract. A spatial
//! index may replace it only if it preserves that ordering.

use terraview_core::{planar_distance_sq, Point3f};

/// Find the point nearest to `(x, y)` in planar distance, z ignored.
///
/// Returns the index and euclidean distance of the winner, ties broken by
/// earliest index; `None` on an empty set. Any acceptance radius is the
/// caller's policy, not part of this contract.
pub fn find_nearest_xy(points: &[Point3f], x: f32, y: f32) -> Option<(usize, f32)> {
    let mut best: Option<usize> = None;
    let mut best_dist_sq = f32::INFINITY;
    for (idx, p) in points.iter().enumerate() {
        let dist_sq = planar_distance_sq(p, x, y);
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = Some(idx);
        }
    }
    best.map(|idx| (idx, best_dist_sq.sqrt()))
}
