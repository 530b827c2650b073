//! Point types and related functionality

use nalgebra::{Point2, Point3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 2D point with floating point coordinates
pub type Point2f = Point2<f32>;

/// Planar (XY) distance between two points, ignoring z.
pub fn planar_distance(a: &Point3f, b: &Point3f) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Squared planar (XY) distance between a point and a query coordinate.
pub fn planar_distance_sq(p: &Point3f, x: f32, y: f32) -> f32 {
    let dx = p.x - x;
    let dy = p.y - y;
    dx * dx + dy * dy
}

/// Exact planar coordinate equality, the match rule used for polygon
/// vertex identity. Vertices come from the point cloud itself, so snapped
/// picks of the same sample compare bit-equal.
pub fn same_planar_point(a: &Point3f, b: &Point3f) -> bool {
    a.x == b.x && a.y == b.y
}
