//! Axis-aligned bounds of a loaded point set

use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of a point set, derived once per load.
///
/// A degenerate extent (min == max on an axis) is a valid state, e.g. a
/// single point or a perfectly vertical profile; consumers handle it
/// explicitly rather than this type rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    /// Compute bounds over a point set; `None` when empty.
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
            min_z: first.z,
            max_z: first.z,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
            bounds.min_z = bounds.min_z.min(p.z);
            bounds.max_z = bounds.max_z.max(p.z);
        }
        Some(bounds)
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Center of the planar extent.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// True when either planar axis has zero extent.
    pub fn is_planar_degenerate(&self) -> bool {
        self.min_x == self.max_x || self.min_y == self.max_y
    }
}
