//! Point cloud container with per-point shading

use crate::bounds::Bounds;
use crate::error::Error;
use crate::point::Point3f;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Neutral shading value used until hillshade values are computed, and for
/// points the shading pass cannot classify.
pub const NEUTRAL_SHADE: f32 = 0.5;

/// An ordered point set with its bounds and a parallel array of shading
/// scalars in `[0, 1]`.
///
/// Point order is the input file order; it matters only for stable
/// tie-breaking in nearest-point queries. The cloud is created wholesale on
/// load and replaced wholesale on reload; nothing mutates it incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud {
    points: Vec<Point3f>,
    bounds: Bounds,
    shading: Vec<f32>,
}

impl PointCloud {
    /// Build a cloud from a point list, deriving bounds and seeding the
    /// shading array with the neutral value.
    pub fn from_points(points: Vec<Point3f>) -> Result<Self> {
        let bounds = Bounds::from_points(&points).ok_or(Error::EmptyPointCloud)?;
        let shading = vec![NEUTRAL_SHADE; points.len()];
        Ok(Self {
            points,
            bounds,
            shading,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3f] {
        &self.points
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn shading(&self) -> &[f32] {
        &self.shading
    }

    /// Replace the shading array wholesale. The new array must be index
    /// aligned with the point sequence.
    pub fn set_shading(&mut self, shading: Vec<f32>) {
        assert_eq!(shading.len(), self.points.len());
        self.shading = shading;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3f> {
        self.points.iter()
    }
}
