//! Horn-kernel hillshading over the elevation grid
//!
//! Produces a grayscale shading scalar in `[0, 1]` per grid cell and per
//! point. Shading is recomputed wholesale whenever the lighting parameters
//! or the point cloud change; there is no incremental update path.

use crate::elevation::ElevationGrid;
use serde::{Deserialize, Serialize};
use terraview_core::Point3f;
use tracing::debug;

/// Neutral gray returned for boundary cells and unbinnable points.
const NEUTRAL_SHADE: f32 = 0.5;

/// Light-source configuration for the hillshade computation.
///
/// Angles are in degrees; `z_factor` exaggerates relief before the slope
/// is taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HillshadeParams {
    pub azimuth: f32,
    pub altitude: f32,
    pub z_factor: f32,
}

impl Default for HillshadeParams {
    fn default() -> Self {
        Self {
            azimuth: 315.0,
            altitude: 35.0,
            z_factor: 2.0,
        }
    }
}

impl HillshadeParams {
    /// Shade a single grid cell with the Horn 3×3 finite-difference kernel.
    ///
    /// Boundary cells (first or last row/column) are never shaded and
    /// return the neutral value.
    pub fn shade_cell(&self, grid: &ElevationGrid, x: usize, y: usize) -> f32 {
        let n = grid.size();
        if x == 0 || x >= n - 1 || y == 0 || y >= n - 1 {
            return NEUTRAL_SHADE;
        }

        // 3x3 neighborhood, row-major; the center (z5) does not enter the
        // kernel. Unset cells read as 0, matching an unfilled grid's
        // behavior; callers fill gaps before shading.
        let z = |gx: usize, gy: usize| grid.get(gx, gy).unwrap_or(0.0);
        let (z1, z2, z3) = (z(x - 1, y - 1), z(x, y - 1), z(x + 1, y - 1));
        let (z4, z6) = (z(x - 1, y), z(x + 1, y));
        let (z7, z8, z9) = (z(x - 1, y + 1), z(x, y + 1), z(x + 1, y + 1));

        let denom = 8.0 * grid.resolution();
        let dzdx = ((z1 + 2.0 * z4 + z7) - (z3 + 2.0 * z6 + z9)) / denom * self.z_factor;
        let dzdy = ((z1 + 2.0 * z2 + z3) - (z7 + 2.0 * z8 + z9)) / denom * self.z_factor;

        let slope = (dzdx * dzdx + dzdy * dzdy).sqrt().atan();
        let aspect = dzdy.atan2(-dzdx);

        let az_rad = (360.0 - self.azimuth + 90.0).to_radians();
        let alt_rad = self.altitude.to_radians();

        let shade = slope.cos() * alt_rad.sin()
            + slope.sin() * alt_rad.cos() * (az_rad - aspect).cos();

        // In range by construction of sin/cos; clamp anyway.
        ((shade + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    /// Shade every point by the cell it bins into, in point order.
    ///
    /// Points that land outside the grid (or cannot be binned under
    /// degenerate bounds) receive the neutral value.
    pub fn shade_points(&self, grid: &ElevationGrid, points: &[Point3f]) -> Vec<f32> {
        debug!(
            point_count = points.len(),
            azimuth = self.azimuth,
            altitude = self.altitude,
            z_factor = self.z_factor,
            "computing hillshade values"
        );
        points
            .iter()
            .map(|p| match grid.bin(p.x, p.y) {
                Some((gx, gy)) => self.shade_cell(grid, gx, gy),
                None => NEUTRAL_SHADE,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use terraview_core::Bounds;

    fn flat_grid(size: usize, elevation: f32) -> ElevationGrid {
        let mut points = Vec::new();
        for y in 0..size {
            for x in 0..size {
                points.push(Point3f::new(x as f32, y as f32, elevation));
            }
        }
        let bounds = Bounds::from_points(&points).unwrap();
        let mut grid = ElevationGrid::build(&points, &bounds, size);
        grid.fill_gaps();
        grid
    }

    #[test]
    fn test_boundary_cells_are_neutral() {
        let params = HillshadeParams::default();
        let grid = flat_grid(5, 3.0);
        for i in 0..5 {
            assert_eq!(params.shade_cell(&grid, 0, i), 0.5);
            assert_eq!(params.shade_cell(&grid, 4, i), 0.5);
            assert_eq!(params.shade_cell(&grid, i, 0), 0.5);
            assert_eq!(params.shade_cell(&grid, i, 4), 0.5);
        }
    }

    #[test]
    fn test_flat_grid_shade_is_azimuth_independent() {
        // Zero gradient means slope 0 and shade = sin(altitude), whatever
        // direction the light comes from.
        let grid = flat_grid(6, 12.0);
        let north = HillshadeParams {
            azimuth: 0.0,
            ..Default::default()
        };
        let west = HillshadeParams {
            azimuth: 270.0,
            ..Default::default()
        };
        let expected = (35.0f32.to_radians().sin() + 1.0) / 2.0;
        for y in 1..5 {
            for x in 1..5 {
                let a = north.shade_cell(&grid, x, y);
                let b = west.shade_cell(&grid, x, y);
                assert_relative_eq!(a, b, epsilon = 1e-6);
                assert_relative_eq!(a, expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_shade_in_unit_range_for_arbitrary_elevations() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = 12;
        let mut points = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let z = rng.gen_range(-5000.0..5000.0);
                points.push(Point3f::new(x as f32, y as f32, z));
            }
        }
        let bounds = Bounds::from_points(&points).unwrap();
        let mut grid = ElevationGrid::build(&points, &bounds, size);
        grid.fill_gaps();

        let params = HillshadeParams::default();
        for y in 0..size {
            for x in 0..size {
                let shade = params.shade_cell(&grid, x, y);
                assert!((0.0..=1.0).contains(&shade), "shade {shade} out of range");
            }
        }
    }

    #[test]
    fn test_opposing_azimuths_differ_on_a_ramp() {
        // A uniform ramp has a nonzero slope, so opposite light azimuths
        // must land on opposite sides of neutral.
        let size = 8;
        let mut points = Vec::new();
        for y in 0..size {
            for x in 0..size {
                points.push(Point3f::new(x as f32, y as f32, -(x as f32)));
            }
        }
        let bounds = Bounds::from_points(&points).unwrap();
        let mut grid = ElevationGrid::build(&points, &bounds, size);
        grid.fill_gaps();

        let west = HillshadeParams {
            azimuth: 270.0,
            ..Default::default()
        };
        let east = HillshadeParams {
            azimuth: 90.0,
            ..Default::default()
        };
        assert!(west.shade_cell(&grid, 3, 3) > east.shade_cell(&grid, 3, 3));
    }

    #[test]
    fn test_shade_points_aligned_and_in_range() {
        let size = 6;
        let mut points = Vec::new();
        for y in 0..size {
            for x in 0..size {
                points.push(Point3f::new(x as f32, y as f32, (x + y) as f32));
            }
        }
        let bounds = Bounds::from_points(&points).unwrap();
        let mut grid = ElevationGrid::build(&points, &bounds, size);
        grid.fill_gaps();

        let shading = HillshadeParams::default().shade_points(&grid, &points);
        assert_eq!(shading.len(), points.len());
        assert!(shading.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}
