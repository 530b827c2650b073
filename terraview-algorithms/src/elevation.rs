//! Elevation grid construction and gap filling
//!
//! Scattered samples are binned into a square grid of averaged elevations.
//! Cells no sample lands in are filled by a bounded neighbor-averaging pass;
//! gaps wider than the pass budget settle on the grid's minimum elevation.
//! That uniform plateau on very sparse clouds is accepted behavior, not a
//! defect to smooth over.

use terraview_core::{Bounds, Point3f};
use tracing::debug;

/// Maximum neighbor-averaging passes before falling back to the minimum.
const MAX_FILL_PASSES: usize = 3;

/// Bounds for the density-derived default grid size.
pub const MIN_GRID_SIZE: usize = 50;
pub const MAX_GRID_SIZE: usize = 200;

/// An N×N matrix of optional cell elevations, together with the bounds and
/// resolution it was built with. Rebuilt wholesale whenever the point cloud
/// or the grid size target changes; never mutated incrementally afterwards.
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    cells: Vec<Option<f32>>,
    size: usize,
    resolution: f32,
    bounds: Bounds,
}

impl ElevationGrid {
    /// Bin points into an N×N grid, averaging elevation per cell.
    ///
    /// Points whose computed cell index falls outside `[0, N-1]` are
    /// discarded. For bounds derived from the same point set that cannot
    /// happen, except for degenerate bounds where the bin math is undefined
    /// and every point is dropped.
    pub fn build(points: &[Point3f], bounds: &Bounds, size: usize) -> Self {
        debug!(size, point_count = points.len(), "building elevation grid");

        let resolution = (bounds.width() / size as f32).min(bounds.height() / size as f32);

        let mut sums = vec![0.0f32; size * size];
        let mut counts = vec![0u32; size * size];
        for p in points {
            if let Some((gx, gy)) = bin(bounds, size, p.x, p.y) {
                sums[gy * size + gx] += p.z;
                counts[gy * size + gx] += 1;
            }
        }

        let cells = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| {
                if count > 0 {
                    Some(sum / count as f32)
                } else {
                    None
                }
            })
            .collect();

        Self {
            cells,
            size,
            resolution,
            bounds: *bounds,
        }
    }

    /// Fill unset cells by iterative neighbor averaging.
    ///
    /// Each pass reads a snapshot taken before the pass: an unset cell
    /// becomes the mean of its up-to-8 neighbors that were set in that
    /// snapshot, never of cells filled during the same pass. After
    /// `MAX_FILL_PASSES` passes any remaining unset cell is set to the
    /// global minimum of the originally-set cells, or 0 if no cell was
    /// ever set.
    pub fn fill_gaps(&mut self) {
        let min_elevation = self
            .cells
            .iter()
            .flatten()
            .copied()
            .fold(f32::INFINITY, f32::min);
        let fallback = if min_elevation.is_finite() {
            min_elevation
        } else {
            0.0
        };

        for pass in 0..MAX_FILL_PASSES {
            if self.cells.iter().all(|c| c.is_some()) {
                break;
            }
            let snapshot = self.cells.clone();
            for y in 0..self.size {
                for x in 0..self.size {
                    if snapshot[y * self.size + x].is_some() {
                        continue;
                    }
                    let mut sum = 0.0;
                    let mut count = 0u32;
                    for dy in -1i64..=1 {
                        for dx in -1i64..=1 {
                            let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                            if nx < 0 || ny < 0 || nx >= self.size as i64 || ny >= self.size as i64
                            {
                                continue;
                            }
                            if let Some(z) = snapshot[ny as usize * self.size + nx as usize] {
                                sum += z;
                                count += 1;
                            }
                        }
                    }
                    if count > 0 {
                        self.cells[y * self.size + x] = Some(sum / count as f32);
                    }
                }
            }
            debug!(pass, "gap fill pass complete");
        }

        for cell in &mut self.cells {
            if cell.is_none() {
                *cell = Some(fallback);
            }
        }
    }

    /// Grid side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Data units per cell, the smaller of the two axis resolutions.
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Cell value at `(x, y)`, `None` while unset.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.cells[y * self.size + x]
    }

    /// Cell indices a data coordinate maps to, using the same binning
    /// formula as `build`. `None` outside the grid or for degenerate bounds.
    pub fn bin(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        bin(&self.bounds, self.size, x, y)
    }
}

fn bin_axis(v: f32, min: f32, max: f32, size: usize) -> Option<usize> {
    let t = ((v - min) / (max - min) * (size as f32 - 1.0)).floor();
    if t.is_finite() && t >= 0.0 && t < size as f32 {
        Some(t as usize)
    } else {
        None
    }
}

fn bin(bounds: &Bounds, size: usize, x: f32, y: f32) -> Option<(usize, usize)> {
    let gx = bin_axis(x, bounds.min_x, bounds.max_x, size)?;
    let gy = bin_axis(y, bounds.min_y, bounds.max_y, size)?;
    Some((gx, gy))
}

/// Density-derived default grid size: roughly one cell per five points,
/// clamped to a workable range.
pub fn default_grid_size(point_count: usize) -> usize {
    ((point_count as f32 / 5.0).sqrt().floor() as usize).clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}
