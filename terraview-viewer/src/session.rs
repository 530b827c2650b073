//! Viewer session state and pointer interaction
//!
//! `ViewerSession` owns the loaded cloud, the derived elevation grid and
//! shading, and the two pointer tools. All pointer input arrives as screen
//! coordinates and is resolved here against the current transform, so the
//! shell only forwards raw events.

use terraview_algorithms::{
    default_grid_size, find_nearest_xy, ElevationGrid, HillshadeParams, MeasureTool, Measurement,
    PolygonPick, PolygonSelector, MAX_GRID_SIZE, MIN_GRID_SIZE,
};
use terraview_core::{Bounds, Error, Point2f, Point3f, PointCloud, Result, ViewTransform, ViewportRect};
use tracing::{debug, info};

use crate::render::RenderBackend;

/// Which tool pointer clicks are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No tool active; clicks only report the point under the cursor.
    #[default]
    Navigate,
    /// Clicks append polygon vertices.
    PolygonSelect,
    /// Clicks commit measurement endpoints.
    Measure,
}

/// What a pointer click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// No point within the acceptance radius.
    Missed,
    /// A point was hit but no tool was active.
    Hit(usize),
    /// The click fed the polygon selector.
    Polygon(PolygonPick),
    /// First measurement endpoint committed, waiting for the second.
    MeasurePending,
    /// Second endpoint committed; the measurement is complete.
    Measured(Measurement),
}

/// The whole interactive state of one viewer instance.
#[derive(Debug, Default)]
pub struct ViewerSession {
    cloud: Option<PointCloud>,
    grid: Option<ElevationGrid>,
    lighting: HillshadeParams,
    polygon: PolygonSelector,
    measure: MeasureTool,
    mode: InteractionMode,
    point_size: f32,
    grid_size: usize,
    last_measurement: Option<Measurement>,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a point cloud from XYZ text, replacing any previous cloud.
    ///
    /// The grid size and point size are re-derived from the new cloud's
    /// density and both tools are reset. On a parse failure the previous
    /// state is left untouched.
    pub fn load_points_text(&mut self, text: &str) -> Result<usize> {
        let points = terraview_io::parse_xyz(text)?;
        let cloud = PointCloud::from_points(points)?;
        let count = cloud.len();

        self.grid_size = default_grid_size(count);
        self.point_size = auto_point_size(count);
        self.cloud = Some(cloud);
        self.polygon = PolygonSelector::new();
        self.measure = MeasureTool::new();
        self.mode = InteractionMode::Navigate;
        self.last_measurement = None;
        self.rebuild_grid();

        info!(count, grid_size = self.grid_size, "loaded point cloud");
        Ok(count)
    }

    /// Drop the cloud, grid, and all tool state.
    pub fn clear(&mut self) {
        *self = Self {
            lighting: self.lighting,
            ..Self::default()
        };
    }

    pub fn cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn grid(&self) -> Option<&ElevationGrid> {
        self.grid.as_ref()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn lighting(&self) -> &HillshadeParams {
        &self.lighting
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn polygon(&self) -> &PolygonSelector {
        &self.polygon
    }

    pub fn measure(&self) -> &MeasureTool {
        &self.measure
    }

    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.last_measurement.as_ref()
    }

    /// Change the lighting and re-shade the cloud against the current grid.
    pub fn set_lighting(&mut self, lighting: HillshadeParams) {
        self.lighting = lighting;
        self.reshade();
    }

    /// Change the grid resolution (clamped) and rebuild grid and shading.
    pub fn set_grid_size(&mut self, size: usize) {
        self.grid_size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.rebuild_grid();
    }

    /// Set the point size, clamped to a range that tightens with density.
    pub fn set_point_size(&mut self, size: f32) {
        let count = self.cloud.as_ref().map_or(0, |c| c.len());
        self.point_size = clamp_point_size(size, count);
    }

    /// Activate polygon selection, cancelling any measurement in progress.
    pub fn start_polygon_selection(&mut self) {
        self.measure.cancel();
        self.last_measurement = None;
        self.polygon.start();
        self.mode = InteractionMode::PolygonSelect;
    }

    /// Activate measurement, discarding any polygon selection.
    pub fn start_measurement(&mut self) {
        self.polygon.clear();
        self.measure.start();
        self.mode = InteractionMode::Measure;
    }

    /// Deactivate the current tool, leaving a closed polygon in place.
    pub fn stop_tool(&mut self) {
        if self.mode == InteractionMode::Measure {
            self.measure.cancel();
        }
        self.mode = InteractionMode::Navigate;
    }

    /// Remove the polygon selection without touching the measurement tool.
    pub fn clear_polygon(&mut self) {
        self.polygon.clear();
        if self.mode == InteractionMode::PolygonSelect {
            self.mode = InteractionMode::Navigate;
        }
    }

    /// Resolve a pointer position to the nearest cloud point, if one lies
    /// within the acceptance radius around the cursor.
    pub fn pick(&self, screen: &Point2f, viewport: &ViewportRect) -> Option<usize> {
        let cloud = self.cloud.as_ref()?;
        let transform = ViewTransform::from_bounds(cloud.bounds());
        let data = transform.screen_to_data(screen, viewport);
        let (index, dist) = find_nearest_xy(cloud.points(), data.x, data.y)?;
        if dist <= self.acceptance_radius(cloud.bounds(), viewport) {
            Some(index)
        } else {
            None
        }
    }

    /// Pointer-move handler. Keeps the measurement hover highlight on the
    /// point that a click would snap to.
    pub fn hover(&mut self, screen: &Point2f, viewport: &ViewportRect) -> Option<usize> {
        let hit = self.pick(screen, viewport);
        if self.mode == InteractionMode::Measure && self.measure.is_measuring() {
            let point = hit.and_then(|i| self.cloud.as_ref().map(|c| c.points()[i]));
            self.measure.update_highlight(point);
        }
        hit
    }

    /// Pointer-click handler. Routes the snapped point to the active tool.
    pub fn click(&mut self, screen: &Point2f, viewport: &ViewportRect) -> ClickOutcome {
        let Some(index) = self.pick(screen, viewport) else {
            return ClickOutcome::Missed;
        };
        let point = self.cloud.as_ref().map(|c| c.points()[index]);
        let Some(point) = point else {
            return ClickOutcome::Missed;
        };

        match self.mode {
            InteractionMode::Navigate => ClickOutcome::Hit(index),
            InteractionMode::PolygonSelect => {
                let pick = self.polygon.pick(point);
                debug!(?pick, "polygon pick");
                ClickOutcome::Polygon(pick)
            }
            InteractionMode::Measure => match self.measure.pick(point) {
                Some(measurement) => {
                    self.measure.update_highlight(None);
                    self.last_measurement = Some(measurement);
                    debug!(distance = measurement.distance, "measurement complete");
                    ClickOutcome::Measured(measurement)
                }
                None if self.measure.picks().len() == 1 => ClickOutcome::MeasurePending,
                None => ClickOutcome::Missed,
            },
        }
    }

    /// Undo the last pick of the active tool.
    pub fn undo(&mut self) -> Option<Point3f> {
        match self.mode {
            InteractionMode::Navigate => None,
            InteractionMode::PolygonSelect => self.polygon.undo(),
            InteractionMode::Measure => {
                let removed = self.measure.undo();
                if removed.is_some() {
                    self.last_measurement = None;
                }
                removed
            }
        }
    }

    /// Close the polygon under construction.
    pub fn close_polygon(&mut self) -> Result<()> {
        self.polygon.close()
    }

    /// Indices of cloud points inside the closed polygon.
    pub fn points_inside_polygon(&self) -> Vec<usize> {
        let Some(cloud) = &self.cloud else {
            return Vec::new();
        };
        cloud
            .points()
            .iter()
            .enumerate()
            .filter(|(_, p)| self.polygon.contains(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Save the polygon selection as an XY ring file.
    pub fn save_polygon<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        terraview_io::write_polygon_xy_file(self.polygon.vertices(), path)
    }

    /// Load an XY polygon file, snapping its vertices to the current cloud.
    pub fn load_polygon<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<()> {
        let cloud = self.cloud.as_ref().ok_or(Error::EmptyPointCloud)?;
        let vertices = terraview_io::read_polygon_xy(path, cloud.points())?;
        self.measure.cancel();
        self.last_measurement = None;
        self.polygon.load_external(vertices)?;
        self.mode = InteractionMode::Navigate;
        Ok(())
    }

    /// Export the points inside the closed polygon as an XYZ file.
    pub fn export_selection<P: AsRef<std::path::Path>>(&self, path: P) -> Result<usize> {
        let cloud = self.cloud.as_ref().ok_or(Error::EmptyPointCloud)?;
        let selected: Vec<Point3f> = self
            .points_inside_polygon()
            .into_iter()
            .map(|i| cloud.points()[i])
            .collect();
        if selected.is_empty() {
            return Err(Error::EmptyPointCloud);
        }
        terraview_io::write_xyz_file(&selected, path)?;
        Ok(selected.len())
    }

    /// Push the current frame through a render backend.
    pub fn render(&self, backend: &mut dyn RenderBackend) {
        let Some(cloud) = &self.cloud else {
            return;
        };
        let transform = ViewTransform::from_bounds(cloud.bounds());
        backend.set_transform(&transform);
        backend.upload_points(cloud.points(), cloud.shading(), self.point_size);
        if self.polygon.has_selection() {
            backend.draw_polygon(self.polygon.vertices(), self.polygon.is_closed());
        }
        if !self.measure.picks().is_empty() || self.measure.highlighted().is_some() {
            backend.draw_measurement(self.measure.picks(), self.measure.highlighted());
        }
    }

    /// Screen-size-aware pick radius: twice the point size, converted from
    /// pixels to data units.
    fn acceptance_radius(&self, bounds: &Bounds, viewport: &ViewportRect) -> f32 {
        2.0 * self.point_size / viewport.pixels_per_data_unit(bounds)
    }

    fn rebuild_grid(&mut self) {
        let Some(cloud) = &self.cloud else {
            self.grid = None;
            return;
        };
        let mut grid = ElevationGrid::build(cloud.points(), cloud.bounds(), self.grid_size);
        grid.fill_gaps();
        self.grid = Some(grid);
        self.reshade();
    }

    fn reshade(&mut self) {
        let (Some(cloud), Some(grid)) = (&mut self.cloud, &self.grid) else {
            return;
        };
        let shading = self.lighting.shade_points(grid, cloud.points());
        cloud.set_shading(shading);
    }
}

/// Default point size for a freshly loaded cloud, stepped down as the
/// point count grows.
fn auto_point_size(count: usize) -> f32 {
    match count {
        n if n > 2_000_000 => 0.3,
        n if n > 1_000_000 => 0.4,
        n if n > 500_000 => 0.5,
        n if n > 100_000 => 0.7,
        n if n > 10_000 => 1.0,
        _ => 1.5,
    }
}

/// Clamp a user-chosen point size. Dense clouds get a tighter range so a
/// large size cannot turn the view into a solid blob.
fn clamp_point_size(size: f32, count: usize) -> f32 {
    let (min, max) = if count > 1_000_000 {
        (0.1, 2.0)
    } else if count > 100_000 {
        (0.2, 3.0)
    } else {
        (0.3, 5.0)
    };
    size.clamp(min, max)
}
