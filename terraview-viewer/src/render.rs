//! Render backend seam
//!
//! The session does not draw anything itself. Each frame it hands a
//! backend the current view transform, the shaded point positions, and
//! the active tool overlays, and the backend turns those into pixels.

use terraview_core::{Point3f, ViewTransform};

/// Drawing surface the viewer session renders through.
///
/// `set_transform` is called once per frame before any draw call.
/// Implementations are expected to map data coordinates to the device
/// square with the supplied transform.
pub trait RenderBackend {
    /// Install the data-to-device transform for this frame.
    fn set_transform(&mut self, transform: &ViewTransform);

    /// Upload the shaded point cloud. `shading` is aligned with `points`
    /// and holds grayscale intensities in `[0, 1]`.
    fn upload_points(&mut self, points: &[Point3f], shading: &[f32], point_size: f32);

    /// Draw the polygon selection overlay. `closed` selects outline vs
    /// filled-ring styling.
    fn draw_polygon(&mut self, vertices: &[Point3f], closed: bool);

    /// Draw the measurement overlay: committed pick markers plus an
    /// optional hover highlight.
    fn draw_measurement(&mut self, picks: &[Point3f], highlighted: Option<&Point3f>);
}

/// Backend that records draw calls instead of drawing, for tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub transform: Option<ViewTransform>,
    pub points: Vec<Point3f>,
    pub shading: Vec<f32>,
    pub point_size: f32,
    pub polygon: Option<(Vec<Point3f>, bool)>,
    pub measurement: Option<(Vec<Point3f>, Option<Point3f>)>,
}

impl RenderBackend for RecordingBackend {
    fn set_transform(&mut self, transform: &ViewTransform) {
        self.transform = Some(*transform);
    }

    fn upload_points(&mut self, points: &[Point3f], shading: &[f32], point_size: f32) {
        self.points = points.to_vec();
        self.shading = shading.to_vec();
        self.point_size = point_size;
    }

    fn draw_polygon(&mut self, vertices: &[Point3f], closed: bool) {
        self.polygon = Some((vertices.to_vec(), closed));
    }

    fn draw_measurement(&mut self, picks: &[Point3f], highlighted: Option<&Point3f>) {
        self.measurement = Some((picks.to_vec(), highlighted.copied()));
    }
}
