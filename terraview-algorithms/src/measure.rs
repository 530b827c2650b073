//! Two-point distance measurement session

use terraview_core::{planar_distance, Point3f};

/// A completed two-point measurement: planar distance plus both endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub distance: f32,
    pub endpoints: [Point3f; 2],
}

/// Manages a pick session of up to two points and reports their planar
/// distance. The z coordinate never enters the distance.
#[derive(Debug, Clone, Default)]
pub struct MeasureTool {
    measuring: bool,
    picks: Vec<Point3f>,
    highlighted: Option<Point3f>,
}

impl MeasureTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_measuring(&self) -> bool {
        self.measuring
    }

    /// Committed picks, at most two.
    pub fn picks(&self) -> &[Point3f] {
        &self.picks
    }

    /// Transient hover candidate, not yet committed.
    pub fn highlighted(&self) -> Option<&Point3f> {
        self.highlighted.as_ref()
    }

    /// Enter measuring mode with a clean session.
    pub fn start(&mut self) {
        self.measuring = true;
        self.picks.clear();
        self.highlighted = None;
    }

    /// Commit a picked point.
    ///
    /// Ignored outside measuring mode or once two points are committed; the
    /// session stays at two picks until `undo` or `cancel`. Returns the
    /// measurement when the second point lands.
    pub fn pick(&mut self, point: Point3f) -> Option<Measurement> {
        if !self.measuring || self.picks.len() >= 2 {
            return None;
        }
        self.picks.push(point);
        if self.picks.len() == 2 {
            let endpoints = [self.picks[0], self.picks[1]];
            return Some(Measurement {
                distance: planar_distance(&endpoints[0], &endpoints[1]),
                endpoints,
            });
        }
        None
    }

    /// Pop the most recent pick, if any.
    pub fn undo(&mut self) -> Option<Point3f> {
        self.picks.pop()
    }

    /// Leave measuring mode, clearing picks and the highlight.
    pub fn cancel(&mut self) {
        self.measuring = false;
        self.picks.clear();
        self.highlighted = None;
    }

    /// Update the transient hover candidate; committed picks are untouched.
    pub fn update_highlight(&mut self, point: Option<Point3f>) {
        self.highlighted = point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32, z: f32) -> Point3f {
        Point3f::new(x, y, z)
    }

    #[test]
    fn test_three_four_five_distance() {
        let mut tool = MeasureTool::new();
        tool.start();
        assert!(tool.pick(p(0.0, 0.0, 17.0)).is_none());
        let measurement = tool.pick(p(3.0, 4.0, -2.0)).unwrap();
        assert_relative_eq!(measurement.distance, 5.0);
        assert_eq!(measurement.endpoints[0], p(0.0, 0.0, 17.0));
        assert_eq!(measurement.endpoints[1], p(3.0, 4.0, -2.0));
    }

    #[test]
    fn test_third_pick_is_ignored() {
        let mut tool = MeasureTool::new();
        tool.start();
        tool.pick(p(0.0, 0.0, 0.0));
        tool.pick(p(1.0, 0.0, 0.0));
        assert!(tool.pick(p(2.0, 0.0, 0.0)).is_none());
        assert_eq!(tool.picks().len(), 2);
    }

    #[test]
    fn test_pick_ignored_when_idle() {
        let mut tool = MeasureTool::new();
        assert!(tool.pick(p(0.0, 0.0, 0.0)).is_none());
        assert!(tool.picks().is_empty());
    }

    #[test]
    fn test_undo_reopens_session() {
        let mut tool = MeasureTool::new();
        tool.start();
        tool.pick(p(0.0, 0.0, 0.0));
        tool.pick(p(1.0, 0.0, 0.0));
        assert_eq!(tool.undo(), Some(p(1.0, 0.0, 0.0)));
        // Session accepts a replacement second point and re-emits.
        let measurement = tool.pick(p(0.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(measurement.distance, 2.0);
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut tool = MeasureTool::new();
        tool.start();
        tool.pick(p(0.0, 0.0, 0.0));
        tool.update_highlight(Some(p(5.0, 5.0, 0.0)));
        tool.cancel();
        assert!(!tool.is_measuring());
        assert!(tool.picks().is_empty());
        assert!(tool.highlighted().is_none());
    }

    #[test]
    fn test_highlight_does_not_commit() {
        let mut tool = MeasureTool::new();
        tool.start();
        tool.update_highlight(Some(p(1.0, 1.0, 0.0)));
        assert!(tool.picks().is_empty());
        tool.update_highlight(None);
        assert!(tool.highlighted().is_none());
    }
}
