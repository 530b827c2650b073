//! Interactive polygon selection: vertex picking, containment and area

use serde::{Deserialize, Serialize};
use terraview_core::{same_planar_point, Error, Point3f, Result};

/// Lifecycle of a polygon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting,
    Closed,
}

/// Outcome of feeding a picked point to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonPick {
    /// The point became a new vertex.
    Appended,
    /// The point matched an existing vertex and was dropped.
    AlreadySelected,
    /// The point matched the first vertex and closed the polygon.
    Closed,
    /// The selector is not in the Selecting state.
    Ignored,
}

/// Manages the interactive vertex list of a polygonal region selection.
///
/// Vertices are stored in pick order without an implicit closing vertex;
/// closure is a state, not a stored point. A polygon in the `Closed` state
/// always has at least 3 vertices.
#[derive(Debug, Clone, Default)]
pub struct PolygonSelector {
    vertices: Vec<Point3f>,
    state: SelectionState,
}

impl PolygonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        self.state == SelectionState::Selecting
    }

    pub fn is_closed(&self) -> bool {
        self.state == SelectionState::Closed
    }

    /// True while any vertices exist, open or closed.
    pub fn has_selection(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Point3f] {
        &self.vertices
    }

    /// Begin a fresh selection, discarding any previous vertices.
    pub fn start(&mut self) {
        self.vertices.clear();
        self.state = SelectionState::Selecting;
    }

    /// Feed a picked point while selecting.
    ///
    /// Re-picking the first vertex once 3 or more exist closes the polygon
    /// without appending a duplicate; picking any other existing vertex is
    /// dropped; anything else is appended.
    pub fn pick(&mut self, point: Point3f) -> PolygonPick {
        if !self.is_selecting() {
            return PolygonPick::Ignored;
        }
        if self.vertices.len() >= 3 && same_planar_point(&point, &self.vertices[0]) {
            self.state = SelectionState::Closed;
            return PolygonPick::Closed;
        }
        if self
            .vertices
            .iter()
            .any(|v| same_planar_point(v, &point))
        {
            return PolygonPick::AlreadySelected;
        }
        self.vertices.push(point);
        PolygonPick::Appended
    }

    /// Pop the most recent vertex; legal only while selecting.
    pub fn undo(&mut self) -> Option<Point3f> {
        if self.is_selecting() {
            self.vertices.pop()
        } else {
            None
        }
    }

    /// Explicitly close the polygon, e.g. from a commit key.
    ///
    /// Fails without a state change when fewer than 3 vertices exist.
    pub fn close(&mut self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(Error::InsufficientPolygonVertices {
                got: self.vertices.len(),
            });
        }
        self.state = SelectionState::Closed;
        Ok(())
    }

    /// Abandon the selection, clearing vertices and returning to Idle.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.state = SelectionState::Idle;
    }

    /// Replace the selection with an externally loaded vertex list,
    /// bypassing interactive picking. Fails with state unchanged when fewer
    /// than 3 vertices are given.
    pub fn load_external(&mut self, vertices: Vec<Point3f>) -> Result<()> {
        if vertices.len() < 3 {
            return Err(Error::InsufficientPolygonVertices {
                got: vertices.len(),
            });
        }
        self.vertices = vertices;
        self.state = SelectionState::Closed;
        Ok(())
    }

    /// Shoelace area of the current vertex list.
    ///
    /// Defined when the polygon is closed or at least 3 vertices exist.
    pub fn area(&self) -> Option<f32> {
        if !self.is_closed() && self.vertices.len() < 3 {
            return None;
        }
        Some(shoelace_area(&self.vertices))
    }

    /// Containment of a point against the current vertex list.
    pub fn contains(&self, point: &Point3f) -> bool {
        point_in_polygon(point, &self.vertices)
    }
}

/// Unsigned shoelace area over consecutive vertex pairs, wrapping around.
pub fn shoelace_area(vertices: &[Point3f]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        sum += vertices[j].x * vertices[i].y - vertices[i].x * vertices[j].y;
        j = i;
    }
    (sum / 2.0).abs()
}

/// Ray-casting parity test with a horizontal-edge membership rule.
///
/// A point lying exactly on a horizontal edge (`point.y == edge.y1 ==
/// edge.y2`, x within the edge's endpoints inclusive) is reported as
/// contained before the parity test runs. The comparison is exact float
/// equality, preserved from the original behavior; introducing a tolerance
/// here would be an observable change.
pub fn point_in_polygon(point: &Point3f, vertices: &[Point3f]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);

        let on_horizontal_edge =
            y == yi && y == yj && ((x >= xi && x <= xj) || (x >= xj && x <= xi));
        if on_horizontal_edge {
            return true;
        }

        if ((yi > y) != (yj > y)) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
