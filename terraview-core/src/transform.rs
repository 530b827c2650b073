//! Data-space to device-space coordinate transform
//!
//! The renderer works in a normalized `[-1, 1]` device square. The transform
//! is a pure function of the current bounds: a uniform scale that maps the
//! longer planar axis to 90% of the device range, plus a translation that
//! centers the data at the origin.

use crate::bounds::Bounds;
use crate::point::Point2f;
use serde::{Deserialize, Serialize};

/// Non-degenerate fallback scale for zero-extent bounds. The exact constant
/// carries no meaning beyond avoiding a division by zero downstream.
const FALLBACK_SCALE: f32 = 0.01;

/// Fraction of the device range the longer data axis spans (1.8 of 2.0).
const DEVICE_SPAN: f32 = 1.8;

/// Uniform scale + translation between data space and device space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: [f32; 2],
    pub translation: [f32; 2],
}

impl ViewTransform {
    /// Derive the transform for the given bounds.
    ///
    /// Zero extent on either planar axis yields a fixed fallback transform
    /// instead of an error; degenerate bounds are a valid state.
    pub fn from_bounds(bounds: &Bounds) -> Self {
        if bounds.is_planar_degenerate() {
            return Self {
                scale: [FALLBACK_SCALE, FALLBACK_SCALE],
                translation: [0.0, 0.0],
            };
        }

        let scale = DEVICE_SPAN / bounds.width().max(bounds.height());
        let (cx, cy) = bounds.center();
        Self {
            scale: [scale, scale],
            translation: [-cx * scale, -cy * scale],
        }
    }

    /// Map a data-space point into the `[-1, 1]` device square.
    pub fn data_to_device(&self, p: &Point2f) -> Point2f {
        Point2f::new(
            p.x * self.scale[0] + self.translation[0],
            p.y * self.scale[1] + self.translation[1],
        )
    }

    /// Map a device-space point back into data space.
    pub fn device_to_data(&self, d: &Point2f) -> Point2f {
        Point2f::new(
            (d.x - self.translation[0]) / self.scale[0],
            (d.y - self.translation[1]) / self.scale[1],
        )
    }

    /// Map a screen-space (CSS pixel) point into data space via the
    /// viewport: normalize to `[0, 1]`, expand to `[-1, 1]` with the Y axis
    /// flipped, then invert the device transform.
    pub fn screen_to_data(&self, screen: &Point2f, viewport: &ViewportRect) -> Point2f {
        let nx = (screen.x - viewport.left) / viewport.width;
        let ny = (screen.y - viewport.top) / viewport.height;
        let device = Point2f::new(nx * 2.0 - 1.0, -(ny * 2.0 - 1.0));
        self.device_to_data(&device)
    }
}

/// The viewer's on-screen rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    /// Screen pixels per data unit along x, the scale pick-radius policies
    /// are expressed in. Returns infinity for zero-width bounds.
    pub fn pixels_per_data_unit(&self, bounds: &Bounds) -> f32 {
        self.width / bounds.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3f;
    use approx::assert_relative_eq;

    fn bounds(points: &[Point3f]) -> Bounds {
        Bounds::from_points(points).unwrap()
    }

    #[test]
    fn test_transform_centers_and_scales() {
        let b = bounds(&[
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(10.0, 4.0, 0.0),
        ]);
        let t = ViewTransform::from_bounds(&b);
        // Longer axis (x, 10 units) spans 1.8 device units.
        assert_relative_eq!(t.scale[0], 0.18);
        assert_relative_eq!(t.scale[1], 0.18);

        let center = t.data_to_device(&Point2f::new(5.0, 2.0));
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);

        let corner = t.data_to_device(&Point2f::new(10.0, 2.0));
        assert_relative_eq!(corner.x, 0.9);
    }

    #[test]
    fn test_transform_roundtrip() {
        let b = bounds(&[
            Point3f::new(-3.0, 1.0, 0.0),
            Point3f::new(7.0, 9.0, 0.0),
        ]);
        let t = ViewTransform::from_bounds(&b);
        let p = Point2f::new(2.5, 4.25);
        let back = t.device_to_data(&t.data_to_device(&p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_bounds_fallback() {
        let b = bounds(&[Point3f::new(2.0, 2.0, 0.0)]);
        let t = ViewTransform::from_bounds(&b);
        assert_eq!(t.scale, [FALLBACK_SCALE, FALLBACK_SCALE]);
        assert_eq!(t.translation, [0.0, 0.0]);
    }

    #[test]
    fn test_screen_to_data_flips_y() {
        let b = bounds(&[
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(10.0, 10.0, 0.0),
        ]);
        let t = ViewTransform::from_bounds(&b);
        let viewport = ViewportRect {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        };

        // Viewport center maps to the data center.
        let center = t.screen_to_data(&Point2f::new(50.0, 50.0), &viewport);
        assert_relative_eq!(center.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(center.y, 5.0, epsilon = 1e-5);

        // Screen y grows downward, data y grows upward.
        let above = t.screen_to_data(&Point2f::new(50.0, 10.0), &viewport);
        assert!(above.y > center.y);
    }
}
