//! Core data structures for terraview
//!
//! This crate provides the fundamental types shared by the viewer engine:
//! points, bounds, the shaded point cloud, the data/device coordinate
//! transform, and the common error type.

pub mod bounds;
pub mod cloud;
pub mod error;
pub mod point;
pub mod transform;

pub use bounds::*;
pub use cloud::*;
pub use error::*;
pub use point::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3};
