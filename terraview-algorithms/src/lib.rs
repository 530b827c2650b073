//! # terraview algorithms
//!
//! The algorithmic engine behind the viewer: elevation-grid construction and
//! gap filling, Horn hillshading, nearest-point queries for pointer picking,
//! polygon selection geometry, and two-point distance measurement.

pub mod elevation;
pub mod hillshade;
pub mod measure;
pub mod nearest;
pub mod polygon;

// Re-export commonly used items
pub use elevation::*;
pub use hillshade::*;
pub use measure::*;
pub use nearest::*;
pub use polygon::*;
