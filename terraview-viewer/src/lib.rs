//! Interactive viewer session for terraview
//!
//! This crate ties the engine together: it owns the loaded cloud and its
//! derived grid and shading, routes pointer input to the polygon and
//! measurement tools, and pushes frames through a pluggable render
//! backend. Everything here is synchronous and single-threaded; callers
//! drive it from their own event loop.

pub mod render;
pub mod session;

pub use render::*;
pub use session::*;
