//! Flat text I/O for terraview
//!
//! Two formats, both line-oriented and whitespace-separated:
//! - `.xyz` point clouds: one `x y z` sample per line
//! - `.xy` polygons: one `x y` vertex per line, ring closed by repeating
//!   the first vertex
//!
//! Parsing is lenient per line and strict per file: malformed lines are
//! skipped, but a load that yields nothing fails and leaves prior state to
//! the caller untouched.

pub mod xy;
pub mod xyz;

pub use xy::*;
pub use xyz::*;
