//! Chart rendering.
//!
//! Responsibilities:
//!
//! - turn a loaded series (plus optional trend fit) into a styled
//!   log-scale scatter chart
//! - write the figure to PNG and SVG backends
//! - apply dataset decorations after the base render

pub mod render;

pub use render::*;
