//! `tech-trends` library crate.
//!
//! The binary (`trends`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future report generators, notebooks, etc.)
//! - code stays easy to navigate as the dataset catalog grows

pub mod app;
pub mod chart;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod report;
