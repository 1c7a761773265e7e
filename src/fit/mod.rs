//! Exponential trend fitting.
//!
//! Responsibilities:
//!
//! - validate a series for a log-scale fit (y strictly positive)
//! - solve the log-linear least-squares problem
//! - derive doubling time and annual percentage increase from the slope

pub mod trend;

pub use trend::*;
