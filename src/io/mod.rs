//! Input/output helpers.
//!
//! - table ingest + validation (`ingest`)
//! - trend JSON export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
