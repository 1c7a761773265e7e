//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - static per-dataset metadata (`DatasetDef`, `YDerivation`, `Decoration`)
//! - time-unit handling for the trend quantities (`TimeUnit`)
//! - the normalized observation series (`LoadedSeries`)
//! - the hand-curated dataset catalog (`catalog`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
