//! Trend JSON export.
//!
//! The export is the "portable" representation of one dataset's fit:
//! slope/intercept plus the derived doubling-time and annual-increase
//! quantities, so downstream scripts don't have to re-derive them.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DatasetDef, LoadedSeries, TimeUnit};
use crate::error::AppError;
use crate::fit::TrendFit;

/// Schema of the per-dataset trend JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub dataset: String,
    pub title: String,
    pub n_points: usize,
    pub slope: f64,
    pub intercept: f64,
    pub time_unit: TimeUnit,
    pub doubling_time: f64,
    pub doubling_unit: String,
    pub annual_increase_pct: f64,
}

/// Write a dataset's trend JSON file.
pub fn write_trend_json(
    path: &Path,
    def: &DatasetDef,
    series: &LoadedSeries,
    fit: &TrendFit,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create trend JSON '{}': {e}", path.display()),
        )
    })?;

    let trend = TrendFile {
        tool: "trends".to_string(),
        dataset: def.prefix.to_string(),
        title: def.title.to_string(),
        n_points: series.len(),
        slope: fit.slope,
        intercept: fit.intercept,
        time_unit: def.time_unit,
        doubling_time: fit.doubling_time(def.time_unit),
        doubling_unit: def.time_unit.doubling_unit_label().to_string(),
        annual_increase_pct: fit.annual_increase_pct(def.time_unit),
    };

    serde_json::to_writer_pretty(file, &trend)
        .map_err(|e| AppError::new(2, format!("Failed to write trend JSON: {e}")))?;

    Ok(())
}
