//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - walks the fixed dataset catalog, strictly sequentially
//! - runs load -> fit -> report -> render -> export for each dataset
//!
//! The run takes no flags or environment configuration: invoking the binary
//! processes the whole catalog. The first unhandled error aborts the run and
//! becomes the process exit code.

use std::fs;
use std::path::Path;

use crate::chart::{self, ImageFormat};
use crate::domain::{catalog, DatasetDef, LoadedSeries};
use crate::error::AppError;
use crate::fit::{self, TrendFit};
use crate::io::{export, ingest};
use crate::report;

/// Base directory holding `<prefix>/<prefix>.csv` per dataset.
pub const DATA_DIR: &str = "data";
/// Output directory for images and trend JSON files.
pub const OUTPUT_DIR: &str = "graphs";

/// Entry point for the `trends` binary.
pub fn run() -> Result<(), AppError> {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();

    let data_dir = Path::new(DATA_DIR);
    let out_dir = Path::new(OUTPUT_DIR);

    for def in &catalog() {
        process_dataset(def, data_dir, out_dir)?;
    }
    Ok(())
}

/// Load and fit one dataset without rendering.
pub fn analyze_dataset(
    def: &DatasetDef,
    data_dir: &Path,
) -> Result<(LoadedSeries, TrendFit), AppError> {
    let series = ingest::load_series(def, data_dir)?;
    let fit = fit::fit_log_trend(&series)?;
    Ok((series, fit))
}

/// Run the full pipeline for one dataset: load, fit, render each output
/// format, and write the trend JSON.
pub fn process_dataset(
    def: &DatasetDef,
    data_dir: &Path,
    out_dir: &Path,
) -> Result<(), AppError> {
    let (series, fit) = analyze_dataset(def, data_dir)?;

    log::info!("{}", report::describe_trend(def, &fit));
    // The summary shares the log stream with the rest of the run output so
    // piped output stays ordered.
    for line in report::format_dataset_summary(def, &series, &fit).lines() {
        log::info!("{line}");
    }

    fs::create_dir_all(out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output directory '{}': {e}", out_dir.display()),
        )
    })?;

    for format in ImageFormat::ALL {
        let path = out_dir.join(format!("{}.{}", def.prefix, format.extension()));
        log::info!("Writing {}", path.display());
        chart::render_chart(def, &series, Some(&fit), &path, format)?;
    }

    let trend_path = out_dir.join(format!("{}-trend.json", def.prefix));
    log::info!("Writing {}", trend_path.display());
    export::write_trend_json(&trend_path, def, &series, &fit)?;

    Ok(())
}
