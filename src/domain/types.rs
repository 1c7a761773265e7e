//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - enumerated once in the static catalog
//! - used in-memory during loading, fitting, and rendering
//! - exported to JSON alongside fit results

use serde::{Deserialize, Serialize};

/// How the y series is derived from the raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YDerivation {
    /// Use the declared y column as-is.
    Column,
    /// Element-wise ratio of two raw columns (e.g. `size_mb / cost_usd`).
    Ratio {
        numerator: &'static str,
        denominator: &'static str,
    },
}

/// Unit of the x axis after the dataset's `x_divisor` is applied.
///
/// This drives both the doubling-time formula and the scaling of the annual
/// percentage increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeUnit {
    /// x is in calendar years; doubling time is reported in months.
    Years,
    /// x is in millions of years; doubling time is reported in million years.
    MillionYears,
}

impl TimeUnit {
    /// Unit label for the doubling-time quantity.
    pub fn doubling_unit_label(self) -> &'static str {
        match self {
            TimeUnit::Years => "months",
            TimeUnit::MillionYears => "million years",
        }
    }
}

/// A fixed annotation drawn on top of the base chart.
///
/// Decorations are dataset-specific extras (e.g. marking a historical era
/// with a horizontal bar and a caption) and are applied after the generic
/// scatter/trend render completes.
#[derive(Debug, Clone, Copy)]
pub struct Decoration {
    /// Horizontal bar from `x_span.0` to `x_span.1` at height `y`.
    pub x_span: (f64, f64),
    pub y: f64,
    pub label: &'static str,
    /// Center position of the caption, in data coordinates.
    pub label_at: (f64, f64),
}

/// Static metadata for one dataset in the catalog.
///
/// Per-dataset behavior (ratio-derived y columns, alternate time units,
/// extra annotations) is expressed here as plain data consumed by one
/// generic loader/fitter/renderer.
#[derive(Debug, Clone)]
pub struct DatasetDef {
    /// Unique identifier; also the data subdirectory and output file stem.
    pub prefix: &'static str,
    pub title: &'static str,

    pub x_column: &'static str,
    pub x_label: &'static str,
    pub y_column: &'static str,
    pub y_label: &'static str,
    /// Optional column holding per-point text labels.
    pub label_column: Option<&'static str>,

    /// Fixed axis limits; `None` means autoscale from the data.
    pub x_lim: Option<(f64, f64)>,
    pub y_lim: Option<(f64, f64)>,

    pub y_derivation: YDerivation,
    /// Raw x values are divided by this (e.g. `1e6` for million-year series).
    pub x_divisor: f64,
    pub time_unit: TimeUnit,

    /// Decimal places for the "+N% per year" chart annotation.
    pub annual_precision: usize,

    pub decorations: &'static [Decoration],
}

impl Default for DatasetDef {
    fn default() -> Self {
        Self {
            prefix: "",
            title: "",
            x_column: "year",
            x_label: "Year",
            y_column: "",
            y_label: "",
            label_column: None,
            x_lim: None,
            y_lim: None,
            y_derivation: YDerivation::Column,
            x_divisor: 1.0,
            time_unit: TimeUnit::Years,
            annual_precision: 0,
            decorations: &[],
        }
    }
}

/// An ordered series of (x, y) observations with optional parallel labels.
///
/// Invariants (enforced by the loader):
/// - `x` and `y` have equal length
/// - `labels`, when present, has the same length as `x`
#[derive(Debug, Clone, Default)]
pub struct LoadedSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub labels: Option<Vec<String>>,
}

impl LoadedSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Observed x range, or `None` for an empty series.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        minmax(&self.x)
    }

    /// Observed y range, or `None` for an empty series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        minmax(&self.y)
    }
}

fn minmax(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}
