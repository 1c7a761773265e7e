//! Reporting utilities: formatted trend summaries.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DatasetDef, LoadedSeries, TimeUnit};
use crate::fit::TrendFit;

/// Year range used for the growth prediction line.
pub const PREDICTION_RANGE: (f64, f64) = (2000.0, 2022.0);

/// The "double every N months" phrase for a dataset's fit.
pub fn doubling_text(def: &DatasetDef, fit: &TrendFit) -> String {
    let doubling = fit.doubling_time(def.time_unit);
    match def.time_unit {
        TimeUnit::Years => format!("double every {doubling:.0} months"),
        TimeUnit::MillionYears => format!("doubles every {doubling:.1} million years"),
    }
}

/// The "+N% per year" annotation, using the dataset's precision field.
pub fn annual_text(def: &DatasetDef, fit: &TrendFit) -> String {
    format!(
        "+{:.*}% per year",
        def.annual_precision,
        fit.annual_increase_pct(def.time_unit)
    )
}

/// One-line growth description, logged once per dataset.
pub fn describe_trend(def: &DatasetDef, fit: &TrendFit) -> String {
    format!(
        "{} increases by {:.2} percent each year",
        def.prefix,
        fit.annual_increase_pct(def.time_unit)
    )
}

/// Multiplicative growth factor between two x values under the fitted trend.
pub fn growth_between(fit: &TrendFit, x0: f64, x1: f64) -> f64 {
    fit.value_at(x1) / fit.value_at(x0)
}

/// Multi-line summary block, emitted line by line through the log facade.
pub fn format_dataset_summary(def: &DatasetDef, series: &LoadedSeries, fit: &TrendFit) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", def.title));
    out.push_str(&format!("Points: n={}", series.len()));
    if let (Some((x0, x1)), Some((y0, y1))) = (series.x_range(), series.y_range()) {
        out.push_str(&format!(" | x=[{x0:.2}, {x1:.2}] | y=[{y0:.3e}, {y1:.3e}]"));
    }
    out.push('\n');
    out.push_str(&format!(
        "Trend: slope={:.6} intercept={:.6}\n",
        fit.slope, fit.intercept
    ));
    out.push_str(&format!("- {}\n", doubling_text(def, fit)));
    out.push_str(&format!("- {}\n", annual_text(def, fit)));

    if def.time_unit == TimeUnit::Years {
        let (x0, x1) = PREDICTION_RANGE;
        out.push_str(&format!(
            "- increased {:.0}x between {:.0} and {:.0}\n",
            growth_between(fit, x0, x1),
            x0,
            x1
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_def() -> DatasetDef {
        DatasetDef {
            prefix: "transistor-counts",
            title: "CPU transistor counts",
            y_column: "transistors",
            ..Default::default()
        }
    }

    #[test]
    fn doubling_text_formats_per_unit() {
        let fit = TrendFit {
            slope: 1.0,
            intercept: 0.0,
        };
        assert_eq!(doubling_text(&year_def(), &fit), "double every 4 months");

        let cranial = DatasetDef {
            time_unit: TimeUnit::MillionYears,
            ..year_def()
        };
        assert_eq!(
            doubling_text(&cranial, &fit),
            "doubles every 0.3 million years"
        );
    }

    #[test]
    fn annual_text_uses_precision_field() {
        let fit = TrendFit {
            slope: 1.0,
            intercept: 0.0,
        };
        assert_eq!(annual_text(&year_def(), &fit), "+900% per year");

        let precise = DatasetDef {
            annual_precision: 5,
            time_unit: TimeUnit::MillionYears,
            ..year_def()
        };
        assert_eq!(annual_text(&precise, &fit), "+0.00090% per year");
    }

    #[test]
    fn growth_between_is_pure_slope_function() {
        let fit = TrendFit {
            slope: 0.1,
            intercept: 7.0,
        };
        let factor = growth_between(&fit, 2000.0, 2022.0);
        assert!((factor - 10f64.powf(0.1 * 22.0)).abs() < 1e-6);
    }

    #[test]
    fn summary_lines_stand_alone_as_log_records() {
        let fit = TrendFit {
            slope: 0.1,
            intercept: 0.0,
        };
        let series = LoadedSeries {
            x: vec![2000.0, 2010.0],
            y: vec![1.0, 10.0],
            labels: None,
        };
        let summary = format_dataset_summary(&year_def(), &series, &fit);
        assert!(summary.lines().count() >= 5);
        assert!(summary.lines().all(|l| !l.trim().is_empty()));
    }

    #[test]
    fn summary_includes_prediction_for_year_series_only() {
        let fit = TrendFit {
            slope: 0.1,
            intercept: 0.0,
        };
        let series = LoadedSeries {
            x: vec![2000.0, 2010.0],
            y: vec![1.0, 10.0],
            labels: None,
        };
        let summary = format_dataset_summary(&year_def(), &series, &fit);
        assert!(summary.contains("between 2000 and 2022"));

        let cranial = DatasetDef {
            time_unit: TimeUnit::MillionYears,
            ..year_def()
        };
        let summary = format_dataset_summary(&cranial, &series, &fit);
        assert!(!summary.contains("between"));
    }
}
