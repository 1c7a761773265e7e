//! Plotters-based chart renderer.
//!
//! One generic draw routine serves both file backends (PNG and SVG). Every
//! figure shares one style: log-scale y axis, red scatter markers with black
//! edges, a muted trend line drawn underneath, per-point text labels, a
//! top-left annual-increase annotation, and ticks only on the bottom/left.
//!
//! Rendering has no error recovery: an empty series or non-positive y fails
//! before any output file is created.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::domain::{DatasetDef, LoadedSeries};
use crate::error::AppError;
use crate::fit::TrendFit;
use crate::report;

/// Scatter marker fill.
pub const POINT_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
/// Trend line color (drawn at half opacity).
pub const TREND_COLOR: RGBColor = RGBColor(0x2c, 0x3e, 0x50);

/// Figure size in pixels (8x5 inches at 200 dpi).
const FIGURE_SIZE: (u32, u32) = (1600, 1000);
/// Point labels sit this many x-units right of their marker.
const LABEL_X_OFFSET: f64 = 0.6;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// All formats written by the batch driver, raster first.
    pub const ALL: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Svg];

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Render one dataset's chart to `path`.
///
/// When `trend` is given, the fitted exponential curve is overlaid across
/// the observed x-range and the annual-increase annotation is drawn in the
/// top-left corner.
pub fn render_chart(
    def: &DatasetDef,
    series: &LoadedSeries,
    trend: Option<&TrendFit>,
    path: &Path,
    format: ImageFormat,
) -> Result<(), AppError> {
    // Validate before touching the filesystem so a bad series never leaves
    // a blank or truncated image behind.
    if series.is_empty() {
        return Err(AppError::new(
            3,
            format!("Dataset '{}': cannot render an empty series.", def.prefix),
        ));
    }
    let x_range = x_axis_range(def, series);
    let y_range = y_axis_range(def, series)?;

    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_chart(&root, def, series, trend, x_range, y_range)?;
            root.present().map_err(draw_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_chart(&root, def, series, trend, x_range, y_range)?;
            root.present().map_err(draw_err)?;
        }
    }

    Ok(())
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    def: &DatasetDef,
    series: &LoadedSeries,
    trend: Option<&TrendFit>,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), AppError>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(draw_err)?;

    // Label areas only on the left/bottom; the top/right edges stay bare.
    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .set_label_area_size(LabelAreaPosition::Left, 110)
        .set_label_area_size(LabelAreaPosition::Bottom, 70)
        .build_cartesian_2d(x_range.0..x_range.1, (y_range.0..y_range.1).log_scale())
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(def.x_label)
        .y_desc(def.y_label)
        .x_label_formatter(&|v: &f64| format!("{v:.0}"))
        .y_label_formatter(&format_log_tick)
        .label_style(("sans-serif", 24))
        .axis_desc_style(("sans-serif", 32))
        .draw()
        .map_err(draw_err)?;

    // Trend line first so the scatter markers sit on top of it.
    if let Some(fit) = trend {
        let mut xs = series.x.clone();
        xs.sort_by(|a, b| a.total_cmp(b));
        chart
            .draw_series(LineSeries::new(
                xs.iter().map(|&x| (x, fit.value_at(x))),
                TREND_COLOR.mix(0.5).stroke_width(3),
            ))
            .map_err(draw_err)?;
    }

    let points = || series.x.iter().copied().zip(series.y.iter().copied());
    chart
        .draw_series(points().map(|p| Circle::new(p, 9, POINT_COLOR.filled())))
        .map_err(draw_err)?;
    chart
        .draw_series(points().map(|p| Circle::new(p, 9, BLACK.stroke_width(1))))
        .map_err(draw_err)?;

    if let Some(labels) = &series.labels {
        let style = ("sans-serif", 24)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(
                labels
                    .iter()
                    .zip(points())
                    .filter(|(label, _)| !label.is_empty())
                    .map(|(label, (x, y))| {
                        Text::new(label.clone(), (x + LABEL_X_OFFSET, y), style.clone())
                    }),
            )
            .map_err(draw_err)?;
    }

    if let Some(fit) = trend {
        let pos = axes_fraction(x_range, y_range, 0.05, 0.95);
        chart
            .draw_series(std::iter::once(Text::new(
                report::annual_text(def, fit),
                pos,
                ("sans-serif", 36).into_font().color(&BLACK),
            )))
            .map_err(draw_err)?;
    }

    // Dataset-specific decorations go on last, over everything else.
    for d in def.decorations {
        chart
            .draw_series(LineSeries::new(
                vec![(d.x_span.0, d.y), (d.x_span.1, d.y)],
                BLACK.stroke_width(4),
            ))
            .map_err(draw_err)?;
        let style = ("sans-serif", 26)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(std::iter::once(Text::new(d.label, d.label_at, style)))
            .map_err(draw_err)?;
    }

    Ok(())
}

/// X range: fixed limits if defined, else the data range with a small pad.
fn x_axis_range(def: &DatasetDef, series: &LoadedSeries) -> (f64, f64) {
    if let Some(lim) = def.x_lim {
        return lim;
    }
    let (min, max) = series.x_range().unwrap_or((0.0, 1.0));
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let pad = 0.02 * (max - min);
    (min - pad, max + pad)
}

/// Y range for the log axis: fixed limits if defined, else the data range
/// padded in log space. Non-positive values cannot be drawn on a log axis.
fn y_axis_range(def: &DatasetDef, series: &LoadedSeries) -> Result<(f64, f64), AppError> {
    let (min, max) = def.y_lim.unwrap_or_else(|| {
        series.y_range().unwrap_or((1.0, 10.0))
    });
    if min <= 0.0 {
        return Err(AppError::new(
            3,
            format!(
                "Dataset '{}': y range [{min}, {max}] is not positive; log axis requires y > 0.",
                def.prefix
            ),
        ));
    }
    if def.y_lim.is_some() {
        return Ok((min, max));
    }

    let (lmin, lmax) = (min.log10(), max.log10());
    if lmin == lmax {
        return Ok((10f64.powf(lmin - 0.3), 10f64.powf(lmax + 0.3)));
    }
    let pad = 0.05 * (lmax - lmin);
    Ok((10f64.powf(lmin - pad), 10f64.powf(lmax + pad)))
}

/// Map an axes-fraction position (0..1 each way) into data coordinates,
/// accounting for the logarithmic y axis.
fn axes_fraction(x_range: (f64, f64), y_range: (f64, f64), fx: f64, fy: f64) -> (f64, f64) {
    let x = x_range.0 + fx * (x_range.1 - x_range.0);
    let (ly0, ly1) = (y_range.0.log10(), y_range.1.log10());
    let y = 10f64.powf(ly0 + fy * (ly1 - ly0));
    (x, y)
}

/// Tick labels for the log axis: plain numbers near 1, `1eN` elsewhere.
fn format_log_tick(v: &f64) -> String {
    let v = *v;
    if v <= 0.0 {
        return String::new();
    }
    let exp = v.log10();
    if (exp - exp.round()).abs() < 1e-9 {
        let e = exp.round() as i32;
        if (0..=3).contains(&e) {
            return format!("{v:.0}");
        }
        return format!("1e{e}");
    }
    if (1.0..10_000.0).contains(&v) {
        format!("{v:.0}")
    } else {
        format!("{v:.1e}")
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::new(4, format!("Chart drawing failed: {e}"))
}
