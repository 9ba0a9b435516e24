//! SVG rendering of the Mikhailov and Nyquist curves.

use anyhow::{Context, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use stabil_core::frequency::FrequencyCurve;
use std::ops::Range;
use std::path::Path;

const CURVE_COLOR: RGBColor = RGBColor(128, 0, 128);
const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);
const IMAGE_SIZE: (u32, u32) = (800, 800);

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Axis ranges for a plot, padded and forced to contain `anchors`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotBounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

pub fn plot_bounds(points: &[(f64, f64)], anchors: &[(f64, f64)]) -> PlotBounds {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points.iter().chain(anchors) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !x_min.is_finite() {
        return PlotBounds {
            x: -1.0..1.0,
            y: -1.0..1.0,
        };
    }
    PlotBounds {
        x: padded(x_min, x_max),
        y: padded(y_min, y_max),
    }
}

fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (min - pad)..(max + pad)
}

/// Characteristic polynomial curve with reference lines along both axes.
pub fn render_mikhailov(curve: &FrequencyCurve, path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = curve.xy().collect();
    let bounds = plot_bounds(&points, &[(0.0, 0.0)]);

    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Mikhailov curve D(jω) of the closed loop", ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x.clone(), bounds.y.clone())?;
    chart
        .configure_mesh()
        .light_line_style(GRID_COLOR.mix(0.5))
        .x_desc("Re(D(jω))")
        .y_desc("Im(D(jω))")
        .draw()?;

    chart
        .draw_series(LineSeries::new(points, CURVE_COLOR.stroke_width(2)))?
        .label("Mikhailov curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURVE_COLOR.stroke_width(2)));
    draw_axes(&mut chart, &bounds)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), points = curve.points.len(), "rendered Mikhailov curve");
    Ok(())
}

/// Open-loop frequency response with the critical point `(-1, j0)` marked.
pub fn render_nyquist(curve: &FrequencyCurve, path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = curve.xy().collect();
    let bounds = plot_bounds(&points, &[(0.0, 0.0), (-1.0, 0.0)]);

    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Nyquist curve W_open(jω)", ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x.clone(), bounds.y.clone())?;
    chart
        .configure_mesh()
        .light_line_style(GRID_COLOR.mix(0.5))
        .x_desc("Re(W(jω))")
        .y_desc("Im(W(jω))")
        .draw()?;

    chart
        .draw_series(LineSeries::new(points, CURVE_COLOR.stroke_width(2)))?
        .label("Nyquist curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURVE_COLOR.stroke_width(2)));
    draw_axes(&mut chart, &bounds)?;
    chart
        .draw_series(std::iter::once(Circle::new((-1.0, 0.0), 5, RED.filled())))?
        .label("Point (-1, j0)")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        points = curve.points.len(),
        discarded = curve.discarded,
        "rendered Nyquist curve"
    );
    Ok(())
}

fn draw_axes(chart: &mut Chart<'_, '_>, bounds: &PlotBounds) -> Result<()> {
    chart.draw_series(LineSeries::new(
        vec![(bounds.x.start, 0.0), (bounds.x.end, 0.0)],
        BLACK.stroke_width(1),
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(0.0, bounds.y.start), (0.0, bounds.y.end)],
        BLACK.stroke_width(1),
    ))?;
    Ok(())
}
