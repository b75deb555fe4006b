//! SVG Arrhenius plot rendering.
//!
//! The chart is intentionally data-driven: all series and bounds are
//! computed from the fitted session before any drawing happens, so the
//! rendering code stays a thin adapter over Plotters and the data prep can
//! be tested separately.

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;
use crate::fit::ArrheniusFit;

/// Number of samples along the fitted line.
const LINE_POINTS: usize = 101;

/// Axis bounds with a small margin around the data (error bars included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Compute padded axis bounds for a fitted session.
pub fn plot_bounds(fit: &ArrheniusFit) -> PlotBounds {
    let series = fit.series();

    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y0 = f64::INFINITY;
    let mut y1 = f64::NEG_INFINITY;

    for i in 0..series.len() {
        let xe = series.x_err.as_ref().map_or(0.0, |errs| errs[i]);
        let ye = series.y_err.as_slice().map_or(0.0, |errs| errs[i]);
        x0 = x0.min(series.x[i] - xe);
        x1 = x1.max(series.x[i] + xe);
        y0 = y0.min(series.y[i] - ye);
        y1 = y1.max(series.y[i] + ye);
    }

    let x_pad = 0.05 * (x1 - x0).max(f64::MIN_POSITIVE);
    let y_pad = 0.05 * (y1 - y0).max(1e-6);
    PlotBounds {
        x: [x0 - x_pad, x1 + x_pad],
        y: [y0 - y_pad, y1 + y_pad],
    }
}

/// Render `1/T` vs `ln D` with error bars and the fitted line to an SVG file.
pub fn render_arrhenius_svg(
    path: &Path,
    fit: &ArrheniusFit,
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    if width < 100 || height < 100 {
        return Err(AppError::render(format!(
            "plot size {width}x{height} is too small (minimum 100x100)"
        )));
    }

    let bounds = plot_bounds(fit);
    let series = fit.series();

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::render(format!("failed to clear plot background: {e}")))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(bounds.x[0]..bounds.x[1], bounds.y[0]..bounds.y[1])
        .map_err(|e| AppError::render(format!("failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .x_desc("1/T (1/K)")
        .y_desc("ln D")
        .x_labels(6)
        .y_labels(6)
        .draw()
        .map_err(|e| AppError::render(format!("failed to draw axes: {e}")))?;

    // 1) Fitted line across the padded x range.
    let step = (bounds.x[1] - bounds.x[0]) / (LINE_POINTS as f64 - 1.0);
    let xs: Vec<f64> = (0..LINE_POINTS).map(|i| bounds.x[0] + step * i as f64).collect();
    let ys = fit.predict_ln_x(&xs);
    chart
        .draw_series(LineSeries::new(xs.into_iter().zip(ys), &BLUE))
        .map_err(|e| AppError::render(format!("failed to draw fitted line: {e}")))?;

    // 2) Vertical (ln D) error bars, when present.
    if let Some(y_errs) = series.y_err.as_slice() {
        chart
            .draw_series((0..series.len()).map(|i| {
                let (x, y, e) = (series.x[i], series.y[i], y_errs[i]);
                ErrorBar::new_vertical(x, y - e, y, y + e, RED.stroke_width(1), 6)
            }))
            .map_err(|e| AppError::render(format!("failed to draw error bars: {e}")))?;
    }

    // 3) Horizontal (1/T) error bars as short segments.
    if let Some(x_errs) = &series.x_err {
        chart
            .draw_series((0..series.len()).map(|i| {
                let (x, y, e) = (series.x[i], series.y[i], x_errs[i]);
                PathElement::new(vec![(x - e, y), (x + e, y)], RED.stroke_width(1))
            }))
            .map_err(|e| AppError::render(format!("failed to draw error bars: {e}")))?;
    }

    // 4) Observed points on top.
    chart
        .draw_series(
            series
                .x
                .iter()
                .zip(&series.y)
                .map(|(&x, &y)| Circle::new((x, y), 3, RED.filled())),
        )
        .map_err(|e| AppError::render(format!("failed to draw points: {e}")))?;

    root.present()
        .map_err(|e| AppError::render(format!("failed to write SVG '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleSet;

    fn fitted_with_errors() -> ArrheniusFit {
        let sample = SampleSet::new(
            vec![900.0, 1000.0, 1100.0, 1200.0],
            vec![1e-10, 1e-9, 5e-9, 1e-8],
            Some(vec![1e-11, 1e-10, 5e-10, 1e-9]),
            Some(vec![5.0, 5.0, 5.0, 5.0]),
        )
        .unwrap();
        ArrheniusFit::fit(&sample).unwrap()
    }

    #[test]
    fn bounds_cover_all_points_with_margin() {
        let fit = fitted_with_errors();
        let bounds = plot_bounds(&fit);
        let series = fit.series();

        for (x, y) in series.x.iter().zip(&series.y) {
            assert!(bounds.x[0] < *x && *x < bounds.x[1]);
            assert!(bounds.y[0] < *y && *y < bounds.y[1]);
        }
    }

    #[test]
    fn renders_an_svg_file() {
        let fit = fitted_with_errors();
        let path = std::env::temp_dir().join(format!("arrfit-plot-{}.svg", std::process::id()));

        render_arrhenius_svg(&path, &fit, 800, 600).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(contents.contains("<svg"));
    }

    #[test]
    fn rejects_degenerate_plot_sizes() {
        let fit = fitted_with_errors();
        let path = std::env::temp_dir().join("arrfit-too-small.svg");
        let err = render_arrhenius_svg(&path, &fit, 10, 10).unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
