//! SVG rendering of the curve and scatter figures with `plotters`.
//!
//! Draw routines are generic over [`DrawingBackend`], the `render_*` helpers bind them
//! to an SVG file or an in-memory string.
use std::{ops::Range, path::Path};

use plotters::{drawing::DrawingAreaErrorKind, prelude::*};
use tracing::info;

mod line_chart;
mod scatter_chart;

pub use line_chart::draw_curve;
pub use scatter_chart::draw_scatter;

use crate::{
    config::{CurveStyle, ScatterStyle},
    curve::CurveFigure,
};
use nalgebra::Point3;

pub fn render_curve_svg(path: &Path, figure: &CurveFigure, style: &CurveStyle) -> Result<(), PlotError> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw_curve(&root, figure, style)?;
    info!(path = %path.display(), "curve plot written");
    Ok(())
}

pub fn render_scatter_svg(path: &Path, points: &[Point3<f64>], style: &ScatterStyle) -> Result<(), PlotError> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw_scatter(&root, points, style)?;
    info!(path = %path.display(), points = points.len(), "scatter plot written");
    Ok(())
}

pub fn curve_svg_string(figure: &CurveFigure, style: &CurveStyle) -> Result<String, PlotError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (style.width, style.height)).into_drawing_area();
        draw_curve(&root, figure, style)?;
    }
    Ok(buffer)
}

pub fn scatter_svg_string(points: &[Point3<f64>], style: &ScatterStyle) -> Result<String, PlotError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (style.width, style.height)).into_drawing_area();
        draw_scatter(&root, points, style)?;
    }
    Ok(buffer)
}

pub(crate) fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Axis range around `min..max` with 5% margin on both sides. Flat ranges get a unit margin.
pub(crate) fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span.abs() < 1e-12 {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}

pub(crate) fn drawing<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Drawing(error.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("nothing to plot")]
    Empty,
    #[error("drawing failed: {0}")]
    Drawing(String),
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::config::{CurveConfig, ScatterConfig};

    #[test]
    fn padded_ranges() {
        let range = padded(0.0, 10.0);
        assert_approx_eq!(range.start, -0.5, 1e-12);
        assert_approx_eq!(range.end, 10.5, 1e-12);

        let flat = padded(2.0, 2.0);
        assert_eq!(1.0..3.0, flat);
    }

    #[test]
    fn rgb_conversion() {
        assert_eq!(RGBColor(255, 165, 0), rgb([255, 165, 0]));
    }

    #[test]
    fn render_files() {
        let dir = tempfile::tempdir().unwrap();

        let config = CurveConfig::default();
        let figure = CurveFigure::build(&config).unwrap();
        let curve_path = dir.path().join("curve.svg");
        render_curve_svg(&curve_path, &figure, &config.style).unwrap();

        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)];
        let scatter_path = dir.path().join("scatter.svg");
        render_scatter_svg(&scatter_path, &points, &ScatterConfig::default().style).unwrap();

        for path in [curve_path, scatter_path] {
            let text = std::fs::read_to_string(path).unwrap();
            assert!(text.contains("<svg"));
        }
    }

    #[test]
    fn render_into_missing_directory_fails() {
        let config = CurveConfig::default();
        let figure = CurveFigure::build(&config).unwrap();
        let path = Path::new("/no/such/dir/curve.svg");

        assert!(matches!(
            render_curve_svg(path, &figure, &config.style),
            Err(PlotError::Drawing(_))
        ));
    }
}
