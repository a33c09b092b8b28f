use plotters::{coord::Shift, prelude::*};

use super::{drawing, padded, rgb, PlotError};
use crate::{config::CurveStyle, curve::CurveFigure};

/// Draws the sampled curve with its tangent segments, and optionally the control points.
pub fn draw_curve<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &CurveFigure,
    style: &CurveStyle,
) -> Result<(), PlotError> {
    if figure.samples.is_empty() {
        return Err(PlotError::Empty);
    }
    let (min_x, max_x, min_y, max_y) = figure.bounds();

    root.fill(&WHITE).map_err(drawing)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(20).x_label_area_size(40).y_label_area_size(60);
    if let Some(caption) = &style.caption {
        builder.caption(caption, ("sans-serif", 24));
    }
    let mut chart = builder
        .build_cartesian_2d(padded(min_x, max_x), padded(min_y, max_y))
        .map_err(drawing)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_label.as_str()).y_desc(style.y_label.as_str());
    if !style.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(
            figure.samples.iter().copied(),
            rgb(style.curve_color).stroke_width(2),
        ))
        .map_err(drawing)?;

    let tangent_color = rgb(style.tangent_color);
    chart
        .draw_series(
            figure
                .tangents
                .iter()
                .map(|t| PathElement::new(vec![t.start, t.end], tangent_color.stroke_width(2))),
        )
        .map_err(drawing)?;

    if style.show_knots {
        let knot_color = rgb(style.knot_color);
        chart
            .draw_series(figure.knots.iter().map(|k| Circle::new(*k, 4, knot_color.filled())))
            .map_err(drawing)?;
    }

    root.present().map_err(drawing)
}
