use nalgebra::Point3;
use plotters::{coord::Shift, prelude::*};

use super::{drawing, padded, rgb, PlotError};
use crate::config::ScatterStyle;

/// Draws `points` as markers in a 3D cartesian chart.
///
/// plotters draws the second coordinate upwards, so points go in as `(x, z, y)` and the
/// data Z axis stays vertical.
pub fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[Point3<f64>],
    style: &ScatterStyle,
) -> Result<(), PlotError> {
    let (min, max) = point_bounds(points).ok_or(PlotError::Empty)?;
    let (x_range, y_range, z_range) = (
        padded(min.x, max.x),
        padded(min.y, max.y),
        padded(min.z, max.z),
    );

    root.fill(&WHITE).map_err(drawing)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if let Some(caption) = &style.caption {
        builder.caption(caption, ("sans-serif", 24));
    }
    let mut chart = builder
        .build_cartesian_3d(x_range.clone(), z_range.clone(), y_range.clone())
        .map_err(drawing)?;

    chart.with_projection(|mut pb| {
        pb.yaw = style.yaw;
        pb.pitch = style.pitch;
        pb.scale = style.scale;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()
        .map_err(drawing)?;

    let color = rgb(style.color);
    let marker_size = style.marker_size as i32;
    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.x, p.z, p.y), marker_size, color.filled())),
        )
        .map_err(drawing)?;

    let font = ("sans-serif", 18).into_font();
    chart
        .draw_series([
            Text::new(style.x_label.clone(), (x_range.end, z_range.start, y_range.start), font.clone()),
            Text::new(style.y_label.clone(), (x_range.start, z_range.start, y_range.end), font.clone()),
            Text::new(style.z_label.clone(), (x_range.start, z_range.end, y_range.start), font),
        ])
        .map_err(drawing)?;

    root.present().map_err(drawing)
}

/// Component-wise minimum and maximum, `None` for an empty slice.
pub(crate) fn point_bounds(points: &[Point3<f64>]) -> Option<(Point3<f64>, Point3<f64>)> {
    let first = points.first()?;
    Some(points.iter().skip(1).fold((*first, *first), |(min, max), p| {
        (min.inf(p), max.sup(p))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScatterConfig, plot::scatter_svg_string};

    #[test]
    fn bounds_of_points() {
        let points = vec![
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 5.0, 0.0),
            Point3::new(0.5, 0.0, 7.0),
        ];

        let (min, max) = point_bounds(&points).unwrap();

        assert_eq!(Point3::new(-1.0, -2.0, 0.0), min);
        assert_eq!(Point3::new(1.0, 5.0, 7.0), max);
        assert!(point_bounds(&[]).is_none());
    }

    #[test]
    fn draws_one_marker_per_point() {
        let points: Vec<Point3<f64>> = (0..25)
            .map(|i| Point3::new(i as f64, (i * i) as f64, -(i as f64)))
            .collect();
        let style = ScatterConfig::default().style;

        let svg = scatter_svg_string(&points, &style).unwrap();

        assert_eq!(points.len(), svg.matches("<circle").count());
        assert!(svg.contains("#FF0000"));
    }

    #[test]
    fn single_point_is_drawn() {
        let style = ScatterConfig::default().style;

        let svg = scatter_svg_string(&[Point3::new(1.0, 1.0, 1.0)], &style).unwrap();

        assert_eq!(1, svg.matches("<circle").count());
    }

    #[test]
    fn empty_points_are_rejected() {
        let style = ScatterConfig::default().style;

        assert!(matches!(scatter_svg_string(&[], &style), Err(PlotError::Empty)));
    }
}
