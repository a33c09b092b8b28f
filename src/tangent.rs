use tracing::warn;

use crate::spline::Spline;

/// Half length (along x) of tangent segments used when none is configured.
pub const DEFAULT_HALF_LENGTH: f64 = 0.15;

/// Short segment of the tangent line touching the spline at `anchor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentSegment {
    pub anchor: (f64, f64),
    pub slope: f64,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl TangentSegment {
    /// Tangent at `x` spanning `x - half_length ..= x + half_length`.
    ///
    /// Anchors outside of the knots range use the extrapolated end pieces.
    pub fn at(spline: &Spline, x: f64, half_length: f64) -> Self {
        if !spline.is_in_range(x) {
            warn!(x, min = spline.min_x(), max = spline.max_x(), "tangent anchor outside of knots range, extrapolating");
        }

        let y = spline.extrapolate(x);
        let slope = spline.slope(x);
        let line = |x_line: f64| (x_line, slope * (x_line - x) + y);

        TangentSegment {
            anchor: (x, y),
            slope,
            start: line(x - half_length),
            end: line(x + half_length),
        }
    }
}

pub fn tangents(spline: &Spline, anchors: &[f64], half_length: f64) -> Vec<TangentSegment> {
    anchors
        .iter()
        .map(|x| TangentSegment::at(spline, *x, half_length))
        .collect()
}
