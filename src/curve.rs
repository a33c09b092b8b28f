use tracing::info;

use crate::{
    config::CurveConfig,
    sampling::sample_curve,
    spline::{Spline, SplineError},
    tangent::{tangents, TangentSegment},
};

/// Everything drawn on the curve plot, in data coordinates.
#[derive(Debug)]
pub struct CurveFigure {
    pub knots: Vec<(f64, f64)>,
    pub samples: Vec<(f64, f64)>,
    pub tangents: Vec<TangentSegment>,
}

impl CurveFigure {
    pub fn build(config: &CurveConfig) -> Result<Self, SplineError> {
        let spline = Spline::new(config.knots.clone(), config.boundary)?;
        let figure = CurveFigure::from_spline(
            &spline,
            config.samples,
            &config.tangents.anchors,
            config.tangents.half_length,
        );

        info!(
            knots = figure.knots.len(),
            samples = figure.samples.len(),
            tangents = figure.tangents.len(),
            boundary = %spline.boundary(),
            "curve figure built"
        );
        Ok(figure)
    }

    pub fn from_spline(spline: &Spline, samples: usize, anchors: &[f64], half_length: f64) -> Self {
        CurveFigure {
            knots: spline.knots().iter().map(|k| (k.get_x(), k.get_y())).collect(),
            samples: sample_curve(spline, samples),
            tangents: tangents(spline, anchors, half_length),
        }
    }

    /// `(min_x, max_x, min_y, max_y)` over samples, knots and tangent end points.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let points = self
            .samples
            .iter()
            .chain(self.knots.iter())
            .copied()
            .chain(self.tangents.iter().flat_map(|t| [t.start, t.end]));

        points.fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_y, max_y), (x, y)| {
                (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
            },
        )
    }
}
