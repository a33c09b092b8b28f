//! Cubic spline interpolation with tangent overlays, and 3D point clouds read from
//! tuple-per-line text files, both rendered to SVG.
//!
//! # Example
//! ```
//! use spline_plot::{BoundaryCondition, Knot, Spline, TangentSegment};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let knots = vec![
//!     Knot::new(0.0, 0.0),
//!     Knot::new(1.0, 1.0),
//!     Knot::new(2.0, 4.0),
//!     Knot::new(3.0, 9.0),
//! ];
//! let spline = Spline::new(knots, BoundaryCondition::NotAKnot).unwrap();
//!
//! assert_approx_eq!(2.25, spline.interpolate(1.5).unwrap(), 1e-9);
//!
//! let tangent = TangentSegment::at(&spline, 2.0, 0.5);
//! assert_approx_eq!(4.0, tangent.slope, 1e-9);
//! assert_approx_eq!(2.0, tangent.start.1, 1e-9);
//! ```

mod boundary;
mod knot;
mod polynomial;
mod spline;
mod sampling;
mod tangent;
mod curve;
mod points;

pub mod config;
pub mod logging;
pub mod plot;

pub use boundary::{BoundaryCondition, BoundaryParseError};
pub use curve::CurveFigure;
pub use knot::Knot;
pub use points::{load_points, parse_point, read_points, PointError, PointSet, PointsError, ReadOptions, DEFAULT_LIMIT};
pub use polynomial::Polynomial;
pub use sampling::{linspace, sample_curve, DEFAULT_SAMPLES};
pub use spline::{Spline, SplineError};
pub use tangent::{tangents, TangentSegment, DEFAULT_HALF_LENGTH};
