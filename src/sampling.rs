use crate::spline::Spline;

/// Number of curve samples used when none is configured.
pub const DEFAULT_SAMPLES: usize = 500;

/// `n` evenly spaced values from `start` to `end`, both included.
/// # Example
/// ```
/// use spline_plot::linspace;
///
/// assert_eq!(vec![0.0, 0.5, 1.0], linspace(0.0, 1.0, 3));
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // keep the last value exact, the loop accumulates rounding
            values[n - 1] = end;
            values
        }
    }
}

/// Samples `n` points of the spline over its knot range.
pub fn sample_curve(spline: &Spline, n: usize) -> Vec<(f64, f64)> {
    let x_vector = linspace(spline.min_x(), spline.max_x(), n);
    let y_vector = spline.batch_extrapolate(&x_vector);
    x_vector.into_iter().zip(y_vector).collect()
}
