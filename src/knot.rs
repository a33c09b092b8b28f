use serde::Deserialize;

/// Knot represents a control point through which the spline passes.
/// - `x` - coordinate,
/// - `y` - coordinate.
///
/// Knots are ordered by `x` only, two knots with the same `x` compare equal.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Knot {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Knot {
    /// # Example
    /// ```
    /// use spline_plot::Knot;
    ///
    /// let knot = Knot::new(1.0, 2.0);
    /// assert_eq!(1.0, knot.get_x());
    /// assert_eq!(2.0, knot.get_y());
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    /// Pairs `xs` with `ys` element-wise. Extra elements of the longer slice are ignored.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Vec<Self> {
        xs.iter()
            .zip(ys)
            .map(|(x, y)| Knot::new(*x, *y))
            .collect()
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Knot {
    fn from(value: (f64, f64)) -> Self {
        Knot::new(value.0, value.1)
    }
}

impl From<[f64; 2]> for Knot {
    fn from(value: [f64; 2]) -> Self {
        Knot::new(value[0], value[1])
    }
}

impl Ord for Knot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl PartialOrd for Knot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Knot {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
    }
}

impl Eq for Knot { }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let knot = Knot::new(1.0, 2.5);

        assert_eq!(1.0, knot.x);
        assert_eq!(2.5, knot.y);
    }

    #[test]
    fn test_from_tuple_and_array() {
        let from_tuple = Knot::from((0.5, -1.0));
        let from_array = Knot::from([0.5, -1.0]);

        assert_eq!(from_tuple.x, from_array.x);
        assert_eq!(from_tuple.y, from_array.y);
    }

    #[test]
    fn test_from_xy_truncates_to_shorter() {
        let knots = Knot::from_xy(&[0.0, 1.0, 2.0], &[5.0, 6.0]);

        assert_eq!(2, knots.len());
        assert_eq!(1.0, knots[1].x);
        assert_eq!(6.0, knots[1].y);
    }

    #[test]
    fn test_ordering_by_x() {
        let mut knots = vec![Knot::new(2.0, 0.0), Knot::new(-1.0, 9.0), Knot::new(0.5, 3.0)];
        knots.sort();

        let xs: Vec<f64> = knots.iter().map(|k| k.x).collect();
        assert_eq!(vec![-1.0, 0.5, 2.0], xs);
        assert_eq!(Knot::new(1.0, 2.0), Knot::new(1.0, 3.0));
    }

    #[test]
    fn test_deserialize_from_pair() {
        #[derive(Deserialize)]
        struct Wrapper {
            knots: Vec<Knot>,
        }

        let wrapper: Wrapper = toml::from_str("knots = [[0.0, 1.0], [2.0, -3.5]]").unwrap();

        assert_eq!(2, wrapper.knots.len());
        assert_eq!(-3.5, wrapper.knots[1].get_y());
    }

    #[test]
    fn test_is_finite() {
        assert!(Knot::new(0.0, 1.0).is_finite());
        assert!(!Knot::new(f64::NAN, 1.0).is_finite());
        assert!(!Knot::new(0.0, f64::INFINITY).is_finite());
    }
}
