use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::{boundary::BoundaryCondition, knot::Knot, polynomial::{falling_factorial, Polynomial}};

/// Number of coefficients of every cubic piece.
const COEFFICIENTS: usize = 4;

/// Relative tolerance for the end values of a periodic spline.
const PERIODIC_TOLERANCE: f64 = 1e-12;

#[derive(Debug)]
pub struct Spline {
    knots: Vec<Knot>,
    polynomials: Vec<Polynomial>,
    boundary: BoundaryCondition,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl Spline {
    /// Builds cubic spline passing through `knots`. Knots do not have to be sorted.
    /// # Errors
    /// - less than 2 knots,
    /// - non-finite coordinates or two knots sharing `x`,
    /// - periodic boundary with different end values,
    /// - singular set of equations.
    pub fn new(knots: Vec<Knot>, boundary: BoundaryCondition) -> Result<Self, SplineError> {

        if knots.len() < 2 {
            return Err(SplineError::TooFewKnots(knots.len()));
        }
        if let Some(knot) = knots.iter().find(|k| !k.is_finite()) {
            return Err(SplineError::NonFinite { x: knot.x, y: knot.y });
        }

        let number_of_intervals = knots.len() - 1;
        let mut spline = Spline {
            knots,
            polynomials: Vec::with_capacity(number_of_intervals),
            boundary,
            min_x: 0.0,
            max_x: 0.0,
            is_knot_spacing_uniform: false,
        };

        spline.sort_knots();
        spline.check_knots_spacing()?;
        spline.check_boundary()?;
        spline.calculate_polynomials()?;

        debug!(
            knots = spline.knots.len(),
            boundary = %spline.boundary,
            uniform = spline.is_knot_spacing_uniform,
            "cubic spline built"
        );
        Ok(spline)
    }

    pub fn interpolate(&self, x: f64) -> Result<f64, SplineError> {
        self.check_range(x)?;
        let index = self.find_interval_index(x);
        Ok(self.polynomials[index].evaluate(x))
    }

    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>, SplineError> {

        if let Some(x) = x_vector.iter().find(|x| !self.is_in_range(**x)) {
            return Err(self.out_of_range(*x));
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.polynomials[index].evaluate(*x));
        }
        Ok(results)
    }

    /// Evaluates the spline anywhere, continuing the end pieces outside of knots range.
    pub fn extrapolate(&self, x: f64) -> f64 {
        self.piece_for(x).evaluate(x)
    }

    pub fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            match self.boundary_piece(*x) {
                Some(polynomial) => results.push(polynomial.evaluate(*x)),
                None => {
                    index = self.find_interval_index_with_hint(index, *x);
                    results.push(self.polynomials[index].evaluate(*x));
                },
            }
        }
        results
    }

    /// Derivative of given `order` inside knots range.
    pub fn derivative(&self, x: f64, order: usize) -> Result<f64, SplineError> {
        self.check_range(x)?;
        let index = self.find_interval_index(x);
        Ok(self.polynomials[index].evaluate_derivative(x, order))
    }

    /// First derivative, extrapolated outside of knots range.
    pub fn slope(&self, x: f64) -> f64 {
        self.piece_for(x).evaluate_derivative(x, 1)
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn polynomials(&self) -> &[Polynomial] {
        &self.polynomials
    }

    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn sort_knots(&mut self) {
        self.knots.sort();
        self.min_x = self.knots[0].x;
        self.max_x = self.knots[self.knots.len() - 1].x;
    }

    fn check_knots_spacing(&mut self) -> Result<(), SplineError> {

        let x_spacing_vec: Vec<f64> = self.steps();

        if let Some(i) = x_spacing_vec.iter().position(|spacing| *spacing < 1e-16) {
            return Err(SplineError::DuplicateX(self.knots[i].x));
        }

        self.is_knot_spacing_uniform = x_spacing_vec
            .windows(2)
            .map(|spacing| (spacing[1] - spacing[0]).abs())
            .all(|difference| difference < 1e-16);

        Ok(())
    }

    fn check_boundary(&self) -> Result<(), SplineError> {
        match self.boundary {
            BoundaryCondition::Periodic => {
                let first = self.knots[0].y;
                let last = self.knots[self.knots.len() - 1].y;
                let scale = first.abs().max(last.abs()).max(1.0);
                if (first - last).abs() > PERIODIC_TOLERANCE * scale {
                    return Err(SplineError::NotPeriodic { first, last });
                }
            }
            BoundaryCondition::Clamped { left, right } if !left.is_finite() || !right.is_finite() => {
                return Err(SplineError::NonFiniteSlope { left, right });
            }
            _ => {}
        }
        Ok(())
    }

    fn steps(&self) -> Vec<f64> {
        self.knots
            .windows(2)
            .map(|w| w[1].x - w[0].x)
            .collect()
    }

    fn calculate_polynomials(&mut self) -> Result<(), SplineError> {
        let number_of_intervals = self.knots.len() - 1;
        let steps = self.steps();

        let mut system = EquationSystem::new(COEFFICIENTS * number_of_intervals);

        for i in 0..number_of_intervals {
            let index_start = i * COEFFICIENTS;

            system.derivative_equation(index_start, 0, 0.0, self.knots[i].y);
            system.derivative_equation(index_start, 0, steps[i], self.knots[i + 1].y);

            if i < number_of_intervals - 1 {
                for order in 1..=2 {
                    system.continuity_equation(
                        order,
                        (index_start, steps[i]),
                        (index_start + COEFFICIENTS, 0.0),
                    );
                }
            }
        }

        self.boundary_equations(&steps, &mut system);

        debug!(size = system.size(), rows = system.equation_counter, "solving spline equations");

        let solution = system.solve().ok_or(SplineError::Singular)?;

        for i in 0..number_of_intervals {
            self.create_polynomial_for_interval(i, &solution);
        }
        Ok(())
    }

    fn boundary_equations(&self, steps: &[f64], system: &mut EquationSystem) {
        let number_of_intervals = steps.len();
        let first = 0;
        let last = (number_of_intervals - 1) * COEFFICIENTS;
        let last_step = steps[number_of_intervals - 1];

        match self.boundary {
            BoundaryCondition::Natural => {
                system.derivative_equation(first, 2, 0.0, 0.0);
                system.derivative_equation(last, 2, last_step, 0.0);
            }
            BoundaryCondition::Clamped { left, right } => {
                system.derivative_equation(first, 1, 0.0, left);
                system.derivative_equation(last, 1, last_step, right);
            }
            BoundaryCondition::Periodic => {
                for order in 1..=2 {
                    system.continuity_equation(order, (last, last_step), (first, 0.0));
                }
            }
            BoundaryCondition::NotAKnot => match number_of_intervals {
                // straight line through both knots
                1 => {
                    system.derivative_equation(first, 2, 0.0, 0.0);
                    system.derivative_equation(first, 3, 0.0, 0.0);
                }
                // parabola through all three knots
                2 => {
                    system.continuity_equation(3, (first, steps[0]), (COEFFICIENTS, 0.0));
                    system.derivative_equation(first, 3, 0.0, 0.0);
                }
                _ => {
                    system.continuity_equation(3, (first, steps[0]), (COEFFICIENTS, 0.0));
                    system.continuity_equation(
                        3,
                        (last - COEFFICIENTS, steps[number_of_intervals - 2]),
                        (last, 0.0),
                    );
                }
            },
        }
    }

    fn create_polynomial_for_interval(&mut self, interval: usize, solution: &DVector<f64>) {
        let interval_index_start = interval * COEFFICIENTS;
        let coefficients = solution
            .rows(interval_index_start, COEFFICIENTS)
            .iter()
            .copied()
            .collect();

        let interval_polynomial = Polynomial::new(coefficients, self.knots[interval].x);
        self.polynomials.push(interval_polynomial);
    }

    fn check_range(&self, x: f64) -> Result<(), SplineError> {
        if self.is_in_range(x) {
            Ok(())
        } else {
            Err(self.out_of_range(x))
        }
    }

    fn out_of_range(&self, x: f64) -> SplineError {
        SplineError::OutOfRange { x, min: self.min_x, max: self.max_x }
    }

    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let size = self.knots.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].x {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let last_interval = self.knots.len() - 2;
        let relative_x = (x - self.min_x) / (self.max_x - self.min_x);
        if relative_x <= 0.0 {
            return 0;
        }
        let index = (relative_x * (self.knots.len() - 1) as f64).floor() as usize;
        index.min(last_interval)
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {

        if !self.is_in_interval_range(index_hint, x) {

            if index_hint + 2 < self.knots.len() && self.is_in_interval_range(index_hint + 1, x) {
                return index_hint + 1;
            }
            return self.find_interval_index(x);
        }
        index_hint
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        self.knots[interval_index].x <= x && x <= self.knots[interval_index + 1].x
    }

    fn boundary_piece(&self, x: f64) -> Option<&Polynomial> {
        let size = self.knots.len();
        if x < self.knots[1].x {
            Some(&self.polynomials[0])
        } else if x > self.knots[size - 2].x {
            Some(&self.polynomials[size - 2])
        } else {
            None
        }
    }

    fn piece_for(&self, x: f64) -> &Polynomial {
        match self.boundary_piece(x) {
            Some(polynomial) => polynomial,
            None => &self.polynomials[self.find_interval_index(x)],
        }
    }
}

/// Square linear system over the coefficients of all pieces, filled row by row.
struct EquationSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    equation_counter: usize,
}

impl EquationSystem {
    fn new(size: usize) -> Self {
        EquationSystem {
            matrix: DMatrix::<f64>::zeros(size, size),
            rhs: DVector::<f64>::zeros(size),
            equation_counter: 0,
        }
    }

    fn size(&self) -> usize {
        self.rhs.len()
    }

    /// `p^(order)(t) = value` for the piece starting at column `index_start`.
    fn derivative_equation(&mut self, index_start: usize, order: usize, t: f64, value: f64) {
        for c in 0..COEFFICIENTS {
            self.matrix[(self.equation_counter, index_start + c)] =
                derivative_equation_coefficient(c, order, t);
        }
        self.rhs[self.equation_counter] = value;
        self.equation_counter += 1;
    }

    /// `p0^(order)(t0) - p1^(order)(t1) = 0`.
    fn continuity_equation(&mut self, order: usize, left: (usize, f64), right: (usize, f64)) {
        let (index_start_0, t0) = left;
        let (index_start_1, t1) = right;
        for c in 0..COEFFICIENTS {
            self.matrix[(self.equation_counter, index_start_0 + c)] +=
                derivative_equation_coefficient(c, order, t0);
            self.matrix[(self.equation_counter, index_start_1 + c)] -=
                derivative_equation_coefficient(c, order, t1);
        }
        self.rhs[self.equation_counter] = 0.0;
        self.equation_counter += 1;
    }

    fn solve(self) -> Option<DVector<f64>> {
        if self.equation_counter != self.size() {
            return None;
        }
        self.matrix
            .lu()
            .solve(&self.rhs)
            .filter(|solution| solution.iter().all(|c| c.is_finite()))
    }
}

/// Coefficient of `c_k` in the `order`-th derivative of `sum c_k t^k`, evaluated at `t`.
fn derivative_equation_coefficient(polynomial_order: usize, derivative_order: usize, t: f64) -> f64 {
    if polynomial_order < derivative_order {
        0.0
    } else {
        t.powi((polynomial_order - derivative_order) as i32)
            * falling_factorial(polynomial_order, derivative_order)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SplineError {
    #[error("spline must have at least 2 knots, got {0}")]
    TooFewKnots(usize),
    #[error("knot ({x}, {y}) has a non-finite coordinate")]
    NonFinite { x: f64, y: f64 },
    #[error("knots have equal x values at x = {0}")]
    DuplicateX(f64),
    #[error("periodic boundary requires equal end values, got {first} and {last}")]
    NotPeriodic { first: f64, last: f64 },
    #[error("clamped boundary slopes must be finite, got {left} and {right}")]
    NonFiniteSlope { left: f64, right: f64 },
    #[error("x = {x} is out of range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },
    #[error("error while solving set of equations")]
    Singular,
}
