/// Polynomial in the local variable `t = x - origin`, coefficients ordered from the constant term up.
#[derive(Debug, Clone)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    origin: f64,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>, origin: f64) -> Self {
        Polynomial { coefficients, origin }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let t = x - self.origin;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * t + c)
    }

    pub fn evaluate_derivative(&self, x: f64, order: usize) -> f64 {
        let t = x - self.origin;
        let mut result = 0.0;
        for i in (order..self.coefficients.len()).rev() {
            result = result * t + self.coefficients[i] * falling_factorial(i, order);
        }
        result
    }

    pub fn derivative(&self, order: usize) -> Polynomial {
        let coefficients = (order..self.coefficients.len())
            .map(|i| self.coefficients[i] * falling_factorial(i, order))
            .collect();
        Polynomial::new(coefficients, self.origin)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// `n * (n - 1) * ... * (n - k + 1)`, the factor gained by the `t^n` term after `k` derivatives.
pub(crate) fn falling_factorial(n: usize, k: usize) -> f64 {
    let mut multiplier = 1.0;
    let mut coeff = n as f64;
    for _ in 0..k {
        multiplier *= coeff;
        coeff -= 1.0;
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn evaluate() {

        let eps = 1e-6;
        let coefficients = vec![1.0, 2.5, -0.25];
        let polynomial = Polynomial::new(coefficients, 0.0);

        assert_approx_eq!(polynomial.evaluate(2.1), 5.1475, eps);
        assert_approx_eq!(polynomial.evaluate(-3.14), -9.3149, eps);
        assert_approx_eq!(polynomial.evaluate(0.0), 1.0, eps);
    }

    #[test]
    fn evaluate_with_origin() {
        let eps = 1e-12;
        // (x - 2)^2 + 1
        let polynomial = Polynomial::new(vec![1.0, 0.0, 1.0], 2.0);

        assert_approx_eq!(polynomial.evaluate(2.0), 1.0, eps);
        assert_approx_eq!(polynomial.evaluate(4.0), 5.0, eps);
        assert_approx_eq!(polynomial.evaluate(0.0), 5.0, eps);
    }

    #[test]
    fn evaluate_derivative() {
        let eps = 1e-12;
        // 1 + 2t + 3t^2 + 4t^3
        let polynomial = Polynomial::new(vec![1.0, 2.0, 3.0, 4.0], 1.0);

        assert_approx_eq!(polynomial.evaluate_derivative(1.0, 1), 2.0, eps);
        assert_approx_eq!(polynomial.evaluate_derivative(2.0, 1), 2.0 + 6.0 + 12.0, eps);
        assert_approx_eq!(polynomial.evaluate_derivative(2.0, 2), 6.0 + 24.0, eps);
        assert_approx_eq!(polynomial.evaluate_derivative(2.0, 3), 24.0, eps);
        assert_eq!(polynomial.evaluate_derivative(2.0, 4), 0.0);
        assert_approx_eq!(polynomial.evaluate_derivative(3.0, 0), polynomial.evaluate(3.0), eps);
    }

    #[test]
    fn derivative_polynomial_matches_evaluate_derivative() {
        let eps = 1e-12;
        let polynomial = Polynomial::new(vec![-0.5, 1.5, 2.0, -1.0], 0.25);
        let first = polynomial.derivative(1);
        let second = polynomial.derivative(2);

        assert_eq!(first.coefficients(), &[1.5, 4.0, -3.0]);
        for x in [-1.0, 0.0, 0.3, 2.7] {
            assert_approx_eq!(first.evaluate(x), polynomial.evaluate_derivative(x, 1), eps);
            assert_approx_eq!(second.evaluate(x), polynomial.evaluate_derivative(x, 2), eps);
        }
        assert!(polynomial.derivative(5).coefficients().is_empty());
    }

    #[test]
    fn falling_factorial_values() {
        assert_eq!(falling_factorial(3, 0), 1.0);
        assert_eq!(falling_factorial(3, 1), 3.0);
        assert_eq!(falling_factorial(3, 2), 6.0);
        assert_eq!(falling_factorial(3, 3), 6.0);
        assert_eq!(falling_factorial(2, 3), 0.0);
    }
}
