/// The family fₐ(x) = a x − x ln x whose root is eᵃ, with its
/// derivative, bracket and starting point.
pub struct Problem {
    pub a: f64,
}

impl Problem {
    #[inline]
    pub fn f(&self, x: f64) -> f64 { self.a * x - x * x.ln() }

    #[inline]
    pub fn df(&self, x: f64) -> f64 { self.a - x.ln() - 1. }

    /// \[2ᵃ, 3ᵃ\] (reversed when a < 0) contains eᵃ.
    pub fn bracket(&self) -> (f64, f64) {
        let (lo, hi) = (2f64.powf(self.a), 3f64.powf(self.a));
        if self.a < 0. { (hi, lo) } else { (lo, hi) }
    }

    /// Starting point of the open methods.
    pub fn x0(&self) -> f64 { 2.7f64.powf(self.a) }
}

pub fn problems() -> Vec<Problem> {
    [-2., 0.5, 1., 1.4, 4., 8.].into_iter().map(|a| Problem { a }).collect()
}

/// Tolerances for the "roots" crate, matching `epsilon`.
pub struct Tol {
    pub epsilon: f64,
    pub maxiter: usize,
}

impl roots::Convergency<f64> for Tol {
    fn is_root_found(&mut self, y: f64) -> bool {
        y == 0.
    }

    fn is_converged(&mut self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }

    fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
        iter > self.maxiter
    }
}
