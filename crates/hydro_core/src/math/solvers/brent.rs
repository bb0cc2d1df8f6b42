//! Brent's bracketing root finder.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method: inverse quadratic interpolation and secant steps,
/// safeguarded by bisection.
///
/// Needs only a sign change, no derivative, which suits CDF inversion: a
/// cumulative probability is monotone, so `F(lo) - p` and `F(hi) - p`
/// bracket the quantile once the interval is wide enough.
///
/// # Example
///
/// ```
/// use hydro_core::math::solvers::{BrentSolver, SolverConfig};
///
/// // Median of the logistic distribution: 1 / (1 + e^-x) = 0.5
/// let solver = BrentSolver::new(SolverConfig::high_precision());
/// let median = solver
///     .find_root(|x: f64| 1.0 / (1.0 + (-x).exp()) - 0.5, -5.0, 7.0)
///     .unwrap();
/// assert!(median.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Solver with the given stopping rule.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Stopping rule in use.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Root of `f` between `a` and `b`.
    ///
    /// The endpoints may be given in either order. Returns the best
    /// estimate once `f(x)` is exactly zero or the bracket half-width falls
    /// below `2ε|x| + tolerance / 2`. The size of `f` never stops the
    /// search, so an objective scaled by 1e-200 converges to the same root.
    ///
    /// # Errors
    /// - `InvalidConfiguration`: the stopping rule cannot terminate
    /// - `NoBracket`: `f(a)` and `f(b)` have the same strict sign
    /// - `NumericalInstability`: `f` returned NaN
    /// - `MaxIterationsExceeded`: iteration budget spent
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.config.validate()?;

        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if fa.is_nan() || fb.is_nan() {
            return Err(SolverError::NumericalInstability(
                "objective is NaN at a bracket endpoint".to_string(),
            ));
        }

        // Compare signs rather than the product, which can underflow to zero
        if (fa > T::zero() && fb > T::zero()) || (fa < T::zero() && fb < T::zero()) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        let two = T::one() + T::one();
        let three = two + T::one();
        let half_tol = self.config.tolerance / two;

        for _iteration in 0..self.config.max_iterations {
            // Keep f(b) and f(c) on opposite sides of the root
            if (fb > T::zero() && fc > T::zero()) || (fb < T::zero() && fc < T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // b is always the best estimate so far
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            // Bracket tolerance, floored at the spacing of representable
            // values around b.
            let tol = two * T::epsilon() * b.abs() + half_tol;
            let m = (c - b) / two;

            if fb == T::zero() || m.abs() <= tol || b + m == b {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant method
                    (two * m * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q0 = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q0 * (q0 - r) - (b - a) * (r - T::one())),
                        (q0 - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };

                // Orient the step towards c
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * m * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = m;
                }
            } else {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;

            if d.abs() > tol {
                b = b + d;
            } else {
                b = b + if m > T::zero() { tol } else { -tol };
            }

            fb = f(b);
            if fb.is_nan() {
                return Err(SolverError::NumericalInstability(format!(
                    "objective is NaN at x = {}",
                    b.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Convergence
    // ========================================

    #[test]
    fn test_weibull_quantile() {
        // F(x) = 1 - exp(-(x/2)^1.5) = 0.9
        let solver = BrentSolver::new(SolverConfig::high_precision());
        let f = |x: f64| 1.0 - (-(x / 2.0).powf(1.5)).exp() - 0.9;

        let root = solver.find_root(f, 0.0, 20.0).unwrap();
        let expected = 2.0 * 10.0_f64.ln().powf(1.0 / 1.5);
        assert!((root - expected).abs() < 1e-12, "got {}", root);
    }

    #[test]
    fn test_log_coordinate_inversion() {
        let solver = BrentSolver::new(SolverConfig::high_precision());

        // exp(2u) = 1e-20, scaled so the residual is relative
        let f = |u: f64| (2.0 * u).exp() * 1e20 - 1.0;

        let root = solver.find_root(f, -40.0, 0.0).unwrap();
        assert!((root.exp() / 1e-10 - 1.0).abs() < 1e-12, "got {}", root.exp());
    }

    #[test]
    fn test_endpoints_in_either_order() {
        let solver = BrentSolver::<f64>::default();
        let f = |x: f64| x.ln() - 1.0;

        let forward = solver.find_root(f, 1.0, 5.0).unwrap();
        let backward = solver.find_root(f, 5.0, 1.0).unwrap();
        assert!((forward - std::f64::consts::E).abs() < 1e-9);
        assert!((backward - std::f64::consts::E).abs() < 1e-9);
    }

    #[test]
    fn test_exact_root_at_endpoint() {
        let solver = BrentSolver::<f64>::default();
        let root = solver.find_root(|x: f64| x * x - 9.0, 0.0, 3.0).unwrap();
        assert_eq!(root, 3.0);
    }

    #[test]
    fn test_step_function_terminates_at_resolution() {
        // Discontinuous sign change: the bracket shrinks to float spacing
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 2000).unwrap());
        let f = |x: f64| if x < 1.0 { -1.0 } else { 1.0 };

        let root = solver.find_root(f, 0.0, 3.0).unwrap();
        assert!((root - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_residuals_still_bracket() {
        // f(a) * f(b) underflows to zero; the signs still differ
        let solver = BrentSolver::<f64>::default();
        let f = |x: f64| 1e-200 * (x - 0.3);

        let root = solver.find_root(f, 0.0, 1.0).unwrap();
        assert!((root - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_residual_scale_does_not_stop_search() {
        // Every residual here is far below the tolerance; only the bracket
        // width may end the search.
        let solver = BrentSolver::new(SolverConfig::high_precision());
        for scale in [1.0, 1e-20, 1e-200, 1e-300] {
            let f = |x: f64| scale * (x.cos() - x);
            let root = solver.find_root(f, 0.0, 1.0).unwrap();
            assert!(
                (root - 0.7390851332151607).abs() < 1e-13,
                "scale {}: got {}",
                scale,
                root
            );
        }
    }

    #[test]
    fn test_f32_stopping_rule() {
        let solver = BrentSolver::<f32>::new(SolverConfig::fast());
        let root = solver.find_root(|x: f32| x.exp() - 3.0, 0.0, 2.0).unwrap();
        assert!((root - 3.0_f32.ln()).abs() < 1e-4);
    }

    // ========================================
    // Failures
    // ========================================

    #[test]
    fn test_same_sign_endpoints() {
        let solver = BrentSolver::<f64>::default();
        let result = solver.find_root(|x: f64| x.exp(), -2.0, 2.0);
        assert_eq!(result, Err(SolverError::NoBracket { a: -2.0, b: 2.0 }));
    }

    #[test]
    fn test_nan_objective() {
        let solver = BrentSolver::<f64>::default();
        assert!(matches!(
            solver.find_root(|x: f64| (x - 2.0).sqrt(), 0.0, 4.0),
            Err(SolverError::NumericalInstability(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let solver = BrentSolver::new(SolverConfig::<f64>::default().with_max_iterations(0));
        assert!(matches!(
            solver.find_root(|x| x, -1.0, 1.0),
            Err(SolverError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_iteration_budget() {
        let solver = BrentSolver::new(SolverConfig::new(1e-100, 3).unwrap());
        let result = solver.find_root(|x: f64| x.cos() - x, 0.0, 1.0);
        assert_eq!(
            result,
            Err(SolverError::MaxIterationsExceeded { iterations: 3 })
        );
        assert_eq!(solver.config().max_iterations, 3);
    }
}
