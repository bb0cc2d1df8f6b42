//! Gamma distribution with shape α and scale β.
//!
//! The CDF is the regularised incomplete gamma ratio, evaluated for the
//! requested tail directly. The quantile has no closed form and is found by
//! root-finding in the log coordinate `u = ln(x / β)`, which keeps the
//! search well-scaled for shapes from 1e-2 to 1e5 and for probabilities down
//! to 1e-300.
//!
//! The `standardized_*` methods work with `Z = (G − α) / √α` for
//! `G ~ Gamma(α, 1)`. For very large shapes `G` and `α` agree in most of
//! their digits, so these methods never form `G` at all.

use super::normal::standard_normal_quantile;
use super::{ContinuousDistribution, DistributionError};
use hydro_core::math::solvers::{BrentSolver, SolverConfig};
use hydro_core::math::special::{
    gamma_density, gamma_density_standardized, ln_1p_minus, ln_gamma, regularized_gamma,
    regularized_gamma_standardized, LARGE_SHAPE,
};
use hydro_core::types::{SolverError, Tail};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, trace};

/// Largest argument for which `exp` is finite.
const MAX_EXP_ARGUMENT: f64 = 709.0;

/// Stand-in for `ln 0` in log-probability residuals, below the log of the
/// smallest subnormal.
const LN_ZERO: f64 = -746.0;

/// Maximum number of bracket expansions in the log coordinate.
const MAX_BRACKET_EXPANSIONS: usize = 64;

/// Gamma distribution Γ(α, β) with density
/// `x^(α−1) e^(−x/β) / (Γ(α) β^α)` on `x > 0`.
///
/// # Examples
/// ```
/// use hydro_core::types::Tail;
/// use hydro_stats::distributions::{ContinuousDistribution, Gamma};
///
/// // Shape 1 is the exponential distribution
/// let gamma = Gamma::new(1.0, 2.0).unwrap();
/// assert!((gamma.cdf(2.0, Tail::Upper) - (-1.0_f64).exp()).abs() < 1e-15);
///
/// let median = gamma.quantile(0.5, Tail::Lower).unwrap();
/// assert!((median - 2.0 * std::f64::consts::LN_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Gamma {
    shape: f64,
    scale: f64,
    sampler: rand_distr::Gamma<f64>,
}

impl Gamma {
    /// Create a Gamma distribution.
    ///
    /// # Errors
    /// - `InvalidShape` if `shape` is not positive and finite
    /// - `InvalidScale` if `scale` is not positive and finite
    pub fn new(shape: f64, scale: f64) -> Result<Self, DistributionError> {
        if !(shape.is_finite() && shape > 0.0) {
            return Err(DistributionError::InvalidShape { shape });
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(DistributionError::InvalidScale { scale });
        }
        let sampler =
            rand_distr::Gamma::new(shape, scale).map_err(|e| DistributionError::Sampler {
                message: e.to_string(),
            })?;
        Ok(Self {
            shape,
            scale,
            sampler,
        })
    }

    /// Shape α.
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale β.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Tail probability of `Z = (G − α) / √α` at `z`.
    pub fn standardized_cdf(&self, z: f64, tail: Tail) -> f64 {
        regularized_gamma_standardized(self.shape, z, tail)
    }

    /// Density of `Z = (G − α) / √α` at `z`.
    pub fn standardized_pdf(&self, z: f64) -> f64 {
        gamma_density_standardized(self.shape, z)
    }

    /// Quantile of `Z = (G − α) / √α` for the requested tail.
    ///
    /// The lower end of the support is `z = −√α`.
    ///
    /// # Errors
    /// `ProbabilityOutOfRange` for `p` outside `[0, 1]`, or a solver error.
    ///
    /// # Examples
    /// ```
    /// use hydro_core::types::Tail;
    /// use hydro_stats::distributions::Gamma;
    ///
    /// // Shape 4e18: essentially standard normal, median shifted by −1/(3√α)
    /// let gamma = Gamma::new(4e18, 1.0).unwrap();
    /// let median = gamma.standardized_quantile(0.5, Tail::Lower).unwrap();
    /// assert!((median + 1.0 / 6e9).abs() < 1e-13);
    /// ```
    pub fn standardized_quantile(&self, p: f64, tail: Tail) -> Result<f64, DistributionError> {
        let p = DistributionError::check_probability(p)?;
        standardized_gamma_quantile(self.shape, p, tail)
    }

    /// Draw `Z = (G − α) / √α` directly.
    ///
    /// Marsaglia–Tsang with `v − 1` carried explicitly, so the offset from the
    /// mean survives for any shape. Requires `α ≥ 1`; smaller shapes fall
    /// back to standardising a draw of `G`.
    pub fn sample_standardized<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let root_shape = self.shape.sqrt();
        if self.shape < 1.0 {
            let g = self.sampler.sample(rng) / self.scale;
            return (g - self.shape) / root_shape;
        }

        let d = self.shape - 1.0 / 3.0;
        let c = 1.0 / (9.0 * d).sqrt();
        loop {
            let x: f64 = StandardNormal.sample(rng);
            let t = c * x;
            if t <= -1.0 {
                continue;
            }
            // v = (1 + t)³
            let v_minus_one = t * (3.0 + t * (3.0 + t));
            let u: f64 = rng.gen();
            if u.ln() < 0.5 * x * x + d * ln_1p_minus(v_minus_one) {
                // G = d·v, so G − α = d·(v − 1) − 1/3
                return (d * v_minus_one - 1.0 / 3.0) / root_shape;
            }
        }
    }
}

impl PartialEq for Gamma {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.scale == other.scale
    }
}

impl ContinuousDistribution for Gamma {
    fn pdf(&self, x: f64) -> f64 {
        gamma_density(self.shape, x / self.scale) / self.scale
    }

    fn cdf(&self, x: f64, tail: Tail) -> f64 {
        regularized_gamma(self.shape, x / self.scale, tail)
    }

    fn quantile(&self, p: f64, tail: Tail) -> Result<f64, DistributionError> {
        let p = DistributionError::check_probability(p)?;
        Ok(self.scale * standard_gamma_quantile(self.shape, p, tail)?)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }

    fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    fn variance(&self) -> f64 {
        self.shape * self.scale * self.scale
    }
}

/// Quantile of the unit-scale Gamma(α, 1) for the requested tail.
///
/// `p` must already lie in `[0, 1]`.
fn standard_gamma_quantile(shape: f64, p: f64, tail: Tail) -> Result<f64, DistributionError> {
    let (at_zero, at_one) = match tail {
        Tail::Lower => (0.0, f64::INFINITY),
        Tail::Upper => (f64::INFINITY, 0.0),
    };
    if p == 0.0 {
        return Ok(at_zero);
    }
    if p == 1.0 {
        return Ok(at_one);
    }

    // A quantile below the smallest normal double rounds to the bound
    let at_min = regularized_gamma(shape, f64::MIN_POSITIVE, tail);
    let underflows = match tail {
        Tail::Lower => at_min >= p,
        Tail::Upper => at_min <= p,
    };
    if underflows {
        debug!(shape, p, %tail, at_min, "gamma quantile underflows to the bound");
        return Ok(0.0);
    }

    // Residual in log-probability so the tolerance is relative to p
    let ln_p = p.ln();
    let objective = |u: f64| {
        let x = if u >= MAX_EXP_ARGUMENT {
            f64::INFINITY
        } else {
            u.exp()
        };
        ln_probability(regularized_gamma(shape, x, tail)) - ln_p
    };

    let u0 = initial_log_guess(shape, p, tail)?;
    let (lo, hi) = bracket(&objective, u0)?;
    trace!(shape, p, %tail, lo, hi, "gamma quantile bracket");

    let solver = BrentSolver::new(SolverConfig::high_precision());
    let x = solver.find_root(objective, lo, hi)?.exp();
    debug!(shape, p, %tail, x, "gamma quantile");
    Ok(x)
}

/// Quantile of `(G − α) / √α` for the requested tail.
///
/// Shapes below `LARGE_SHAPE` standardise the ordinary quantile; larger
/// shapes solve directly in `z` so no digits are lost to `α`.
fn standardized_gamma_quantile(
    shape: f64,
    p: f64,
    tail: Tail,
) -> Result<f64, DistributionError> {
    let root_shape = shape.sqrt();
    let (at_zero, at_one) = match tail {
        Tail::Lower => (-root_shape, f64::INFINITY),
        Tail::Upper => (f64::INFINITY, -root_shape),
    };
    if p == 0.0 {
        return Ok(at_zero);
    }
    if p == 1.0 {
        return Ok(at_one);
    }
    if shape < LARGE_SHAPE {
        let x = standard_gamma_quantile(shape, p, tail)?;
        return Ok((x - shape) / root_shape);
    }

    let ln_p = p.ln();
    let objective =
        |z: f64| ln_probability(regularized_gamma_standardized(shape, z, tail)) - ln_p;

    // Wilson–Hilferty: G ≈ α w³ with w = 1 + δ, so z = √α (3δ + 3δ² + δ³)
    let zn = standard_normal_quantile(p, tail)?;
    let delta = -1.0 / (9.0 * shape) + zn / (3.0 * root_shape);
    let z0 = (root_shape * delta * (3.0 + delta * (3.0 + delta))).max(-root_shape);

    let (lo, hi) = bracket(&objective, z0)?;
    trace!(shape, p, %tail, lo, hi, "standardised gamma quantile bracket");

    let solver = BrentSolver::new(SolverConfig::high_precision());
    let z = solver.find_root(objective, lo, hi)?;
    debug!(shape, p, %tail, z, "standardised gamma quantile");
    Ok(z)
}

/// `ln p`, floored at `LN_ZERO` so residuals stay finite when `p` underflows.
#[inline]
fn ln_probability(p: f64) -> f64 {
    if p > 0.0 {
        p.ln()
    } else {
        LN_ZERO
    }
}

/// Starting point `ln x₀` for the root search.
///
/// Wilson–Hilferty cube-root transform for `α ≥ 1`; for small shapes (or
/// when Wilson–Hilferty goes non-positive) the leading term of the series
/// `P(α, x) ≈ x^α / Γ(α + 1)`.
fn initial_log_guess(shape: f64, p: f64, tail: Tail) -> Result<f64, DistributionError> {
    if shape >= 1.0 {
        let z = standard_normal_quantile(p, tail)?;
        let w = 1.0 - 1.0 / (9.0 * shape) + z / (3.0 * shape.sqrt());
        let guess = shape * w * w * w;
        if guess > 0.0 && guess.is_finite() {
            return Ok(guess.ln());
        }
    }

    let lower_p = match tail {
        Tail::Lower => p,
        Tail::Upper => 1.0 - p,
    };
    // Stays in log form: for tiny shapes x₀ itself underflows
    Ok((lower_p.max(1e-300).ln() + ln_gamma(shape + 1.0)) / shape)
}

/// Expand `[u0 − ½, u0 + ½]` symmetrically, doubling the step, until the
/// objective changes sign. Used in both the `ln x` and the `z` coordinate.
fn bracket<F>(objective: &F, u0: f64) -> Result<(f64, f64), DistributionError>
where
    F: Fn(f64) -> f64,
{
    let mut step = 0.5;
    let mut lo = u0 - step;
    let mut hi = u0 + step;
    let mut f_lo = objective(lo);
    let mut f_hi = objective(hi);

    for _ in 0..MAX_BRACKET_EXPANSIONS {
        if f_lo.is_nan() || f_hi.is_nan() {
            break;
        }
        if !same_sign(f_lo, f_hi) {
            return Ok((lo, hi));
        }
        lo -= step;
        hi += step;
        step *= 2.0;
        f_lo = objective(lo);
        f_hi = objective(hi);
    }

    Err(SolverError::NoBracket { a: lo, b: hi }.into())
}

#[inline]
fn same_sign(a: f64, b: f64) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ==========================================================
    // Construction tests
    // ==========================================================

    #[test]
    fn test_new_validation() {
        assert!(Gamma::new(2.0, 3.0).is_ok());
        assert!(matches!(
            Gamma::new(0.0, 1.0),
            Err(DistributionError::InvalidShape { .. })
        ));
        assert!(matches!(
            Gamma::new(f64::NAN, 1.0),
            Err(DistributionError::InvalidShape { .. })
        ));
        assert!(matches!(
            Gamma::new(1.0, -2.0),
            Err(DistributionError::InvalidScale { .. })
        ));
    }

    // ==========================================================
    // Density tests
    // ==========================================================

    #[test]
    fn test_pdf_exponential() {
        let gamma = Gamma::new(1.0, 2.0).unwrap();
        for x in [0.1_f64, 1.0, 4.0, 10.0] {
            assert_relative_eq!(gamma.pdf(x), 0.5 * (-x / 2.0).exp(), max_relative = 1e-13);
        }
        assert_relative_eq!(gamma.pdf(0.0), 0.5);
    }

    #[test]
    fn test_pdf_shape_three() {
        // x² e^{-x} / 2
        let gamma = Gamma::new(3.0, 1.0).unwrap();
        let x = 2.5_f64;
        assert_relative_eq!(gamma.pdf(x), x * x * (-x).exp() / 2.0, max_relative = 1e-13);
    }

    #[test]
    fn test_pdf_boundaries() {
        assert_eq!(Gamma::new(0.5, 1.0).unwrap().pdf(0.0), f64::INFINITY);
        assert_eq!(Gamma::new(2.0, 1.0).unwrap().pdf(0.0), 0.0);
        assert_eq!(Gamma::new(2.0, 1.0).unwrap().pdf(-1.0), 0.0);
        assert_eq!(Gamma::new(2.0, 1.0).unwrap().pdf(f64::INFINITY), 0.0);
        assert!(Gamma::new(2.0, 1.0).unwrap().pdf(f64::NAN).is_nan());
    }

    // ==========================================================
    // CDF tests
    // ==========================================================

    #[test]
    fn test_cdf_scaling() {
        let gamma = Gamma::new(2.0, 3.0).unwrap();
        // Q(2, x) = (1 + x) e^{-x} at x = 6 / 3
        assert_relative_eq!(
            gamma.cdf(6.0, Tail::Upper),
            3.0 * (-2.0_f64).exp(),
            max_relative = 1e-13
        );
        assert_abs_diff_eq!(
            gamma.cdf(6.0, Tail::Lower) + gamma.cdf(6.0, Tail::Upper),
            1.0,
            epsilon = 1e-15
        );
    }

    // ==========================================================
    // Quantile tests
    // ==========================================================

    #[test]
    fn test_quantile_edges() {
        let gamma = Gamma::new(2.0, 1.0).unwrap();
        assert_eq!(gamma.quantile(0.0, Tail::Lower).unwrap(), 0.0);
        assert_eq!(gamma.quantile(1.0, Tail::Lower).unwrap(), f64::INFINITY);
        assert_eq!(gamma.quantile(0.0, Tail::Upper).unwrap(), f64::INFINITY);
        assert_eq!(gamma.quantile(1.0, Tail::Upper).unwrap(), 0.0);
        assert!(matches!(
            gamma.quantile(1.2, Tail::Lower),
            Err(DistributionError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_quantile_exponential_closed_form() {
        let gamma = Gamma::new(1.0, 1.0).unwrap();
        for p in [1e-10_f64, 0.01, 0.5, 0.99] {
            let x = gamma.quantile(p, Tail::Lower).unwrap();
            assert_relative_eq!(x, -(-p).ln_1p(), max_relative = 1e-10);
            let x_up = gamma.quantile(p, Tail::Upper).unwrap();
            assert_relative_eq!(x_up, -p.ln(), max_relative = 1e-10);
        }
    }

    #[test]
    fn test_quantile_round_trip_across_shapes() {
        for shape in [0.04, 0.16, 0.444, 1.0, 1.78, 4.0, 16.0, 44.4, 400.0, 40_000.0] {
            let gamma = Gamma::new(shape, 1.0).unwrap();
            for p in [1e-12, 1e-6, 1e-3, 0.1, 0.5, 0.9, 0.999, 1.0 - 1e-6] {
                for tail in [Tail::Lower, Tail::Upper] {
                    let x = gamma.quantile(p, tail).unwrap();
                    let back = gamma.cdf(x, tail);
                    assert!(
                        (back - p).abs() < 1e-10,
                        "shape = {}, p = {}, tail = {}: x = {}, back = {}",
                        shape,
                        p,
                        tail,
                        x,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_quantile_deep_upper_tail_precision() {
        // Q(1, x) = e^{-x}: x = 690.8 for p = 1e-300
        let gamma = Gamma::new(1.0, 1.0).unwrap();
        let x = gamma.quantile(1e-300, Tail::Upper).unwrap();
        assert_relative_eq!(x, 300.0 * 10f64.ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_quantile_below_smallest_double_is_zero() {
        // P(α, 2.2e-308) ≈ 2.2e-308^α / Γ(α + 1) lies above p
        for (shape, p) in [(0.25, 1e-100), (0.0625, 1e-50), (4.0 / 225.0, 1e-6)] {
            let gamma = Gamma::new(shape, 1.0).unwrap();
            assert_eq!(gamma.quantile(p, Tail::Lower).unwrap(), 0.0, "shape = {}", shape);
        }
        let gamma = Gamma::new(4.0 / 225.0, 1.0).unwrap();
        assert_eq!(gamma.quantile(1.0 - 1e-7, Tail::Upper).unwrap(), 0.0);
    }

    #[test]
    fn test_quantile_small_shapes_tiny_probabilities() {
        for shape in [4.0 / 225.0, 0.0625, 0.1, 0.25] {
            let gamma = Gamma::new(shape, 1.0).unwrap();
            for p in [1e-6, 1e-12, 1e-50, 1e-100] {
                for (tail, q) in [(Tail::Lower, p), (Tail::Upper, 1.0 - p)] {
                    let x = gamma.quantile(q, tail).unwrap();
                    if x > 0.0 {
                        let back = gamma.cdf(x, tail);
                        assert!(
                            ((back - q) / q).abs() < 1e-9,
                            "shape = {}, q = {}, tail = {}: x = {}, back = {}",
                            shape,
                            q,
                            tail,
                            x,
                            back
                        );
                    } else {
                        assert_eq!(x, 0.0);
                    }
                }
            }
        }
    }

    // ==========================================================
    // Standardised coordinate
    // ==========================================================

    #[test]
    fn test_standardized_quantile_edges() {
        let gamma = Gamma::new(1e6, 1.0).unwrap();
        assert_eq!(gamma.standardized_quantile(0.0, Tail::Lower).unwrap(), -1000.0);
        assert_eq!(gamma.standardized_quantile(1.0, Tail::Lower).unwrap(), f64::INFINITY);
        assert_eq!(gamma.standardized_quantile(0.0, Tail::Upper).unwrap(), f64::INFINITY);
        assert_eq!(gamma.standardized_quantile(1.0, Tail::Upper).unwrap(), -1000.0);
        assert!(matches!(
            gamma.standardized_quantile(-0.1, Tail::Lower),
            Err(DistributionError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_standardized_quantile_agrees_with_scaled_quantile() {
        for shape in [44.4, 400.0, 1e4] {
            let gamma = Gamma::new(shape, 1.0).unwrap();
            for p in [1e-9, 0.05, 0.5, 0.95] {
                for tail in [Tail::Lower, Tail::Upper] {
                    let z = gamma.standardized_quantile(p, tail).unwrap();
                    let x = gamma.quantile(p, tail).unwrap();
                    assert_abs_diff_eq!(z, (x - shape) / shape.sqrt(), epsilon = 1e-8);
                }
            }
        }
    }

    #[test]
    fn test_standardized_quantile_round_trip_huge_shapes() {
        for shape in [1e6, 4e12, 4e24] {
            let gamma = Gamma::new(shape, 1.0).unwrap();
            for p in [1e-100, 1e-12, 0.01, 0.5, 0.99] {
                for tail in [Tail::Lower, Tail::Upper] {
                    let z = gamma.standardized_quantile(p, tail).unwrap();
                    let back = gamma.standardized_cdf(z, tail);
                    assert!(
                        ((back - p) / p).abs() < 1e-9,
                        "shape = {}, p = {}, tail = {}: z = {}, back = {}",
                        shape,
                        p,
                        tail,
                        z,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_standardized_pdf_scales_density() {
        let gamma = Gamma::new(9.0, 2.0).unwrap();
        // x = β (α + 3z) at α = 9
        for z in [-1.5_f64, 0.0, 2.0] {
            let x = 2.0 * (9.0 + 3.0 * z);
            assert_relative_eq!(
                gamma.standardized_pdf(z),
                3.0 * 2.0 * gamma.pdf(x),
                max_relative = 1e-12
            );
            assert_relative_eq!(
                gamma.standardized_cdf(z, Tail::Upper),
                gamma.cdf(x, Tail::Upper),
                max_relative = 1e-12
            );
        }
    }

    // ==========================================================
    // Sampling and moments
    // ==========================================================

    #[test]
    fn test_moments() {
        let gamma = Gamma::new(4.0, 0.5).unwrap();
        assert_eq!(gamma.mean(), 2.0);
        assert_eq!(gamma.variance(), 1.0);
        assert_eq!(gamma.std_dev(), 1.0);
    }

    #[test]
    fn test_standardized_sampling_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 40_000;
        for shape in [0.5, 4.0, 1e20] {
            let gamma = Gamma::new(shape, 3.0).unwrap();
            let draws: Vec<f64> = (0..n).map(|_| gamma.sample_standardized(&mut rng)).collect();
            let mean = draws.iter().sum::<f64>() / n as f64;
            let variance = draws.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 0.04);
            assert_abs_diff_eq!(variance, 1.0, epsilon = 0.08);
            assert!(draws.iter().all(|&z| z >= -shape.sqrt()));
        }
    }

    #[test]
    fn test_sampling_mean() {
        let gamma = Gamma::new(3.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 50_000;
        let mean = (0..n).map(|_| gamma.sample(&mut rng)).sum::<f64>() / n as f64;
        assert_abs_diff_eq!(mean, 6.0, epsilon = 0.1);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_quantile_round_trip(
                shape in 0.05_f64..500.0,
                p in 1e-9_f64..(1.0 - 1e-9),
                upper in any::<bool>()
            ) {
                let tail = Tail::from_lower(!upper);
                let gamma = Gamma::new(shape, 1.0).unwrap();
                let x = gamma.quantile(p, tail).unwrap();
                prop_assert!((gamma.cdf(x, tail) - p).abs() < 1e-9);
            }
        }
    }
}
