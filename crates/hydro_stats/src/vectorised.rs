//! Elementwise Pearson III entry points.
//!
//! Each function validates `(xm, cv, cs)` once, resolves the distribution
//! form once, then maps over the input slice preserving order.
//!
//! # Examples
//! ```
//! use hydro_core::types::Tail;
//! use hydro_stats::{dpearson3, ppearson3, qpearson3};
//!
//! let p = ppearson3(&[8.0, 10.0, 15.0], 10.0, 0.3, 1.5, Tail::Lower).unwrap();
//! assert!(p[0] < p[1] && p[1] < p[2]);
//!
//! let x = qpearson3(&p, 10.0, 0.3, 1.5, Tail::Lower).unwrap();
//! assert!((x[2] - 15.0).abs() < 1e-8);
//!
//! let d = dpearson3(&[10.0], 10.0, 0.3, 0.0).unwrap();
//! assert!((d[0] - 1.0 / (3.0 * (2.0 * std::f64::consts::PI).sqrt())).abs() < 1e-15);
//! ```

use crate::distributions::{ContinuousDistribution, DistributionError, Pearson3};
use hydro_core::types::Tail;
use rand::Rng;

/// Density of Pearson III at each `x`.
///
/// # Errors
/// Parameter validation errors (see
/// [`Pearson3Params::validate`](crate::distributions::Pearson3Params::validate)).
pub fn dpearson3(x: &[f64], xm: f64, cv: f64, cs: f64) -> Result<Vec<f64>, DistributionError> {
    let dist = Pearson3::new(xm, cv, cs)?;
    Ok(x.iter().map(|&v| dist.pdf(v)).collect())
}

/// Cumulative probability of the requested tail at each `q`.
///
/// # Errors
/// Parameter validation errors.
pub fn ppearson3(
    q: &[f64],
    xm: f64,
    cv: f64,
    cs: f64,
    tail: Tail,
) -> Result<Vec<f64>, DistributionError> {
    let dist = Pearson3::new(xm, cv, cs)?;
    Ok(q.iter().map(|&v| dist.cdf(v, tail)).collect())
}

/// Quantile for each probability `p` of the requested tail.
///
/// # Errors
/// Parameter validation errors, `ProbabilityOutOfRange` for the first `p`
/// outside `[0, 1]`, or `Solver` if an inversion fails.
pub fn qpearson3(
    p: &[f64],
    xm: f64,
    cv: f64,
    cs: f64,
    tail: Tail,
) -> Result<Vec<f64>, DistributionError> {
    let dist = Pearson3::new(xm, cv, cs)?;
    p.iter().map(|&v| dist.quantile(v, tail)).collect()
}

/// `n` independent Pearson III variates in generation order.
///
/// # Errors
/// Parameter validation errors.
pub fn rpearson3<R: Rng + ?Sized>(
    n: usize,
    xm: f64,
    cv: f64,
    cs: f64,
    rng: &mut R,
) -> Result<Vec<f64>, DistributionError> {
    let dist = Pearson3::new(xm, cv, cs)?;
    Ok(dist.sample_n(n, rng))
}
