//! Pearson Type III distribution.
//!
//! Parameterised by the mean `xm`, the coefficient of variation `Cv` and the
//! skewness coefficient `Cs`. For non-zero skew it is a Gamma distribution
//! shifted to the lower bound `γ₀` and, for negative skew, reflected about it:
//!
//! ```text
//! α  = 4 / Cs²
//! β  = ½ · xm · Cv · |Cs|
//! γ₀ = xm · (1 − 2 Cv / Cs)
//! X  = γ₀ + sign(Cs) · β · G,   G ~ Gamma(α, 1)
//! ```
//!
//! With `Cs = 0` the distribution degenerates to Normal(xm, xm · Cv).
//!
//! Negative skew never gets its own derivation. Every operation maps `x` to
//! the reflected coordinate `y = sign(Cs) · (x − γ₀)` and, for cumulative
//! probabilities and quantiles, swaps the Gamma tail.
//!
//! Small skews give shapes of `LARGE_SHAPE` and above, with the bound `γ₀`
//! many standard deviations away. There the Gamma variable is addressed in
//! standard units, `z = sign(Cs) · (x − xm) / (xm · Cv)`, which is the same
//! as `(G − α) / √α` and avoids subtracting the distant bound.

use super::{ContinuousDistribution, DistributionError, Gamma, Normal};
use crate::moments::SampleMoments;
use hydro_core::math::special::LARGE_SHAPE;
use hydro_core::types::Tail;
use rand::Rng;
use tracing::debug;

/// Validated Pearson III parameter triple.
///
/// # Examples
/// ```
/// use hydro_stats::distributions::Pearson3Params;
///
/// let params = Pearson3Params::new(10.0, 0.3, 1.5).unwrap();
/// assert_eq!(params.std_dev(), 3.0);
/// assert!(Pearson3Params::new(10.0, 0.0, 1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pearson3Params {
    /// Mean `xm`.
    pub xm: f64,
    /// Coefficient of variation `Cv`.
    pub cv: f64,
    /// Skewness coefficient `Cs`.
    pub cs: f64,
}

impl Pearson3Params {
    /// Create and validate a parameter triple.
    ///
    /// # Errors
    /// - `InvalidCoefficientOfVariation` if `cv` is not positive and finite
    /// - `NonFiniteParameter` if `xm` or `cs` is NaN or infinite
    /// - `NonPositiveSpread` if `xm · cv <= 0`
    pub fn new(xm: f64, cv: f64, cs: f64) -> Result<Self, DistributionError> {
        let params = Self { xm, cv, cs };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameter invariants.
    pub fn validate(&self) -> Result<(), DistributionError> {
        if !(self.cv.is_finite() && self.cv > 0.0) {
            return Err(DistributionError::InvalidCoefficientOfVariation { cv: self.cv });
        }
        if !self.xm.is_finite() {
            return Err(DistributionError::NonFiniteParameter {
                name: "xm",
                value: self.xm,
            });
        }
        if !self.cs.is_finite() {
            return Err(DistributionError::NonFiniteParameter {
                name: "cs",
                value: self.cs,
            });
        }
        if self.xm * self.cv <= 0.0 {
            return Err(DistributionError::NonPositiveSpread {
                xm: self.xm,
                cv: self.cv,
            });
        }
        Ok(())
    }

    /// Standard deviation `xm · Cv`.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.xm * self.cv
    }

    /// Gamma shape `α = 4 / Cs²`.
    #[inline]
    pub fn shape(&self) -> f64 {
        4.0 / (self.cs * self.cs)
    }

    /// Gamma scale `β = ½ · xm · Cv · |Cs|`.
    #[inline]
    pub fn scale(&self) -> f64 {
        0.5 * self.xm * self.cv * self.cs.abs()
    }

    /// Bound `γ₀ = xm · (1 − 2 Cv / Cs)`; lower for positive skew, upper for
    /// negative skew.
    #[inline]
    pub fn location(&self) -> f64 {
        self.xm * (1.0 - 2.0 * self.cv / self.cs)
    }

    /// Standardised Gamma coordinate `sign(Cs) · (x − xm) / (xm · Cv)`.
    ///
    /// Equals `(G − α) / √α` for the Gamma variable behind `x`.
    #[inline]
    pub fn standardize(&self, x: f64, skew: SkewSign) -> f64 {
        skew.reflect((x - self.xm) / self.std_dev())
    }

    /// Resolve the parameters to the Normal or shifted-Gamma form.
    ///
    /// Any non-zero `Cs` gives the skewed form. The only exception is
    /// `|Cs| < 1.5e-154`, where `4 / Cs²` overflows; the skewed law then
    /// differs from its Normal limit by far less than one unit in the last
    /// place.
    ///
    /// # Errors
    /// Any validation error, or a Gamma construction error for extreme
    /// parameter combinations.
    pub fn form(&self) -> Result<Pearson3Form, DistributionError> {
        self.validate()?;
        match SkewSign::of(self.cs) {
            Some(skew) if self.shape().is_finite() => {
                let gamma = Gamma::new(self.shape(), self.scale())?;
                let location = self.location();
                debug!(
                    shape = gamma.shape(),
                    scale = gamma.scale(),
                    location,
                    ?skew,
                    "pearson3 skewed form"
                );
                Ok(Pearson3Form::Skewed {
                    gamma,
                    location,
                    skew,
                })
            }
            _ => {
                debug!(mean = self.xm, std_dev = self.std_dev(), "pearson3 normal form");
                Ok(Pearson3Form::Normal(Normal::new(self.xm, self.std_dev())?))
            }
        }
    }
}

/// Sign of the skewness coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkewSign {
    /// `Cs > 0`: bounded below, long right tail
    Positive,
    /// `Cs < 0`: bounded above, long left tail
    Negative,
}

impl SkewSign {
    /// Sign of `cs`, or `None` for zero and NaN.
    pub fn of(cs: f64) -> Option<Self> {
        if cs > 0.0 {
            Some(SkewSign::Positive)
        } else if cs < 0.0 {
            Some(SkewSign::Negative)
        } else {
            None
        }
    }

    /// `+1` or `−1`.
    #[inline]
    pub fn signum(self) -> f64 {
        match self {
            SkewSign::Positive => 1.0,
            SkewSign::Negative => -1.0,
        }
    }

    /// Map a signed offset from the bound to the Gamma coordinate and back
    /// (the reflection is its own inverse).
    #[inline]
    pub fn reflect(self, offset: f64) -> f64 {
        self.signum() * offset
    }

    /// Gamma tail that corresponds to `tail` of the Pearson III variable.
    #[inline]
    pub fn gamma_tail(self, tail: Tail) -> Tail {
        match self {
            SkewSign::Positive => tail,
            SkewSign::Negative => tail.flip(),
        }
    }
}

/// Resolved shape of a Pearson III distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pearson3Form {
    /// Zero skew.
    Normal(Normal),
    /// Shifted and possibly reflected Gamma.
    Skewed {
        /// Gamma with shape `α` and scale `β`
        gamma: Gamma,
        /// Bound `γ₀`
        location: f64,
        /// Direction of the reflection
        skew: SkewSign,
    },
}

/// Pearson Type III distribution.
///
/// # Examples
/// ```
/// use hydro_core::types::Tail;
/// use hydro_stats::distributions::{ContinuousDistribution, Pearson3};
///
/// let dist = Pearson3::new(10.0, 0.3, 1.5).unwrap();
///
/// // Lower bound γ₀ = 10 · (1 − 0.6 / 1.5) = 6
/// assert_eq!(dist.cdf(6.0, Tail::Lower), 0.0);
///
/// let x = dist.quantile(0.99, Tail::Lower).unwrap();
/// assert!((dist.cdf(x, Tail::Lower) - 0.99).abs() < 1e-10);
///
/// // 100-year event
/// let level = dist.return_level(100.0).unwrap();
/// assert!((level - x).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pearson3 {
    params: Pearson3Params,
    form: Pearson3Form,
}

impl Pearson3 {
    /// Create from mean, coefficient of variation and skewness coefficient.
    pub fn new(xm: f64, cv: f64, cs: f64) -> Result<Self, DistributionError> {
        Self::from_params(Pearson3Params { xm, cv, cs })
    }

    /// Create from a parameter triple.
    pub fn from_params(params: Pearson3Params) -> Result<Self, DistributionError> {
        let form = params.form()?;
        Ok(Self { params, form })
    }

    /// Method-of-moments fit: sample mean, `Cv = s / x̄` and the
    /// bias-adjusted sample skewness `G1`.
    ///
    /// # Errors
    /// `InsufficientData` or `NonFiniteParameter` from the moment estimate,
    /// or any parameter validation error (for instance a non-positive mean).
    pub fn fit_moments(data: &[f64]) -> Result<Self, DistributionError> {
        let moments = SampleMoments::from_slice(data)?;
        debug!(
            n = moments.count(),
            mean = moments.mean(),
            cv = moments.coefficient_of_variation(),
            skewness = moments.skewness(),
            "pearson3 moment fit"
        );
        Self::new(
            moments.mean(),
            moments.coefficient_of_variation(),
            moments.skewness(),
        )
    }

    /// Parameters.
    #[inline]
    pub fn params(&self) -> &Pearson3Params {
        &self.params
    }

    /// Resolved form.
    #[inline]
    pub fn form(&self) -> &Pearson3Form {
        &self.form
    }

    /// Skewness coefficient `Cs`.
    #[inline]
    pub fn skewness(&self) -> f64 {
        self.params.cs
    }

    /// Bound of the support (`None` for the Normal form).
    pub fn bound(&self) -> Option<f64> {
        match self.form {
            Pearson3Form::Normal(_) => None,
            Pearson3Form::Skewed { location, .. } => Some(location),
        }
    }

    /// Value exceeded on average once every `period` years.
    ///
    /// The non-exceedance probability is `1 − 1/T`; the upper tail `1/T` is
    /// passed to the quantile directly.
    ///
    /// # Errors
    /// `InvalidReturnPeriod` unless `period > 1` and finite.
    pub fn return_level(&self, period: f64) -> Result<f64, DistributionError> {
        if !(period.is_finite() && period > 1.0) {
            return Err(DistributionError::InvalidReturnPeriod { period });
        }
        self.quantile(1.0 / period, Tail::Upper)
    }
}

impl ContinuousDistribution for Pearson3 {
    fn pdf(&self, x: f64) -> f64 {
        match &self.form {
            Pearson3Form::Normal(normal) => normal.pdf(x),
            Pearson3Form::Skewed { gamma, skew, .. } if gamma.shape() >= LARGE_SHAPE => {
                let z = self.params.standardize(x, *skew);
                gamma.standardized_pdf(z) / self.params.std_dev()
            }
            Pearson3Form::Skewed {
                gamma,
                location,
                skew,
            } => {
                let y = skew.reflect(x - location);
                if y.is_nan() {
                    f64::NAN
                } else if y > 0.0 {
                    gamma.pdf(y)
                } else {
                    0.0
                }
            }
        }
    }

    fn cdf(&self, x: f64, tail: Tail) -> f64 {
        match &self.form {
            Pearson3Form::Normal(normal) => normal.cdf(x, tail),
            Pearson3Form::Skewed { gamma, skew, .. } if gamma.shape() >= LARGE_SHAPE => {
                gamma.standardized_cdf(self.params.standardize(x, *skew), skew.gamma_tail(tail))
            }
            Pearson3Form::Skewed {
                gamma,
                location,
                skew,
            } => gamma.cdf(skew.reflect(x - location), skew.gamma_tail(tail)),
        }
    }

    fn quantile(&self, p: f64, tail: Tail) -> Result<f64, DistributionError> {
        match &self.form {
            Pearson3Form::Normal(normal) => normal.quantile(p, tail),
            Pearson3Form::Skewed { gamma, skew, .. } if gamma.shape() >= LARGE_SHAPE => {
                let z = gamma.standardized_quantile(p, skew.gamma_tail(tail))?;
                Ok(self.params.xm + skew.reflect(self.params.std_dev() * z))
            }
            Pearson3Form::Skewed {
                gamma,
                location,
                skew,
            } => {
                let g = gamma.quantile(p, skew.gamma_tail(tail))?;
                Ok(location + skew.reflect(g))
            }
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.form {
            Pearson3Form::Normal(normal) => normal.sample(rng),
            Pearson3Form::Skewed { gamma, skew, .. } if gamma.shape() >= LARGE_SHAPE => {
                let z = gamma.sample_standardized(rng);
                self.params.xm + skew.reflect(self.params.std_dev() * z)
            }
            Pearson3Form::Skewed {
                gamma,
                location,
                skew,
            } => location + skew.reflect(gamma.sample(rng)),
        }
    }

    fn mean(&self) -> f64 {
        self.params.xm
    }

    fn variance(&self) -> f64 {
        let sd = self.params.std_dev();
        sd * sd
    }
}
