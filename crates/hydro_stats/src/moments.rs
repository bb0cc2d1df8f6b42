//! Sample moments for method-of-moments fitting.

use crate::distributions::DistributionError;

/// Minimum sample size for a skewness estimate.
pub const MIN_SAMPLE_SIZE: usize = 3;

/// Mean, standard deviation and skewness of a sample.
///
/// Central moments are accumulated in a single pass with Welford-style
/// updates, so large offsets in the data do not cancel.
///
/// # Examples
/// ```
/// use hydro_stats::moments::SampleMoments;
///
/// let m = SampleMoments::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(m.mean(), 5.0);
/// assert!((m.std_dev() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleMoments {
    count: usize,
    mean: f64,
    std_dev: f64,
    skewness: f64,
}

impl SampleMoments {
    /// Estimate moments from a slice of observations.
    ///
    /// - `std_dev` uses the `n − 1` denominator
    /// - `skewness` is the adjusted Fisher–Pearson coefficient
    ///   `G1 = √(n(n−1)) / (n−2) · m₃ / m₂^{3/2}`, zero for a constant sample
    ///
    /// # Errors
    /// - `InsufficientData` for fewer than three values
    /// - `NonFiniteParameter` if any value is NaN or infinite
    pub fn from_slice(data: &[f64]) -> Result<Self, DistributionError> {
        if data.len() < MIN_SAMPLE_SIZE {
            return Err(DistributionError::InsufficientData {
                required: MIN_SAMPLE_SIZE,
                found: data.len(),
            });
        }
        if let Some(&value) = data.iter().find(|v| !v.is_finite()) {
            return Err(DistributionError::NonFiniteParameter {
                name: "sample",
                value,
            });
        }

        let mut n = 0.0_f64;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        for &x in data {
            let n1 = n;
            n += 1.0;
            let delta = x - mean;
            let delta_n = delta / n;
            let term = delta * delta_n * n1;
            mean += delta_n;
            m3 += term * delta_n * (n - 2.0) - 3.0 * delta_n * m2;
            m2 += term;
        }

        let std_dev = (m2 / (n - 1.0)).sqrt();
        let skewness = if m2 > 0.0 {
            let g1 = (m3 / n) / (m2 / n).powf(1.5);
            (n * (n - 1.0)).sqrt() / (n - 2.0) * g1
        } else {
            0.0
        };

        Ok(Self {
            count: data.len(),
            mean,
            std_dev,
            skewness,
        })
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (`n − 1` denominator).
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Adjusted sample skewness `G1`.
    #[inline]
    pub fn skewness(&self) -> f64 {
        self.skewness
    }

    /// `std_dev / mean`.
    #[inline]
    pub fn coefficient_of_variation(&self) -> f64 {
        self.std_dev / self.mean
    }
}
