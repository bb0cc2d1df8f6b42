//! Solver configuration.

use crate::types::SolverError;
use num_traits::Float;

/// Stopping rule for bracketing root finders.
///
/// `tolerance` bounds the width of the final bracket around the root,
/// widened by the floating-point spacing at the estimate. The residual
/// `|f(x)|` only ends the search when it is exactly zero.
///
/// # Presets
///
/// | Preset | Tolerance | Iterations |
/// |--------|-----------|------------|
/// | [`default`](Self::default) | 1e-10 | 100 |
/// | [`high_precision`](Self::high_precision) | 1e-14 | 500 |
/// | [`fast`](Self::fast) | 1e-6 | 50 |
///
/// # Example
///
/// ```
/// use hydro_core::math::solvers::SolverConfig;
///
/// let config = SolverConfig::<f64>::fast().with_max_iterations(80);
/// assert_eq!(config.max_iterations, 80);
///
/// assert!(SolverConfig::new(0.0_f64, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Bracket-width tolerance
    pub tolerance: T,
    /// Iteration budget before `SolverError::MaxIterationsExceeded`
    pub max_iterations: usize,
}

impl<T: Float> SolverConfig<T> {
    fn preset(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance: T::from(tolerance).unwrap_or_else(T::epsilon),
            max_iterations,
        }
    }

    /// Checked construction.
    ///
    /// # Errors
    /// `InvalidConfiguration` unless `tolerance` is finite and positive and
    /// `max_iterations > 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the tolerance and iteration budget.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.tolerance.is_finite() && self.tolerance > T::zero() && self.max_iterations > 0 {
            Ok(())
        } else {
            Err(SolverError::InvalidConfiguration {
                tolerance: self.tolerance.to_f64().unwrap_or(f64::NAN),
                max_iterations: self.max_iterations,
            })
        }
    }

    /// Tight stopping rule for distribution quantiles.
    pub fn high_precision() -> Self {
        Self::preset(1e-14, 500)
    }

    /// Loose stopping rule for exploratory work.
    pub fn fast() -> Self {
        Self::preset(1e-6, 50)
    }

    /// Replace the tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl<T: Float> Default for SolverConfig<T> {
    fn default() -> Self {
        Self::preset(1e-10, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default: SolverConfig<f64> = SolverConfig::default();
        assert_eq!(default.tolerance, 1e-10);
        assert_eq!(default.max_iterations, 100);

        let precise: SolverConfig<f64> = SolverConfig::high_precision();
        assert_eq!(precise.tolerance, 1e-14);
        assert_eq!(precise.max_iterations, 500);

        let fast: SolverConfig<f64> = SolverConfig::fast();
        assert_eq!(fast.tolerance, 1e-6);
        assert_eq!(fast.max_iterations, 50);
    }

    #[test]
    fn test_checked_construction() {
        assert!(SolverConfig::new(1e-12_f64, 200).is_ok());
        assert_eq!(
            SolverConfig::new(0.0_f64, 100),
            Err(SolverError::InvalidConfiguration {
                tolerance: 0.0,
                max_iterations: 100
            })
        );
        assert!(SolverConfig::new(f64::NAN, 100).is_err());
        assert!(SolverConfig::new(1e-10_f64, 0).is_err());
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::<f64>::default()
            .with_tolerance(1e-8)
            .with_max_iterations(10);
        assert_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 10);
        assert!(config.validate().is_ok());
        assert!(config.with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_f32_presets() {
        let config: SolverConfig<f32> = SolverConfig::high_precision();
        assert!(config.tolerance > 0.0);
        assert!(config.validate().is_ok());
    }
}
