//! Error types for distribution construction and evaluation.
//!
//! This module provides:
//! - `DistributionError`: Parameter, probability and solver failures

use hydro_core::types::SolverError;
use thiserror::Error;

/// Distribution errors.
///
/// Provides structured error handling for distribution construction,
/// quantile evaluation and moment fitting, carrying the offending value.
///
/// # Variants
/// - `InvalidCoefficientOfVariation`: Non-positive or non-finite `Cv`
/// - `NonFiniteParameter`: NaN or infinite parameter
/// - `NonPositiveSpread`: Implied standard deviation `xm · Cv` is not positive
/// - `InvalidStandardDeviation`: Non-positive Normal standard deviation
/// - `InvalidShape` / `InvalidScale`: Non-positive Gamma parameters
/// - `ProbabilityOutOfRange`: Probability outside `[0, 1]`
/// - `InvalidReturnPeriod`: Return period not greater than one
/// - `InsufficientData`: Too few observations for a moment estimate
/// - `Sampler`: Random variate generator rejected its parameters
/// - `Solver`: Quantile root-finding failed
///
/// # Examples
/// ```
/// use hydro_stats::distributions::DistributionError;
///
/// let err = DistributionError::InvalidCoefficientOfVariation { cv: -0.3 };
/// assert!(format!("{}", err).contains("coefficient of variation"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DistributionError {
    /// Coefficient of variation is not a positive finite number.
    #[error("Invalid coefficient of variation: Cv = {cv}")]
    InvalidCoefficientOfVariation {
        /// The invalid coefficient of variation
        cv: f64,
    },

    /// A parameter is NaN or infinite.
    #[error("Non-finite parameter: {name} = {value}")]
    NonFiniteParameter {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Implied spread `xm · Cv` is not positive.
    #[error("Non-positive spread: xm · Cv = {xm} · {cv} <= 0")]
    NonPositiveSpread {
        /// Mean
        xm: f64,
        /// Coefficient of variation
        cv: f64,
    },

    /// Normal standard deviation is not a positive finite number.
    #[error("Invalid standard deviation: σ = {std_dev}")]
    InvalidStandardDeviation {
        /// The invalid standard deviation
        std_dev: f64,
    },

    /// Gamma shape is not a positive finite number.
    #[error("Invalid shape: α = {shape}")]
    InvalidShape {
        /// The invalid shape
        shape: f64,
    },

    /// Gamma scale is not a positive finite number.
    #[error("Invalid scale: β = {scale}")]
    InvalidScale {
        /// The invalid scale
        scale: f64,
    },

    /// Probability outside `[0, 1]` or NaN.
    #[error("Probability out of range: p = {p}")]
    ProbabilityOutOfRange {
        /// The invalid probability
        p: f64,
    },

    /// Return period must exceed one.
    #[error("Invalid return period: T = {period}")]
    InvalidReturnPeriod {
        /// The invalid return period
        period: f64,
    },

    /// Not enough observations for the requested estimate.
    #[error("Insufficient data: {required} values required, {found} found")]
    InsufficientData {
        /// Minimum number of values
        required: usize,
        /// Number of values supplied
        found: usize,
    },

    /// Random variate generator could not be constructed.
    #[error("Sampler error: {message}")]
    Sampler {
        /// Description from the generator
        message: String,
    },

    /// Root-finding failure while inverting a CDF.
    #[error("Quantile solver failed: {0}")]
    Solver(#[from] SolverError),
}

impl DistributionError {
    /// Validate a probability, returning it unchanged when it lies in `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use hydro_stats::distributions::DistributionError;
    ///
    /// assert_eq!(DistributionError::check_probability(0.25), Ok(0.25));
    /// assert!(DistributionError::check_probability(1.5).is_err());
    /// ```
    pub fn check_probability(p: f64) -> Result<f64, Self> {
        if (0.0..=1.0).contains(&p) {
            Ok(p)
        } else {
            Err(DistributionError::ProbabilityOutOfRange { p })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================
    // Display tests
    // ==========================================================

    #[test]
    fn test_invalid_cv_display() {
        let err = DistributionError::InvalidCoefficientOfVariation { cv: 0.0 };
        assert_eq!(format!("{}", err), "Invalid coefficient of variation: Cv = 0");
    }

    #[test]
    fn test_non_finite_display() {
        let err = DistributionError::NonFiniteParameter {
            name: "xm",
            value: f64::INFINITY,
        };
        assert_eq!(format!("{}", err), "Non-finite parameter: xm = inf");
    }

    #[test]
    fn test_probability_display() {
        let err = DistributionError::ProbabilityOutOfRange { p: 1.5 };
        assert_eq!(format!("{}", err), "Probability out of range: p = 1.5");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = DistributionError::InsufficientData {
            required: 3,
            found: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Insufficient data: 3 values required, 2 found"
        );
    }

    #[test]
    fn test_from_solver_error() {
        let err: DistributionError = SolverError::MaxIterationsExceeded { iterations: 500 }.into();
        assert!(matches!(err, DistributionError::Solver(_)));
        assert!(format!("{}", err).contains("500 iterations"));
    }

    #[test]
    fn test_check_probability() {
        assert_eq!(DistributionError::check_probability(0.0), Ok(0.0));
        assert_eq!(DistributionError::check_probability(1.0), Ok(1.0));
        assert!(DistributionError::check_probability(-1e-12).is_err());
        assert!(DistributionError::check_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = DistributionError::InvalidShape { shape: -1.0 };
        let _: &dyn std::error::Error = &err;
    }
}
