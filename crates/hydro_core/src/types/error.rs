//! Root-finding errors.

use thiserror::Error;

/// Failure of a bracketing root search.
///
/// Quantile inversion surfaces these through the distribution layer, so the
/// messages name the bracket and iteration budget the caller can adjust.
///
/// ```
/// use hydro_core::types::SolverError;
///
/// let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
/// assert_eq!(err.to_string(), "root not bracketed by [0, 1]");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Iteration budget spent before the stopping rule was met.
    #[error("no convergence within {iterations} iterations")]
    MaxIterationsExceeded {
        /// Budget that was exhausted
        iterations: usize,
    },

    /// The objective has the same strict sign at both endpoints.
    #[error("root not bracketed by [{a}, {b}]")]
    NoBracket {
        /// Lower endpoint
        a: f64,
        /// Upper endpoint
        b: f64,
    },

    /// The objective produced NaN.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Tolerance not finite and positive, or zero iterations.
    #[error("invalid solver configuration (tolerance {tolerance}, {max_iterations} iterations)")]
    InvalidConfiguration {
        /// Requested tolerance
        tolerance: f64,
        /// Requested iteration budget
        max_iterations: usize,
    },
}
