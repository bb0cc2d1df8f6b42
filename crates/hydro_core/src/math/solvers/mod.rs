//! Bracketing root finders.
//!
//! The Gamma family has no closed-form inverse CDF, so `hydro_stats` finds
//! quantiles as roots of a residual in `ln F(x) - ln p` and hands them to
//! [`BrentSolver`]. [`SolverConfig`] carries the tolerance and iteration
//! budget and rejects stopping rules that cannot terminate.
//!
//! ```
//! use hydro_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Median of the unit exponential: 1 - exp(-x) = 0.5
//! let solver = BrentSolver::new(SolverConfig::high_precision());
//! let median = solver
//!     .find_root(|x: f64| 1.0 - (-x).exp() - 0.5, 0.0, 10.0)
//!     .unwrap();
//! assert!((median - std::f64::consts::LN_2).abs() < 1e-12);
//! ```

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
