//! # hydro_core: Numerical Foundation for the Hydro Workspace
//!
//! ## Layer 1 (Foundation) Role
//!
//! hydro_core is the bottom layer of the workspace, providing:
//! - Special functions: `ln Γ`, regularised incomplete gamma `P`/`Q`, `erf`/`erfc` (`math::special`)
//! - Root-finding: [`BrentSolver`](math::solvers::BrentSolver) with [`SolverConfig`](math::solvers::SolverConfig) (`math::solvers`)
//! - Tail selection for cumulative probabilities: [`Tail`](types::Tail) (`types::tail`)
//! - Error types: [`SolverError`](types::SolverError) (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other hydro_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use hydro_core::math::special::{erfc, regularized_gamma};
//! use hydro_core::math::solvers::{BrentSolver, SolverConfig};
//! use hydro_core::types::Tail;
//!
//! // P(1, x) = 1 - exp(-x)
//! let p = regularized_gamma(1.0, 2.0, Tail::Lower);
//! assert!((p - (1.0 - (-2.0_f64).exp())).abs() < 1e-14);
//!
//! // erfc(0) = 1
//! assert!((erfc(0.0) - 1.0).abs() < 1e-15);
//!
//! // Solve x² - 2 = 0 in [0, 2]
//! let solver = BrentSolver::new(SolverConfig::high_precision());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Derive `Serialize`/`Deserialize` on public value types

pub mod math;
pub mod types;
