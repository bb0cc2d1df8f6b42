//! Numerical building blocks.
//!
//! - [`special`]: Log-gamma, regularised incomplete gamma and error functions
//! - [`solvers`]: Bracketing root-finding used to invert cumulative distributions

pub mod solvers;
pub mod special;
