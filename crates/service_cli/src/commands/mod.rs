//! Subcommands of the `hydro` binary, one module each.

pub mod check;
pub mod et0;
pub mod pearson3;
