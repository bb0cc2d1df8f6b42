//! Tail selection and solver errors shared by every crate in the workspace.

pub mod error;
pub mod tail;

pub use error::SolverError;
pub use tail::Tail;
