//! Numerical building blocks.
//!
//! - `stats`: descriptive statistics and standardisation helpers
//! - `linalg`: dense row-major matrices and a Cholesky solver
//! - `scaling`: a fitted per-column standard scaler

pub mod linalg;
pub mod scaling;
pub mod stats;

pub use linalg::{solve_cholesky, Matrix};
pub use scaling::StandardScaler;
