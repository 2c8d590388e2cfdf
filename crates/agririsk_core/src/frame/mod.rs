//! Column-oriented tabular data.
//!
//! - [`Column`]: typed storage for one named field
//! - [`Dataset`]: ordered set of equally long columns

mod column;
mod dataset;

pub use column::Column;
pub use dataset::Dataset;
