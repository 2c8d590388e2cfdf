//! # AgriRisk Loader (Adapter Layer)
//!
//! Moves datasets between delimited files and [`Dataset`](agririsk_core::frame::Dataset).
//!
//! - [`read_dataset`]: header row plus records, with per-column type inference
//! - [`write_dataset`]: snapshot export in the same text conventions
//! - [`write_records`]: any serialisable rows, e.g. the proxy agreement table
//!
//! No pipeline logic lives here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod error;
pub mod reader;
pub mod writer;

pub use error::LoaderError;
pub use reader::{infer_column, read_dataset, read_dataset_from};
pub use writer::{write_dataset, write_dataset_to, write_records};
