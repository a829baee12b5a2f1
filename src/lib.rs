//! datasweep - Clean and convert tabular data files
//!
//! Loads CSV, Excel, HTML and Markdown tables into a uniform [`Table`],
//! applies optional cleaning (deduplication, mean imputation, column
//! selection) and renders the result in any of the supported formats.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod transform;

pub use config::ConvertOptions;
pub use error::{FileError, SweepError};
pub use format::Format;
pub use model::Table;
pub use pipeline::{process, process_batch, Conversion, InputFile};
