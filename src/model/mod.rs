//! Data model for tabular data representation

mod schema;
mod table;

pub use schema::{CellType, Column};
pub use table::{CellValue, Row, Table};
pub(crate) use table::exact_i64;
