//! Data model for tabular data representation

mod dataset;
mod schema;

pub use dataset::{CellValue, Dataset, Row};
pub use schema::{CellType, Column, ColumnDescriptor};
