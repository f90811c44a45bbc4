//! Error types for comparison operations

use std::path::PathBuf;

use thiserror::Error;

use crate::compare::Side;

pub type Result<T> = std::result::Result<T, ComparerError>;

#[derive(Error, Debug)]
pub enum ComparerError {
    #[error("{side} dataset is empty, structural comparison cannot proceed")]
    EmptyInput { side: Side },

    #[error("line identifier column '{column}' is not among the structurally matched columns")]
    IdentifierNotComparable { column: String },

    #[error(
        "duplicate line identifier {value} in {side} dataset (rows {first_row} and {duplicate_row})"
    )]
    DuplicateIdentifier {
        side: Side,
        value: String,
        first_row: usize,
        duplicate_row: usize,
    },

    #[error("missing line identifier in {side} dataset at row {row}")]
    NullIdentifier { side: Side, row: usize },

    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("export directory does not exist: {}", path.display())]
    ExportDirectory { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComparerError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn identifier_not_comparable(column: impl Into<String>) -> Self {
        Self::IdentifierNotComparable {
            column: column.into(),
        }
    }
}
