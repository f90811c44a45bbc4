//! Parser layer for reading tabular data files into datasets

mod csv;
mod json;

use std::path::Path;

use crate::error::{ComparerError, Result};
use crate::logging::LogSink;
use crate::model::Dataset;

pub use self::csv::CsvParser;
pub use self::json::JsonParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Dataset
    fn parse(&self, path: &Path) -> Result<Dataset>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser::comma()),
                Box::new(CsvParser::tab()),
                Box::new(JsonParser),
            ],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.parsers
            .iter()
            .find(|parser| parser.supports_extension(&ext))
            .map(|parser| parser.as_ref())
            .ok_or_else(|| ComparerError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Dataset> {
        let parser = self.get_parser(path)?;
        parser.parse(path)
    }
}

/// Load a dataset, falling back to an empty one.
///
/// A missing path, an unsupported format or a parse failure is logged at error
/// level and yields [`Dataset::empty`], which the comparison reports as
/// "could not proceed".
pub fn load_dataset(path: &Path, sink: LogSink<'_>) -> Dataset {
    if !path.exists() {
        sink.error(format_args!(
            "Unable to read data. Invalid path provided: {}. Returning empty dataset.",
            path.display()
        ));
        return Dataset::empty();
    }

    sink.info(format_args!(
        "Path {} available. Reading data file.",
        path.display()
    ));

    match ParserFactory::new().parse(path) {
        Ok(dataset) => {
            sink.info(format_args!(
                "Loaded {} rows x {} columns from {}",
                dataset.row_count(),
                dataset.column_count(),
                path.display()
            ));
            dataset
        }
        Err(e) => {
            sink.error(format_args!(
                "Unable to read data: {}. Returning empty dataset.",
                e
            ));
            Dataset::empty()
        }
    }
}
