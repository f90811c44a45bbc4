//! Delimited text file parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ComparerError, Result};
use crate::model::{CellValue, Column, Dataset};

use super::Parser;

/// Parser for comma or tab separated files with a header row
pub struct CsvParser {
    delimiter: u8,
    extensions: &'static [&'static str],
}

impl CsvParser {
    pub fn comma() -> Self {
        Self {
            delimiter: b',',
            extensions: &["csv", "txt"],
        }
    }

    pub fn tab() -> Self {
        Self {
            delimiter: b'\t',
            extensions: &["tsv", "tab"],
        }
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ComparerError::parse(path, format!("failed to read headers: {}", e)))?
            .clone();

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.trim(), i))
            .collect();

        let mut dataset = Dataset::new(columns);

        for (line_num, result) in csv_reader.records().enumerate() {
            // +2 for 1-indexing and header
            let record = result.map_err(|e| {
                ComparerError::parse(path, format!("row {}: {}", line_num + 2, e))
            })?;

            let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            dataset.add_row(cells, line_num + 2);
        }

        dataset.infer_column_types();

        Ok(dataset)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        self.extensions.contains(&ext.to_lowercase().as_str())
    }
}

/// Parse a string value into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // ISO 8601, with either separator
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }

    CellValue::String(Cow::Owned(trimmed.to_string()))
}
