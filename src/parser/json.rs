//! JSON array parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::{ComparerError, Result};
use crate::model::{CellValue, Column, Dataset};

use super::Parser;

/// Parser for JSON files holding an array of objects
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;

        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => return Err(ComparerError::parse(path, "JSON must be an array or object")),
        };

        // Columns in first-seen order across all objects
        let mut column_names: IndexSet<String> = IndexSet::new();
        for item in &array {
            if let Value::Object(obj) = item {
                column_names.extend(obj.keys().cloned());
            }
        }

        let columns: Vec<Column> = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.clone(), i))
            .collect();

        let mut dataset = Dataset::new(columns);

        for (line_num, item) in array.iter().enumerate() {
            let Value::Object(obj) = item else {
                return Err(ComparerError::parse(
                    path,
                    format!("element {} is not an object", line_num),
                ));
            };
            let cells = column_names
                .iter()
                .map(|key| json_value_to_cell(obj.get(key)))
                .collect();
            dataset.add_row(cells, line_num + 1);
        }

        dataset.infer_column_types();

        Ok(dataset)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(Cow::Owned(n.to_string()))
            }
        }
        Some(Value::String(s)) => {
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return CellValue::Date(date);
            }
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return CellValue::DateTime(dt);
            }
            CellValue::String(Cow::Owned(s.clone()))
        }
        // Nested values are compared by their serialized form
        Some(nested) => CellValue::String(Cow::Owned(nested.to_string())),
    }
}
