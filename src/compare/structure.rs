//! Schema comparison logic

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ComparerError, Result};
use crate::logging::LogSink;
use crate::model::{CellType, ColumnDescriptor, Dataset};

use super::Side;

/// Outcome of comparing the column name/type schema of two datasets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralVerdict {
    /// Columns present on both sides with the same name and type, in primary order
    pub matched: Vec<ColumnDescriptor>,
    /// Primary columns missing or retyped on the secondary side (primary type),
    /// followed by secondary-only columns
    pub mismatched: Vec<ColumnDescriptor>,
    pub is_fully_matched: bool,
}

impl StructuralVerdict {
    /// Verdict for a comparison that could not run. This is never a match.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True when the verdict carries no information because an input was empty
    pub fn is_unknown(&self) -> bool {
        !self.is_fully_matched && self.matched.is_empty() && self.mismatched.is_empty()
    }

    /// True when no column is shared by both datasets
    pub fn is_disjoint(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn matched_names(&self) -> impl Iterator<Item = &str> {
        self.matched.iter().map(|c| c.name.as_str())
    }

    pub fn is_matched(&self, column: &str) -> bool {
        self.matched_names().any(|name| name == column)
    }
}

/// Compare the schemas of two datasets.
///
/// Fails with [`ComparerError::EmptyInput`] when either side has no rows or no
/// columns; callers should treat that as [`StructuralVerdict::unknown`].
pub fn compare_structure(
    primary: &Dataset,
    secondary: &Dataset,
    sink: LogSink<'_>,
) -> Result<StructuralVerdict> {
    for (side, dataset) in [(Side::Primary, primary), (Side::Secondary, secondary)] {
        if dataset.is_empty() {
            sink.error(format_args!(
                "{} dataset is empty. Stopping structural comparison!",
                side
            ));
            return Err(ComparerError::EmptyInput { side });
        }
    }

    sink.info(format_args!("Starting structural comparison of the 2 datasets."));

    let primary_types = column_types(primary);
    let secondary_types = column_types(secondary);

    let mut matched = Vec::new();
    let mut mismatched = Vec::new();

    for (&name, &primary_type) in &primary_types {
        match secondary_types.get(name) {
            Some(&secondary_type) if secondary_type == primary_type => {
                matched.push(ColumnDescriptor::new(name, primary_type));
            }
            Some(&secondary_type) => {
                sink.debug(format_args!(
                    "column '{}' type conflict: {} vs {}",
                    name, primary_type, secondary_type
                ));
                mismatched.push(ColumnDescriptor::new(name, primary_type));
            }
            None => mismatched.push(ColumnDescriptor::new(name, primary_type)),
        }
    }

    for (&name, &secondary_type) in &secondary_types {
        if !primary_types.contains_key(name) {
            mismatched.push(ColumnDescriptor::new(name, secondary_type));
        }
    }

    let is_fully_matched = mismatched.is_empty();
    sink.info(format_args!(
        "Structural comparison done: {} matched, {} mismatched columns",
        matched.len(),
        mismatched.len()
    ));

    Ok(StructuralVerdict {
        matched,
        mismatched,
        is_fully_matched,
    })
}

/// Column name to type, keeping the dataset's column order
fn column_types(dataset: &Dataset) -> IndexMap<&str, CellType> {
    dataset
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.inferred_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use crate::model::{CellValue, Column};

    fn ints(headers: &[&str], rows: &[&[i64]]) -> Dataset {
        Dataset::from_rows(
            headers,
            rows.iter()
                .map(|r| r.iter().map(|&v| CellValue::Int(v)).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        )
    }

    fn names(columns: &[ColumnDescriptor]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_identical_schema_matches() {
        let dataset = ints(&["A", "B", "C"], &[&[1, 3, 8], &[2, 5, 1]]);
        let verdict = compare_structure(&dataset, &dataset, LogSink::global()).unwrap();

        assert!(verdict.is_fully_matched);
        assert!(verdict.mismatched.is_empty());
        assert_eq!(names(&verdict.matched), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let primary = ints(&["A", "B"], &[&[1, 2]]);
        let secondary = ints(&["B", "A"], &[&[9, 9], &[7, 7]]);
        let verdict = compare_structure(&primary, &secondary, LogSink::global()).unwrap();

        assert!(verdict.is_fully_matched);
        assert_eq!(names(&verdict.matched), vec!["A", "B"]);
    }

    #[test]
    fn test_secondary_only_column() {
        let primary = ints(&["A", "B", "C"], &[&[1, 3, 8]]);
        let secondary = ints(&["A", "B", "C", "D"], &[&[1, 3, 8, 0]]);
        let verdict = compare_structure(&primary, &secondary, LogSink::global()).unwrap();

        assert!(!verdict.is_fully_matched);
        assert_eq!(names(&verdict.matched), vec!["A", "B", "C"]);
        assert_eq!(verdict.mismatched, vec![ColumnDescriptor::new("D", CellType::Int)]);
    }

    #[test]
    fn test_mismatch_ordering_and_type_conflict() {
        let primary = Dataset::from_rows(
            &["id", "price", "only_p"],
            vec![vec![CellValue::Int(1), CellValue::Int(10), CellValue::Int(0)]],
        );
        let secondary = Dataset::from_rows(
            &["only_s", "price", "id"],
            vec![vec![CellValue::from("x"), CellValue::Float(10.5), CellValue::Int(1)]],
        );
        let verdict = compare_structure(&primary, &secondary, LogSink::global()).unwrap();

        assert_eq!(names(&verdict.matched), vec!["id"]);
        assert_eq!(
            verdict.mismatched,
            vec![
                ColumnDescriptor::new("price", CellType::Int),
                ColumnDescriptor::new("only_p", CellType::Int),
                ColumnDescriptor::new("only_s", CellType::String),
            ]
        );
        assert!(!verdict.is_disjoint());
    }

    #[test]
    fn test_disjoint_schemas() {
        let primary = ints(&["A"], &[&[1]]);
        let secondary = ints(&["B"], &[&[1]]);
        let verdict = compare_structure(&primary, &secondary, LogSink::global()).unwrap();

        assert!(verdict.is_disjoint());
        assert!(!verdict.is_unknown());
        assert_eq!(names(&verdict.mismatched), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_input_is_an_error_and_logged() {
        let logger = MemoryLogger::default();
        let full = ints(&["A"], &[&[1]]);
        let no_rows = Dataset::new(vec![Column::with_type("A", 0, CellType::Int)]);

        let err = compare_structure(&full, &no_rows, LogSink::new(&logger)).unwrap_err();
        assert!(matches!(err, ComparerError::EmptyInput { side: Side::Secondary }));

        let err = compare_structure(&Dataset::empty(), &full, LogSink::new(&logger)).unwrap_err();
        assert!(matches!(err, ComparerError::EmptyInput { side: Side::Primary }));

        assert!(logger.has(log::Level::Error, "secondary dataset is empty"));
        assert!(logger.has(log::Level::Error, "primary dataset is empty"));
    }

    #[test]
    fn test_unknown_verdict() {
        let verdict = StructuralVerdict::unknown();
        assert!(verdict.is_unknown());
        assert!(!verdict.is_fully_matched);
    }
}
