//! Row alignment and field comparison keyed by the line identifier

use rustc_hash::FxHashMap;

use crate::error::{ComparerError, Result};
use crate::logging::LogSink;
use crate::model::{CellValue, Dataset, Row};

use super::structure::StructuralVerdict;
use super::{ExclusiveRow, FieldDifference, RowDifference, Side};

static NULL: CellValue = CellValue::Null;

/// Findings of the content comparison
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentComparison {
    /// Primary rows with at least one differing field, in primary row order
    pub differences: Vec<RowDifference>,
    /// Primary rows whose identifier is absent from the secondary dataset
    pub primary_exclusive: Vec<ExclusiveRow>,
    /// Secondary rows whose identifier is absent from the primary dataset
    pub secondary_exclusive: Vec<ExclusiveRow>,
}

/// Positions of the matched columns within one dataset
struct Projection<'a> {
    side: Side,
    dataset: &'a Dataset,
    /// Index of each matched column, in verdict order
    columns: Vec<usize>,
    /// Index of the identifier column
    id_column: usize,
}

impl<'a> Projection<'a> {
    fn new(
        side: Side,
        dataset: &'a Dataset,
        verdict: &StructuralVerdict,
        line_id: &str,
    ) -> Result<Self> {
        let columns = verdict
            .matched_names()
            .map(|name| {
                dataset
                    .column_index(name)
                    .ok_or_else(|| ComparerError::identifier_not_comparable(name))
            })
            .collect::<Result<Vec<_>>>()?;
        let id_column = dataset
            .column_index(line_id)
            .ok_or_else(|| ComparerError::identifier_not_comparable(line_id))?;

        Ok(Self {
            side,
            dataset,
            columns,
            id_column,
        })
    }

    fn identifier<'r>(&self, row: &'r Row) -> &'r CellValue {
        row.get(self.id_column).unwrap_or(&NULL)
    }

    fn project(&self, row: &Row) -> Vec<CellValue> {
        self.columns
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or(CellValue::Null))
            .collect()
    }

    /// Map each identifier value to its row position.
    ///
    /// Identifiers must be present and unique on each side; the first offending
    /// row is reported.
    fn index(&self) -> Result<FxHashMap<&'a CellValue, usize>> {
        let mut index = FxHashMap::default();
        index.reserve(self.dataset.row_count());

        for (pos, row) in self.dataset.rows.iter().enumerate() {
            let id = self.identifier(row);
            if id.is_null() {
                return Err(ComparerError::NullIdentifier {
                    side: self.side,
                    row: pos,
                });
            }
            if let Some(&first_row) = index.get(id) {
                return Err(ComparerError::DuplicateIdentifier {
                    side: self.side,
                    value: id.display().into_owned(),
                    first_row,
                    duplicate_row: pos,
                });
            }
            index.insert(id, pos);
        }

        Ok(index)
    }

    fn exclusive(&self, pos: usize, row: &Row) -> ExclusiveRow {
        ExclusiveRow {
            side: self.side,
            index: pos,
            identifier: self.identifier(row).clone(),
            cells: self.project(row),
        }
    }
}

/// Align rows of both datasets by `line_id` and collect field differences and
/// exclusive rows.
///
/// Only the columns in `verdict.matched` take part; `line_id` must be one of
/// them. Values are compared with exact equality.
pub fn compare_content(
    primary: &Dataset,
    secondary: &Dataset,
    verdict: &StructuralVerdict,
    line_id: &str,
    sink: LogSink<'_>,
) -> Result<ContentComparison> {
    if !verdict.is_matched(line_id) {
        sink.error(format_args!(
            "Line identifier '{}' is not a structurally matched column",
            line_id
        ));
        return Err(ComparerError::identifier_not_comparable(line_id));
    }

    let left = Projection::new(Side::Primary, primary, verdict, line_id)?;
    let right = Projection::new(Side::Secondary, secondary, verdict, line_id)?;
    let left_index = left.index()?;
    let right_index = right.index()?;

    let mut result = ContentComparison::default();

    for (pos, row) in primary.rows.iter().enumerate() {
        let id = left.identifier(row);
        let Some(&other_pos) = right_index.get(id) else {
            result.primary_exclusive.push(left.exclusive(pos, row));
            continue;
        };
        let other = &secondary.rows[other_pos];

        let fields: Vec<FieldDifference> = verdict
            .matched
            .iter()
            .zip(left.columns.iter().zip(&right.columns))
            .filter_map(|(column, (&li, &ri))| {
                let primary_value = row.get(li).cloned().unwrap_or(CellValue::Null);
                let secondary_value = other.get(ri).cloned().unwrap_or(CellValue::Null);
                (primary_value != secondary_value).then(|| FieldDifference {
                    identifier: id.clone(),
                    column: column.name.clone(),
                    column_index: li,
                    primary_value,
                    secondary_value,
                })
            })
            .collect();

        if !fields.is_empty() {
            sink.debug(format_args!(
                "row {} ({}) differs in {} field(s)",
                pos,
                id,
                fields.len()
            ));
            result.differences.push(RowDifference {
                index: pos,
                secondary_index: other_pos,
                identifier: id.clone(),
                row: row.clone(),
                fields,
            });
        }
    }

    for (pos, row) in secondary.rows.iter().enumerate() {
        if !left_index.contains_key(right.identifier(row)) {
            result.secondary_exclusive.push(right.exclusive(pos, row));
        }
    }

    sink.info(format_args!(
        "Content comparison done: {} differing rows, {} primary-only, {} secondary-only",
        result.differences.len(),
        result.primary_exclusive.len(),
        result.secondary_exclusive.len()
    ));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::structure::compare_structure;

    fn ints(headers: &[&str], rows: &[&[i64]]) -> Dataset {
        Dataset::from_rows(
            headers,
            rows.iter()
                .map(|r| r.iter().map(|&v| CellValue::Int(v)).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        )
    }

    fn run(primary: &Dataset, secondary: &Dataset, line_id: &str) -> Result<ContentComparison> {
        let verdict = compare_structure(primary, secondary, LogSink::global())?;
        compare_content(primary, secondary, &verdict, line_id, LogSink::global())
    }

    fn ids(rows: &[ExclusiveRow]) -> Vec<CellValue> {
        rows.iter().map(|r| r.identifier.clone()).collect()
    }

    #[test]
    fn test_single_field_difference() {
        let primary = ints(&["A", "B", "C"], &[&[1, 3, 8], &[2, 5, 1]]);
        let secondary = ints(&["A", "B", "C"], &[&[1, 3, 6], &[2, 5, 1]]);

        let result = run(&primary, &secondary, "A").unwrap();

        assert_eq!(result.differences.len(), 1);
        let diff = &result.differences[0];
        assert_eq!(diff.index, 0);
        assert_eq!(diff.identifier, CellValue::Int(1));
        assert_eq!(
            diff.fields,
            vec![FieldDifference {
                identifier: CellValue::Int(1),
                column: "C".to_string(),
                column_index: 2,
                primary_value: CellValue::Int(8),
                secondary_value: CellValue::Int(6),
            }]
        );
        assert!(result.primary_exclusive.is_empty());
        assert!(result.secondary_exclusive.is_empty());
    }

    #[test]
    fn test_every_differing_column_is_kept() {
        let primary = ints(&["A", "B", "C", "D"], &[&[1, 1, 1, 1]]);
        let secondary = ints(&["A", "B", "C", "D"], &[&[1, 2, 3, 4]]);

        let result = run(&primary, &secondary, "A").unwrap();
        let columns: Vec<_> = result.differences[0]
            .fields
            .iter()
            .map(|f| (f.column.as_str(), f.secondary_value.clone()))
            .collect();

        assert_eq!(
            columns,
            vec![
                ("B", CellValue::Int(2)),
                ("C", CellValue::Int(3)),
                ("D", CellValue::Int(4)),
            ]
        );
    }

    #[test]
    fn test_exclusive_rows_in_source_order() {
        let primary = ints(&["A", "B"], &[&[5, 0], &[1, 1], &[7, 0]]);
        let secondary = ints(&["A", "B"], &[&[9, 0], &[1, 1], &[8, 0]]);

        let result = run(&primary, &secondary, "A").unwrap();

        assert!(result.differences.is_empty());
        assert_eq!(ids(&result.primary_exclusive), vec![CellValue::Int(5), CellValue::Int(7)]);
        assert_eq!(ids(&result.secondary_exclusive), vec![CellValue::Int(9), CellValue::Int(8)]);
        assert_eq!(result.secondary_exclusive[1].index, 2);
        assert_eq!(result.primary_exclusive[0].side, Side::Primary);
    }

    #[test]
    fn test_rows_are_aligned_by_identifier_not_position() {
        let primary = ints(&["A", "B"], &[&[1, 10], &[2, 20], &[3, 30]]);
        let secondary = ints(&["A", "B"], &[&[3, 30], &[1, 10], &[2, 21]]);

        let result = run(&primary, &secondary, "A").unwrap();

        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].index, 1);
        assert_eq!(result.differences[0].secondary_index, 2);
    }

    #[test]
    fn test_only_matched_columns_are_compared() {
        let primary = ints(&["A", "B", "P"], &[&[1, 1, 100]]);
        let secondary = Dataset::from_rows(
            &["A", "S", "B"],
            vec![vec![CellValue::Int(1), CellValue::from("x"), CellValue::Int(1)]],
        );

        let result = run(&primary, &secondary, "A").unwrap();
        assert!(result.differences.is_empty());

        let primary = ints(&["A", "B"], &[&[1, 1], &[2, 2]]);
        let secondary = ints(&["A", "C"], &[&[1, 9]]);
        let result = run(&primary, &secondary, "A").unwrap();
        assert_eq!(result.primary_exclusive[0].cells, vec![CellValue::Int(2)]);
    }

    #[test]
    fn test_identifier_must_be_matched() {
        let primary = ints(&["A", "B"], &[&[1, 1]]);
        let secondary = Dataset::from_rows(
            &["A", "B"],
            vec![vec![CellValue::from("one"), CellValue::Int(1)]],
        );

        let err = run(&primary, &secondary, "A").unwrap_err();
        assert!(matches!(
            err,
            ComparerError::IdentifierNotComparable { ref column } if column == "A"
        ));

        let err = run(&primary, &primary, "missing").unwrap_err();
        assert!(matches!(err, ComparerError::IdentifierNotComparable { .. }));
    }

    #[test]
    fn test_duplicate_identifier_is_rejected() {
        let primary = ints(&["A", "B"], &[&[1, 1], &[2, 2]]);
        let secondary = ints(&["A", "B"], &[&[1, 1], &[2, 2], &[1, 3]]);

        let err = run(&primary, &secondary, "A").unwrap_err();
        match err {
            ComparerError::DuplicateIdentifier {
                side,
                value,
                first_row,
                duplicate_row,
            } => {
                assert_eq!(side, Side::Secondary);
                assert_eq!(value, "1");
                assert_eq!((first_row, duplicate_row), (0, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_identifier_is_rejected() {
        let primary = Dataset::from_rows(
            &["A", "B"],
            vec![
                vec![CellValue::Int(1), CellValue::Int(1)],
                vec![CellValue::Null, CellValue::Int(2)],
            ],
        );

        let err = run(&primary, &primary, "A").unwrap_err();
        assert!(matches!(
            err,
            ComparerError::NullIdentifier { side: Side::Primary, row: 1 }
        ));
    }

    #[test]
    fn test_self_comparison_has_no_findings() {
        let dataset = Dataset::from_rows(
            &["id", "name", "score", "seen"],
            vec![
                vec!["a".into(), "Ann".into(), CellValue::Float(1.5), CellValue::Null],
                vec!["b".into(), CellValue::Null, CellValue::Float(f64::NAN), true.into()],
            ],
        );

        let result = run(&dataset, &dataset, "id").unwrap();
        assert_eq!(result, ContentComparison::default());
    }

    #[test]
    fn test_float_comparison_is_strict() {
        let primary = Dataset::from_rows(
            &["id", "v"],
            vec![vec![CellValue::Int(1), CellValue::Float(0.1 + 0.2)]],
        );
        let secondary = Dataset::from_rows(
            &["id", "v"],
            vec![vec![CellValue::Int(1), CellValue::Float(0.3)]],
        );

        let result = run(&primary, &secondary, "id").unwrap();
        assert_eq!(result.differences.len(), 1);
    }
}
