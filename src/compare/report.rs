//! Report tables built from a comparison result

use serde::Serialize;

use crate::model::{CellValue, Dataset};

use super::{ComparisonResult, ExclusiveRow};

/// A cell of a report table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportCell {
    /// Value shown as-is
    Value(CellValue),
    /// Field that differs between the two datasets
    Changed {
        primary: CellValue,
        secondary: CellValue,
    },
}

impl ReportCell {
    pub fn is_changed(&self) -> bool {
        matches!(self, ReportCell::Changed { .. })
    }

    /// Flat text form: the value itself, or `<primary>/<secondary>` for a changed field.
    /// Missing values are written as empty strings outside annotations.
    pub fn text(&self) -> String {
        match self {
            ReportCell::Value(CellValue::Null) => String::new(),
            ReportCell::Value(value) => value.display().into_owned(),
            ReportCell::Changed { primary, secondary } => {
                format!("{}/{}", primary.display(), secondary.display())
            }
        }
    }
}

/// A row of a report table, carrying its original row position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub index: usize,
    pub cells: Vec<ReportCell>,
}

/// A table ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Annotated common-difference rows, from the result alone
    pub fn common_differences(result: &ComparisonResult) -> Self {
        let headers = result.primary_columns.iter().map(|c| c.name.clone()).collect();
        let rows = result
            .differences
            .iter()
            .map(|diff| {
                let mut cells: Vec<ReportCell> =
                    diff.row.cells.iter().cloned().map(ReportCell::Value).collect();
                for field in &diff.fields {
                    if let Some(cell) = cells.get_mut(field.column_index) {
                        *cell = ReportCell::Changed {
                            primary: field.primary_value.clone(),
                            secondary: field.secondary_value.clone(),
                        };
                    }
                }
                ReportRow {
                    index: diff.index,
                    cells,
                }
            })
            .collect();

        Self { headers, rows }
    }

    /// Full original rows of `dataset` at the positions of `exclusive`
    pub fn exclusive_rows(dataset: &Dataset, exclusive: &[ExclusiveRow]) -> Self {
        let rows = exclusive
            .iter()
            .filter_map(|entry| {
                dataset.rows.get(entry.index).map(|row| ReportRow {
                    index: entry.index,
                    cells: row.cells.iter().cloned().map(ReportCell::Value).collect(),
                })
            })
            .collect();

        Self {
            headers: dataset.headers(),
            rows,
        }
    }
}

/// Flat string table persisted on export
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Export form of the common differences, reproducible from the result alone
    pub fn from_result(result: &ComparisonResult) -> Self {
        Self::from(&ReportTable::common_differences(result))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&ReportTable> for ExportTable {
    fn from(table: &ReportTable) -> Self {
        Self {
            headers: table.headers.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| row.cells.iter().map(ReportCell::text).collect())
                .collect(),
        }
    }
}

/// The report tables of one comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reports {
    pub common_differences: ReportTable,
    pub primary_exclusive: ReportTable,
    pub secondary_exclusive: ReportTable,
    pub export: ExportTable,
}

/// Assemble the report tables for a comparison of `primary` and `secondary`
pub fn build_reports(
    primary: &Dataset,
    secondary: &Dataset,
    result: &ComparisonResult,
) -> Reports {
    let common_differences = ReportTable::common_differences(result);
    let export = ExportTable::from(&common_differences);

    Reports {
        common_differences,
        primary_exclusive: ReportTable::exclusive_rows(primary, &result.primary_exclusive),
        secondary_exclusive: ReportTable::exclusive_rows(secondary, &result.secondary_exclusive),
        export,
    }
}
