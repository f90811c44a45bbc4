//! Comparison engine: structure, content, and report assembly

mod content;
pub mod report;
mod structure;

use serde::{Deserialize, Serialize};

use crate::error::{ComparerError, Result};
use crate::logging::LogSink;
use crate::model::{CellValue, Column, Dataset, Row};

pub use content::{compare_content, ContentComparison};
pub use report::{build_reports, ExportTable, ReportCell, ReportRow, ReportTable, Reports};
pub use structure::{compare_structure, StructuralVerdict};

/// Which of the two compared datasets a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Primary,
    Secondary,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Primary => write!(f, "primary"),
            Side::Secondary => write!(f, "secondary"),
        }
    }
}

/// A single field that differs between two aligned rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDifference {
    /// Line identifier of the aligned rows
    pub identifier: CellValue,
    /// Column name
    pub column: String,
    /// Column index in the primary dataset
    pub column_index: usize,
    pub primary_value: CellValue,
    pub secondary_value: CellValue,
}

/// A primary row with at least one field differing from its secondary counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDifference {
    /// Row position in the primary dataset
    pub index: usize,
    /// Row position of the aligned row in the secondary dataset
    pub secondary_index: usize,
    pub identifier: CellValue,
    /// The full primary row, all original columns
    pub row: Row,
    pub fields: Vec<FieldDifference>,
}

/// A row whose identifier exists on only one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusiveRow {
    pub side: Side,
    /// Row position in its own dataset
    pub index: usize,
    pub identifier: CellValue,
    /// Row contents restricted to the matched columns
    pub cells: Vec<CellValue>,
}

/// Everything a comparison run found. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Comparison name
    pub name: String,
    /// Line identifier column
    pub line_id: String,
    pub verdict: StructuralVerdict,
    /// Full column list of the primary dataset
    pub primary_columns: Vec<Column>,
    pub primary_row_count: usize,
    pub secondary_row_count: usize,
    pub differences: Vec<RowDifference>,
    pub primary_exclusive: Vec<ExclusiveRow>,
    pub secondary_exclusive: Vec<ExclusiveRow>,
}

impl ComparisonResult {
    /// Result for a run whose content comparison did not take place
    fn structural_only(
        name: &str,
        line_id: &str,
        verdict: StructuralVerdict,
        primary: &Dataset,
        secondary: &Dataset,
    ) -> Self {
        Self {
            name: name.to_string(),
            line_id: line_id.to_string(),
            verdict,
            primary_columns: primary.columns.clone(),
            primary_row_count: primary.row_count(),
            secondary_row_count: secondary.row_count(),
            differences: Vec::new(),
            primary_exclusive: Vec::new(),
            secondary_exclusive: Vec::new(),
        }
    }

    /// True when the content comparison ran
    pub fn content_compared(&self) -> bool {
        !self.verdict.is_unknown() && !self.verdict.is_disjoint()
    }

    /// All field-level differences, row by row
    pub fn field_differences(&self) -> impl Iterator<Item = &FieldDifference> {
        self.differences.iter().flat_map(|d| d.fields.iter())
    }

    /// Differing rows plus exclusive rows on both sides
    pub fn difference_count(&self) -> usize {
        self.differences.len() + self.primary_exclusive.len() + self.secondary_exclusive.len()
    }

    pub fn has_differences(&self) -> bool {
        self.difference_count() > 0
    }

    /// Share of differences relative to the primary row count, as a percentage.
    ///
    /// The ratio is rounded to 4 decimals before scaling. The divisor is always
    /// the primary row count, so secondary-only rows can push this above 100.
    pub fn difference_percentage(&self) -> f64 {
        if self.primary_row_count == 0 {
            return 0.0;
        }
        let ratio = self.difference_count() as f64 / self.primary_row_count as f64;
        (ratio * 10_000.0).round() / 10_000.0 * 100.0
    }

    pub fn row_counts_match(&self) -> bool {
        self.primary_row_count == self.secondary_row_count
    }

    /// Same schema and no content differences
    pub fn is_identical(&self) -> bool {
        self.verdict.is_fully_matched && !self.has_differences()
    }
}

/// Runs the structural then the content comparison of two datasets
#[derive(Debug)]
pub struct Comparer<'a> {
    name: String,
    line_id: String,
    sink: LogSink<'a>,
}

impl Comparer<'static> {
    pub fn new(name: impl Into<String>, line_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_id: line_id.into(),
            sink: LogSink::global(),
        }
    }
}

impl<'a> Comparer<'a> {
    /// Send this comparer's log records to `sink`
    pub fn with_sink<'b>(self, sink: LogSink<'b>) -> Comparer<'b> {
        Comparer {
            name: self.name,
            line_id: self.line_id,
            sink,
        }
    }

    /// Compare two datasets.
    ///
    /// An empty input yields an unknown verdict and a structural-only result;
    /// datasets with no common column skip the content comparison. Errors are
    /// returned only by the content comparison.
    pub fn compare(&self, primary: &Dataset, secondary: &Dataset) -> Result<ComparisonResult> {
        let result = self.run_structure(primary, secondary)?;
        if !result.content_compared() {
            return Ok(result);
        }
        self.run_content(&result, primary, secondary)
    }

    /// The structural comparison alone, as a result with no content findings
    pub fn run_structure(
        &self,
        primary: &Dataset,
        secondary: &Dataset,
    ) -> Result<ComparisonResult> {
        let verdict = match compare_structure(primary, secondary, self.sink) {
            Ok(verdict) => verdict,
            Err(ComparerError::EmptyInput { .. }) => StructuralVerdict::unknown(),
            Err(e) => return Err(e),
        };

        Ok(ComparisonResult::structural_only(
            &self.name,
            &self.line_id,
            verdict,
            primary,
            secondary,
        ))
    }

    /// Run the content comparison on top of a structural result from [`Self::run_structure`]
    pub fn run_content(
        &self,
        structural: &ComparisonResult,
        primary: &Dataset,
        secondary: &Dataset,
    ) -> Result<ComparisonResult> {
        self.sink.info(format_args!(
            "Comparing data counts: primary {} vs secondary {}",
            primary.row_count(),
            secondary.row_count()
        ));

        let content = compare_content(
            primary,
            secondary,
            &structural.verdict,
            &self.line_id,
            self.sink,
        )?;

        Ok(ComparisonResult {
            differences: content.differences,
            primary_exclusive: content.primary_exclusive,
            secondary_exclusive: content.secondary_exclusive,
            ..structural.clone()
        })
    }
}
