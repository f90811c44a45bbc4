//! JSON output format


use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::compare::{ExclusiveRow, FieldDifference, ReportTable, StructuralVerdict};

use super::{OutputFormatter, RenderContext};

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonStats {
    primary_row_count: usize,
    secondary_row_count: usize,
    differing_rows: usize,
    differing_fields: usize,
    primary_exclusive: usize,
    secondary_exclusive: usize,
    difference_percentage: f64,
}

#[derive(Serialize)]
struct JsonComparisonOutput<'a> {
    name: &'a str,
    primary_file: String,
    secondary_file: String,
    line_id: &'a str,
    structure: &'a StructuralVerdict,
    content_compared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_error: Option<String>,
    stats: JsonStats,
    field_differences: Vec<&'a FieldDifference>,
    primary_exclusive: &'a [ExclusiveRow],
    secondary_exclusive: &'a [ExclusiveRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<JsonDetails<'a>>,
}

#[derive(Serialize)]
struct JsonDetails<'a> {
    common_differences: &'a ReportTable,
    primary_exclusive: &'a ReportTable,
    secondary_exclusive: &'a ReportTable,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, ctx: &RenderContext<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let result = ctx.result;
        let field_differences: Vec<_> = result.field_differences().collect();

        let output = JsonComparisonOutput {
            name: &result.name,
            primary_file: ctx.primary_path.display().to_string(),
            secondary_file: ctx.secondary_path.display().to_string(),
            line_id: &result.line_id,
            structure: &result.verdict,
            content_compared: result.content_compared() && ctx.content_error.is_none(),
            content_error: ctx.content_error.map(|e| e.to_string()),
            stats: JsonStats {
                primary_row_count: result.primary_row_count,
                secondary_row_count: result.secondary_row_count,
                differing_rows: result.differences.len(),
                differing_fields: field_differences.len(),
                primary_exclusive: result.primary_exclusive.len(),
                secondary_exclusive: result.secondary_exclusive.len(),
                difference_percentage: result.difference_percentage(),
            },
            field_differences,
            primary_exclusive: &result.primary_exclusive,
            secondary_exclusive: &result.secondary_exclusive,
            details: ctx.show_details.then(|| JsonDetails {
                common_differences: &ctx.reports.common_differences,
                primary_exclusive: &ctx.reports.primary_exclusive,
                secondary_exclusive: &ctx.reports.secondary_exclusive,
            }),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
